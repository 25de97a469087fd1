use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use chrono::NaiveDate;

// =============================================================================
// Field values
// =============================================================================

/// A single front matter value, with YAML timestamps recognized as dates.
///
/// Front matter is untyped, so every field is carried as one of these and
/// coerced into its target shape by the item builder.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    /// A timestamp scalar such as `2024-01-01` or `2024-01-01T09:30:00Z`.
    /// `raw` keeps the text as written.
    Date { date: NaiveDate, raw: String },
    Sequence(Vec<FieldValue>),
    Mapping(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert to a JSON value, used when a collection has to be rendered as text.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            FieldValue::Null => Value::Null,
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Number(n) => number_to_json(n),
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Date { raw, .. } => Value::String(raw.clone()),
            FieldValue::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            FieldValue::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Numbers outside JSON's range (`.inf`, `.nan`) keep their YAML text.
fn number_to_json(n: &serde_yaml::Number) -> serde_json::Value {
    if let Some(i) = n.as_i64() {
        return i.into();
    }
    if let Some(u) = n.as_u64() {
        return u.into();
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(n.to_string()))
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Number(n) => write!(f, "{n}"),
            FieldValue::String(s) => f.write_str(s),
            FieldValue::Date { raw, .. } => f.write_str(raw),
            FieldValue::Sequence(_) | FieldValue::Mapping(_) => write!(f, "{}", self.to_json()),
        }
    }
}

impl From<serde_yaml::Value> for FieldValue {
    fn from(value: serde_yaml::Value) -> Self {
        use serde_yaml::Value;

        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(b),
            Value::Number(n) => FieldValue::Number(n),
            Value::String(s) => match parse_timestamp(&s) {
                Some(date) => FieldValue::Date { date, raw: s },
                None => FieldValue::String(s),
            },
            Value::Sequence(items) => {
                FieldValue::Sequence(items.into_iter().map(FieldValue::from).collect())
            }
            Value::Mapping(map) => FieldValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (key_to_string(k), FieldValue::from(v)))
                    .collect(),
            ),
            // Custom tags (`!foo bar`) are ignored; only the tagged value matters.
            Value::Tagged(tagged) => FieldValue::from(tagged.value),
        }
    }
}

/// Render a mapping key as a string. Non-string keys use their scalar text.
fn key_to_string(key: serde_yaml::Value) -> String {
    match FieldValue::from(key) {
        FieldValue::String(s) => s,
        other => other.to_string(),
    }
}

/// Recognize a YAML timestamp scalar.
///
/// Accepts a `YYYY-MM-DD` date, or a date with 1-2 digit month and day
/// followed by a time (`T`, `t` or spaces, then `H:MM:SS`, an optional
/// fraction and an optional `Z`/`±HH[:MM]` zone). Seconds are required.
fn parse_timestamp(s: &str) -> Option<NaiveDate> {
    let (date_part, time_part) = match s.find(['T', 't', ' ', '\t']) {
        Some(i) => s.split_at(i),
        None => (s, ""),
    };

    let (year, rest) = take_digits(date_part, 4, 4)?;
    let (month, rest) = take_digits(rest.strip_prefix('-')?, 1, 2)?;
    let (day, rest) = take_digits(rest.strip_prefix('-')?, 1, 2)?;
    if !rest.is_empty() {
        return None;
    }

    if time_part.is_empty() {
        if month.len() != 2 || day.len() != 2 {
            return None;
        }
    } else {
        let time = match time_part.strip_prefix(['T', 't']) {
            Some(time) => time,
            None => time_part.trim_start_matches([' ', '\t']),
        };
        match_time_of_day(time)?;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Match `H:MM:SS[.fraction][ ][Z|±H[:MM]]` to the end of the input.
fn match_time_of_day(s: &str) -> Option<()> {
    let (_, rest) = take_digits(s, 1, 2)?;
    let (_, rest) = take_digits(rest.strip_prefix(':')?, 2, 2)?;
    let (_, mut rest) = take_digits(rest.strip_prefix(':')?, 2, 2)?;

    if let Some(fraction) = rest.strip_prefix('.') {
        rest = fraction.trim_start_matches(|c: char| c.is_ascii_digit());
    }
    let rest = rest.trim_start_matches([' ', '\t']);
    if rest.is_empty() || rest == "Z" {
        return Some(());
    }

    let (_, rest) = take_digits(rest.strip_prefix(['+', '-'])?, 1, 2)?;
    let rest = match rest.strip_prefix(':') {
        Some(minutes) => take_digits(minutes, 2, 2)?.1,
        None => rest,
    };
    rest.is_empty().then_some(())
}

/// Split off a leading run of `min..=max` ASCII digits.
fn take_digits(s: &str, min: usize, max: usize) -> Option<(&str, &str)> {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    (min..=max).contains(&len).then(|| s.split_at(len))
}

/// Top-level keys whose value is written as a non-plain scalar (quoted,
/// block or explicitly tagged). YAML only resolves plain scalars to
/// timestamps, so these stay strings.
fn non_plain_keys(block: &str) -> HashSet<String> {
    block
        .lines()
        .filter(|line| !line.starts_with([' ', '\t', '#', '-']))
        .filter_map(|line| line.split_once(": ").or_else(|| line.split_once(":\t")))
        .filter(|(_, value)| value.trim_start().starts_with(['"', '\'', '|', '>', '!']))
        .map(|(key, _)| key.trim().trim_matches(['"', '\'']).to_string())
        .collect()
}

// =============================================================================
// Front matter
// =============================================================================

/// Front matter metadata parsed from a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    fields: HashMap<String, FieldValue>,
}

impl FrontMatter {
    /// Look up a field. Explicit `null` values read as absent.
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key).filter(|value| !value.is_null())
    }
}

impl FromIterator<(String, FieldValue)> for FrontMatter {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Locate the front matter block at the very start of a document.
///
/// The document must open with a `---` line, and the block ends at the next
/// line that is exactly `---`, searching from the second line after the
/// opening one. Trailing whitespace is allowed on both delimiter lines, and
/// the closing line must end with a newline.
///
/// ```markdown
/// ---
/// title: My Page
/// status: published
/// ---
///
/// # Content starts here
/// ```
///
/// Returns the text between the delimiters, or `None` if there is no block.
pub fn front_matter_block(content: &str) -> Option<&str> {
    let after_opening = content.strip_prefix("---")?;
    let (opening_rest, body) = after_opening.split_once('\n')?;
    if !opening_rest.trim().is_empty() {
        return None;
    }

    // The closing line must follow a newline inside the block, so the line
    // right after the opening one never closes it.
    let mut consumed = 0;
    for (index, line) in body.split_inclusive('\n').enumerate() {
        if index > 0 {
            if let Some(text) = line.strip_suffix('\n') {
                if text.trim_end() == "---" {
                    return Some(&body[..consumed]);
                }
            }
        }
        consumed += line.len();
    }

    None
}

/// Parse the front matter of a document.
///
/// `Ok(None)` means the document carries no usable metadata: there is no
/// leading block, or the block is not a non-empty mapping. A YAML syntax
/// error inside the block is returned so the caller can report it.
pub fn parse_front_matter(content: &str) -> Result<Option<FrontMatter>, serde_yaml::Error> {
    let Some(block) = front_matter_block(content) else {
        return Ok(None);
    };

    let map = match serde_yaml::from_str::<serde_yaml::Value>(block)? {
        serde_yaml::Value::Mapping(map) if !map.is_empty() => map,
        _ => return Ok(None),
    };

    let non_plain = non_plain_keys(block);
    Ok(Some(
        map.into_iter()
            .map(|(k, v)| {
                let key = key_to_string(k);
                let value = match v {
                    serde_yaml::Value::String(s) if non_plain.contains(&key) => {
                        FieldValue::String(s)
                    }
                    other => FieldValue::from(other),
                };
                (key, value)
            })
            .collect(),
    ))
}
