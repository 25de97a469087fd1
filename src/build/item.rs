use std::path::Path;

use serde::Serialize;
use tracing::warn;

use crate::config::SiteConfig;

use super::document::{FieldValue, FrontMatter};
use super::paths::{file_stem, source_path_to_url, to_posix};

/// Status a document must carry to appear in the feed.
const PUBLISHED: &str = "published";

/// Status assumed when a document does not declare one.
const DEFAULT_STATUS: &str = "draft";

/// One published document's public metadata, as written to the feed.
///
/// Field order is the key order of the serialized JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    /// `YYYY-MM-DD` for date values; empty when the document has no date.
    pub date: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub slug: String,
    /// Path relative to the working directory, with `/` separators
    pub source_path: String,
    pub url: String,
}

/// Result of building an item from a document's front matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Published(Item),
    /// The document's status is not `published`.
    Excluded { status: String },
}

/// Build a feed item from a document's front matter.
///
/// `source_path` is the document path relative to the working directory.
/// Documents whose status is not `published` are excluded; for published
/// documents every missing field falls back to a default.
pub fn build_item(front_matter: &FrontMatter, source_path: &Path, site: &SiteConfig) -> ItemOutcome {
    let status = document_status(front_matter);
    if status != PUBLISHED {
        return ItemOutcome::Excluded { status };
    }

    let stem = file_stem(source_path);
    let posix_path = to_posix(source_path);

    ItemOutcome::Published(Item {
        title: front_matter
            .get("title")
            .map(ToString::to_string)
            .unwrap_or_else(|| stem.clone()),
        date: coerce_date(front_matter.get("date")),
        summary: front_matter
            .get("summary")
            .map(|v| v.to_string().trim().to_string())
            .unwrap_or_default(),
        tags: coerce_tags(front_matter.get("tags"), &posix_path),
        slug: front_matter
            .get("slug")
            .map(|v| v.to_string().trim().to_string())
            .unwrap_or(stem),
        url: source_path_to_url(source_path, &site.base_url),
        source_path: posix_path,
    })
}

/// The normalized status of a document: trimmed, lowercased, `draft` if absent.
pub fn document_status(front_matter: &FrontMatter) -> String {
    front_matter
        .get("status")
        .map(|v| v.to_string().trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string())
}

fn coerce_date(value: Option<&FieldValue>) -> String {
    match value {
        Some(FieldValue::Date { date, .. }) => date.format("%Y-%m-%d").to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn coerce_tags(value: Option<&FieldValue>, source_path: &str) -> Vec<String> {
    match value {
        None => Vec::new(),
        Some(FieldValue::Sequence(items)) => items.iter().map(ToString::to_string).collect(),
        Some(FieldValue::Mapping(_)) => {
            warn!(document = source_path, "Ignoring tags given as a mapping");
            Vec::new()
        }
        Some(scalar) => vec![scalar.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::document::parse_front_matter;

    fn site() -> SiteConfig {
        SiteConfig::new("https://example.com")
    }

    fn front_matter(yaml: &str) -> FrontMatter {
        parse_front_matter(&format!("---\n{yaml}\n---\n"))
            .unwrap()
            .unwrap()
    }

    fn published(yaml: &str, path: &str) -> Item {
        match build_item(&front_matter(yaml), Path::new(path), &site()) {
            ItemOutcome::Published(item) => item,
            ItemOutcome::Excluded { status } => panic!("unexpectedly excluded ({status})"),
        }
    }

    #[test]
    fn test_full_item() {
        let item = published(
            "status: published\ntitle: \"A\"\ndate: 2024-01-01\nsummary: \"  Short intro.  \"\ntags: [x, y]\nslug: \" a-post \"",
            "content/a.md",
        );

        assert_eq!(
            item,
            Item {
                title: "A".into(),
                date: "2024-01-01".into(),
                summary: "Short intro.".into(),
                tags: vec!["x".into(), "y".into()],
                slug: "a-post".into(),
                source_path: "content/a.md".into(),
                url: "https://example.com/content/a.html".into(),
            }
        );
    }

    #[test]
    fn test_status_matching_is_trimmed_and_case_insensitive() {
        for status in ["published", "Published", "  PUBLISHED  ", "\"published \""] {
            let fm = front_matter(&format!("status: {status}"));
            assert!(
                matches!(
                    build_item(&fm, Path::new("content/a.md"), &site()),
                    ItemOutcome::Published(_)
                ),
                "status {status:?} should be published"
            );
        }
    }

    #[test]
    fn test_non_published_documents_are_excluded() {
        let cases = [
            ("status: draft", "draft"),
            ("status: review", "review"),
            ("status: publish", "publish"),
            ("title: No status", "draft"),
            ("status: ~", "draft"),
            ("status: true", "true"),
        ];
        for (yaml, expected) in cases {
            let outcome = build_item(&front_matter(yaml), Path::new("content/a.md"), &site());
            assert_eq!(
                outcome,
                ItemOutcome::Excluded {
                    status: expected.to_string()
                }
            );
        }
    }

    #[test]
    fn test_defaults_use_file_stem() {
        let item = published("status: published", "content/guides/getting-started.md");
        assert_eq!(item.title, "getting-started");
        assert_eq!(item.slug, "getting-started");
        assert_eq!(item.date, "");
        assert_eq!(item.summary, "");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let item = published(
            "status: published\ntitle: ~\nslug:\ndate: null\ntags: ~",
            "content/post.md",
        );
        assert_eq!(item.title, "post");
        assert_eq!(item.slug, "post");
        assert_eq!(item.date, "");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_title_is_not_trimmed() {
        let item = published("status: published\ntitle: \" Spaced \"", "content/a.md");
        assert_eq!(item.title, " Spaced ");
    }

    #[test]
    fn test_scalar_fields_are_string_coerced() {
        let item = published(
            "status: published\ntitle: 1984\nslug: 42\nsummary: true",
            "content/a.md",
        );
        assert_eq!(item.title, "1984");
        assert_eq!(item.slug, "42");
        assert_eq!(item.summary, "true");
    }

    #[test]
    fn test_date_coercion() {
        let item = published("status: published\ndate: 2024-03-05T10:30:00Z", "content/a.md");
        assert_eq!(item.date, "2024-03-05");

        let item = published("status: published\ndate: \"2023-12-31\"", "content/a.md");
        assert_eq!(item.date, "2023-12-31");

        let item = published("status: published\ndate: next week", "content/a.md");
        assert_eq!(item.date, "next week");

        let item = published("status: published\ndate: 2024", "content/a.md");
        assert_eq!(item.date, "2024");
    }

    #[test]
    fn test_only_plain_timestamps_are_reformatted() {
        let item = published("status: published\ndate: \"2024-01-01T10:00:00Z\"", "content/a.md");
        assert_eq!(item.date, "2024-01-01T10:00:00Z");

        let item = published("status: published\ndate: '2024-01-01T10:00:00Z'", "content/a.md");
        assert_eq!(item.date, "2024-01-01T10:00:00Z");

        let item = published("status: published\ndate: \"2024-01-01 \"", "content/a.md");
        assert_eq!(item.date, "2024-01-01 ");

        // Seconds are required for a timestamp
        let item = published("status: published\ndate: 2024-01-01 10:00", "content/a.md");
        assert_eq!(item.date, "2024-01-01 10:00");

        let item = published("status: published\ndate: 2024-01-01 10:00:00", "content/a.md");
        assert_eq!(item.date, "2024-01-01");
    }

    #[test]
    fn test_tag_normalization() {
        let item = published("status: published\ntags: rust", "content/a.md");
        assert_eq!(item.tags, vec!["rust"]);

        let item = published("status: published\ntags: [rust, 2024, true, 1.5]", "content/a.md");
        assert_eq!(item.tags, vec!["rust", "2024", "true", "1.5"]);

        let item = published("status: published\ntags: []", "content/a.md");
        assert!(item.tags.is_empty());

        let item = published("status: published\ntags: 7", "content/a.md");
        assert_eq!(item.tags, vec!["7"]);

        let item = published("status: published\ntags:\n  lang: rust", "content/a.md");
        assert!(item.tags.is_empty());
    }

    #[test]
    fn test_unrecognized_keys_are_ignored() {
        let item = published(
            "status: published\nauthor: Someone\nweight: 3\ntitle: Kept",
            "content/a.md",
        );
        assert_eq!(item.title, "Kept");
    }

    #[test]
    fn test_source_path_and_url_use_forward_slashes() {
        let item = published("status: published", "./content/guides/setup.md");
        assert_eq!(item.source_path, "content/guides/setup.md");
        assert_eq!(item.url, "https://example.com/content/guides/setup.html");
    }
}
