//! Feed output.
//!
//! Sorts the collected items and writes them as a pretty-printed JSON array.

use std::path::Path;

use tracing::info;

use super::item::Item;

#[derive(thiserror::Error, Debug)]
pub enum FeedError {
    #[error("failed to serialize feed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write feed to {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// Sort items newest first.
///
/// Items are ordered by `(date, title)` descending as one combined key, so
/// items sharing a date are ordered by title descending as well. The sort is
/// stable: items equal on both keys keep their discovery order.
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(|a, b| (&b.date, &b.title).cmp(&(&a.date, &a.title)));
}

/// Render items as the feed document: a JSON array with 2-space indentation.
pub fn render_feed(items: &[Item]) -> Result<String, FeedError> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Write the feed to `path`, creating parent directories as needed.
///
/// The file is overwritten on every run.
pub fn write_feed(items: &[Item], path: &Path) -> Result<(), FeedError> {
    let json = render_feed(items)?;

    let write_err = |source| FeedError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, json).map_err(write_err)?;

    info!(path = %path.display(), items = items.len(), "Wrote feed");
    Ok(())
}
