use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::SiteConfig;

use super::document::parse_front_matter;
use super::feed::{FeedError, sort_items, write_feed};
use super::item::{Item, ItemOutcome, build_item};
use super::paths::{relative_to, to_posix};
use super::source::{ContentSource, SourceError};

#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
}

/// Counts and output location of a finished build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub output_path: PathBuf,
    /// Markdown documents discovered under the content directory
    pub documents: usize,
    /// Documents without usable front matter
    pub skipped: usize,
    /// Documents whose status is not `published`
    pub excluded: usize,
    /// Items written to the feed
    pub items: usize,
}

/// Items collected from the content directory, before sorting.
#[derive(Debug, Default)]
pub struct Collected {
    pub items: Vec<Item>,
    pub documents: usize,
    pub skipped: usize,
    pub excluded: usize,
}

pub struct Builder {
    site: SiteConfig,
    source: ContentSource,
    output_path: PathBuf,
    /// Directory that source paths are reported relative to
    working_dir: PathBuf,
}

impl Builder {
    pub fn new(
        site: SiteConfig,
        content_dir: PathBuf,
        output_path: PathBuf,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            site,
            source: ContentSource::new(content_dir),
            output_path,
            working_dir,
        }
    }

    /// Run the build:
    /// 1. Discover markdown documents
    /// 2. Extract front matter and build items for published documents
    /// 3. Sort items newest first
    /// 4. Write the feed
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let mut collected = self.collect()?;
        sort_items(&mut collected.items);
        write_feed(&collected.items, &self.output_path)?;

        Ok(BuildResult {
            output_path: self.output_path.clone(),
            documents: collected.documents,
            skipped: collected.skipped,
            excluded: collected.excluded,
            items: collected.items.len(),
        })
    }

    /// Read every document and collect the published items in discovery order.
    pub fn collect(&self) -> Result<Collected, BuildError> {
        let documents = self.source.discover_documents()?;
        let mut collected = Collected {
            documents: documents.len(),
            ..Collected::default()
        };

        for path in &documents {
            let content = std::fs::read_to_string(path).map_err(|e| BuildError::Read {
                path: path.clone(),
                source: e,
            })?;

            let source_path = relative_to(path, &self.working_dir);
            match self.process_document(&content, &source_path) {
                Some(ItemOutcome::Published(item)) => collected.items.push(item),
                Some(ItemOutcome::Excluded { status }) => {
                    debug!(document = %to_posix(&source_path), %status, "Excluded: not published");
                    collected.excluded += 1;
                }
                None => collected.skipped += 1,
            }
        }

        Ok(collected)
    }

    /// Turn one document into an item outcome, or `None` if it has no usable front matter.
    fn process_document(&self, content: &str, source_path: &Path) -> Option<ItemOutcome> {
        let front_matter = match parse_front_matter(content) {
            Ok(Some(fm)) => fm,
            Ok(None) => {
                debug!(document = %to_posix(source_path), "Skipped: no front matter");
                return None;
            }
            Err(e) => {
                warn!(document = %to_posix(source_path), error = %e, "Skipped: invalid front matter");
                return None;
            }
        };

        Some(build_item(&front_matter, source_path, &self.site))
    }
}
