use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::paths::to_posix;

/// Extension of the documents picked up by the scanner.
const MARKDOWN_EXTENSION: &str = "md";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("content path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("content path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("failed to walk content directory {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
}

// =============================================================================
// Content source
// =============================================================================

/// The content directory that documents are discovered in.
#[derive(Debug, Clone)]
pub struct ContentSource {
    root: PathBuf,
}

impl ContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Discover all markdown documents under the content root.
    ///
    /// Walks the directory tree recursively without descending into
    /// symlinked directories. Symlinked markdown files are included.
    /// Paths keep the content root as their prefix and are sorted by their
    /// forward-slash string, so the order does not depend on the filesystem.
    pub fn discover_documents(&self) -> Result<Vec<PathBuf>, SourceError> {
        if !self.root.exists() {
            return Err(SourceError::PathNotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(SourceError::NotADirectory(self.root.clone()));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = entry.map_err(|e| SourceError::Walk {
                path: self.root.clone(),
                source: e,
            })?;

            if !is_markdown(entry.path()) {
                continue;
            }
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                debug!(path = %entry.path().display(), "Skipping non-file markdown entry");
                continue;
            }
            documents.push((to_posix(entry.path()), entry.into_path()));
        }

        documents.sort_by(|(a, _), (b, _)| a.cmp(b));
        debug!(
            root = %self.root.display(),
            count = documents.len(),
            "Discovered markdown documents"
        );

        Ok(documents.into_iter().map(|(_, path)| path).collect())
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == MARKDOWN_EXTENSION)
}
