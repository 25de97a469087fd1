//! Path and URL conversion utilities.
//!
//! This module handles conversions between:
//! - Document paths as discovered on disk
//! - Source paths (the document path relative to the working directory,
//!   always written with `/` separators)
//! - Published URLs (where the rendered HTML for a document is served)

use std::path::{Component, Path, PathBuf};

/// Render a path with forward-slash separators, regardless of platform.
///
/// `.` components are dropped, so `./content/intro.md` becomes
/// `content/intro.md`.
///
/// # Examples
/// ```ignore
/// to_posix("content/guides/setup.md") => "content/guides/setup.md"
/// to_posix("./content/intro.md") => "content/intro.md"
/// to_posix(r"content\intro.md") => "content/intro.md" // on Windows
/// ```
pub fn to_posix(path: &Path) -> String {
    let mut out = String::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => out.push('/'),
            Component::Prefix(prefix) => out.push_str(&prefix.as_os_str().to_string_lossy()),
            Component::ParentDir => push_segment(&mut out, ".."),
            Component::Normal(segment) => push_segment(&mut out, &segment.to_string_lossy()),
        }
    }

    if out.is_empty() {
        out.push('.');
    }
    out
}

fn push_segment(out: &mut String, segment: &str) {
    if !out.is_empty() && !out.ends_with('/') {
        out.push('/');
    }
    out.push_str(segment);
}

/// Express a document path relative to the working directory.
///
/// Relative paths are already relative to the working directory and are
/// returned unchanged. Absolute paths under `working_dir` have that prefix
/// removed; absolute paths elsewhere are kept as they are.
pub fn relative_to(path: &Path, working_dir: &Path) -> PathBuf {
    if path.is_relative() {
        return path.to_path_buf();
    }
    path.strip_prefix(working_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}

/// The file name without its extension, used as the fallback title and slug.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Convert a markdown source path to its published URL.
///
/// The extension is replaced with `.html` and the result is appended to the
/// base URL, which must not end in `/`.
///
/// # Examples
/// ```ignore
/// source_path_to_url("content/intro.md", "https://example.com") => "https://example.com/content/intro.html"
/// source_path_to_url("content/guides/setup.md", "https://example.com/docs") => "https://example.com/docs/content/guides/setup.html"
/// ```
pub fn source_path_to_url(path: &Path, base_url: &str) -> String {
    let path_str = to_posix(&path.with_extension(""));
    format!("{}/{}.html", base_url, path_str.trim_start_matches('/'))
}
