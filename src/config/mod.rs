//! Site configuration for mdfeed.
//!
//! The site configuration is the book-level YAML file (`_config.yml` by
//! default). Only the published base URL is read from it, at
//! `sphinx.config.html_baseurl`.

mod load;

use std::path::PathBuf;

/// Dotted path of the base URL inside the site configuration file.
pub const BASE_URL_KEY: &str = "sphinx.config.html_baseurl";

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to encode config file path as a unicode string: {0}")]
    EncodePath(PathBuf),

    #[error("failed to load config: {0}")]
    Load(#[from] config::ConfigError),

    #[error(
        "html_baseurl is empty in {} (sphinx.config.html_baseurl). Set it to the URL the site is published at.",
        .path.display()
    )]
    MissingBaseUrl { path: PathBuf },
}

// =============================================================================
// Site config
// =============================================================================

/// Resolved site settings, threaded explicitly through the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Base URL without a trailing slash (e.g., "https://example.github.io/book")
    pub base_url: String,
}

impl SiteConfig {
    /// Create a site config, stripping any trailing slashes from the base URL.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_config_strips_trailing_slashes() {
        assert_eq!(
            SiteConfig::new("https://example.com/").base_url,
            "https://example.com"
        );
        assert_eq!(
            SiteConfig::new("https://example.com/book//").base_url,
            "https://example.com/book"
        );
        assert_eq!(
            SiteConfig::new("https://example.com").base_url,
            "https://example.com"
        );
    }

    #[test]
    fn test_missing_base_url_message_names_the_key() {
        let err = ConfigError::MissingBaseUrl {
            path: PathBuf::from("_config.yml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("_config.yml"));
        assert!(msg.contains("sphinx.config.html_baseurl"));
    }
}
