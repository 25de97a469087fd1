//! Configuration loading from files.
//!
//! This module handles reading the site configuration and resolving the base URL.

use std::path::Path;

use tracing::debug;

use super::{BASE_URL_KEY, ConfigError, SiteConfig};

impl SiteConfig {
    /// Load the site config from a YAML file.
    ///
    /// Fails if the file cannot be read or parsed, or if the base URL is
    /// missing, null, not a scalar, or empty.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let path_str = path
            .as_os_str()
            .to_str()
            .ok_or_else(|| ConfigError::EncodePath(path.to_path_buf()))?;

        let settings = config::Config::builder()
            .add_source(config::File::new(path_str, config::FileFormat::Yaml))
            .build()?;

        let base_url = settings
            .get_string(BASE_URL_KEY)
            .ok()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| ConfigError::MissingBaseUrl {
                path: path.to_path_buf(),
            })?;

        let site = Self::new(base_url);
        debug!(base_url = %site.base_url, config = %path.display(), "Resolved base URL");
        Ok(site)
    }
}
