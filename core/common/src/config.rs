//! Site configuration.
//!
//! Loaded once at process start and shared read-only afterwards.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Default Microsoft Graph drive endpoint.
pub const DEFAULT_DRIVE_API: &str = "https://graph.microsoft.com/v1.0/me/drive";
/// Prefix Graph puts in front of every `parentReference.path`.
pub const DEFAULT_DRIVE_ROOT: &str = "/drive/root:";
/// Default `Cache-Control` value for resolver responses.
pub const DEFAULT_CACHE_CONTROL: &str = "max-age=0, s-maxage=60, stale-while-revalidate";

/// Process-wide, read-only configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Exposed subtree, e.g. `/Documents`. `/` exposes the whole drive.
    pub base_directory: String,
    /// Upstream path prefix that precedes `base_directory` in item paths.
    pub drive_root: String,
    /// Upstream drive API base, without trailing slash.
    pub drive_api: String,
    /// Public base URL of this site, without trailing slash.
    pub base_url: String,
    /// `Cache-Control` header value attached to resolver responses.
    pub cache_control: String,
    /// Listen address for the HTTP server.
    pub bind: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_directory: "/".to_string(),
            drive_root: DEFAULT_DRIVE_ROOT.to_string(),
            drive_api: DEFAULT_DRIVE_API.to_string(),
            base_url: "http://localhost:3000".to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl SiteConfig {
    /// Create a configuration exposing `base_directory` with defaults elsewhere.
    pub fn with_base_directory(base_directory: impl Into<String>) -> Result<Self> {
        Self {
            base_directory: base_directory.into(),
            ..Self::default()
        }
        .validated()
    }

    /// Validate and normalize.
    ///
    /// # Postconditions
    /// - `base_directory` has no trailing slash; `/` becomes the empty prefix
    /// - `drive_api` and `base_url` have no trailing slash
    ///
    /// # Errors
    /// - `base_directory` is not absolute
    /// - `drive_api` or `base_url` is not an absolute URL
    /// - `cache_control` is not a valid header value
    pub fn validated(mut self) -> Result<Self> {
        if !self.base_directory.starts_with('/') {
            return Err(Error::Config(format!(
                "base_directory must start with '/': {:?}",
                self.base_directory
            )));
        }
        self.base_directory = self.base_directory.trim_end_matches('/').to_string();
        self.drive_api = self.drive_api.trim_end_matches('/').to_string();
        self.base_url = self.base_url.trim_end_matches('/').to_string();

        for (field, value) in [("drive_api", &self.drive_api), ("base_url", &self.base_url)] {
            url::Url::parse(value)
                .map_err(|e| Error::Config(format!("Invalid {}: {}", field, e)))?;
        }

        http::HeaderValue::from_str(&self.cache_control)
            .map_err(|e| Error::Config(format!("Invalid cache_control: {}", e)))?;

        Ok(self)
    }

    /// Upstream path prefix an item's parent path must start with to be exposed.
    pub fn scope_prefix(&self) -> String {
        format!("{}{}", self.drive_root, self.base_directory)
    }

    /// Deserialize configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validated()
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = SiteConfig::default().validated().unwrap();
        assert_eq!(config.base_directory, "");
        assert_eq!(config.scope_prefix(), "/drive/root:");
    }

    #[test]
    fn test_trailing_slashes_trimmed() {
        let config = SiteConfig {
            base_directory: "/Documents/".to_string(),
            drive_api: "https://graph.microsoft.com/v1.0/me/drive/".to_string(),
            base_url: "https://files.example.com/".to_string(),
            ..SiteConfig::default()
        }
        .validated()
        .unwrap();

        assert_eq!(config.base_directory, "/Documents");
        assert_eq!(config.drive_api, "https://graph.microsoft.com/v1.0/me/drive");
        assert_eq!(config.base_url, "https://files.example.com");
        assert_eq!(config.scope_prefix(), "/drive/root:/Documents");
    }

    #[test]
    fn test_relative_base_directory_rejected() {
        assert!(SiteConfig::with_base_directory("Documents").is_err());
    }

    #[test]
    fn test_bad_urls_rejected() {
        let config = SiteConfig {
            base_url: "not a url".to_string(),
            ..SiteConfig::default()
        };
        assert!(matches!(config.validated(), Err(Error::Config(_))));
    }

    #[test]
    fn test_bad_cache_control_rejected() {
        let config = SiteConfig {
            cache_control: "max-age=0\nx".to_string(),
            ..SiteConfig::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_from_json_partial() {
        let config = SiteConfig::from_json(r#"{"base_directory": "/Public", "drive_root": ""}"#)
            .unwrap();
        assert_eq!(config.base_directory, "/Public");
        assert_eq!(config.scope_prefix(), "/Public");
        assert_eq!(config.cache_control, DEFAULT_CACHE_CONTROL);
    }

    #[test]
    fn test_from_file_roundtrip() {
        let config = SiteConfig::with_base_directory("/Shared").unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_json().unwrap().as_bytes()).unwrap();

        let loaded = SiteConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }
}
