//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{GSpotifyError, Result};

/// Default API base URL for a local backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "GSPOTIFY_API_URL";

/// Environment variable overriding the session file location.
pub const SESSION_ENV: &str = "GSPOTIFY_SESSION";

/// Songs per browse page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// API base URL without trailing slash.
    pub api_url: String,
    /// Where the session (token and user) is persisted.
    pub session_path: PathBuf,
    /// Items per page for client-side pagination.
    pub page_size: usize,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: default_session_path(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Create a config for the given API URL with default settings.
    pub fn new<S: Into<String>>(api_url: S) -> Result<Self> {
        Ok(Self {
            api_url: normalize_url(&api_url.into())?,
            ..Default::default()
        })
    }

    /// Build a config from `GSPOTIFY_API_URL` and `GSPOTIFY_SESSION`.
    pub fn from_env() -> Result<Self> {
        let api_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let mut config = Self::new(api_url)?;
        if let Ok(path) = std::env::var(SESSION_ENV) {
            config.session_path = PathBuf::from(path);
        }
        Ok(config)
    }

    /// Set the session file location.
    pub fn with_session_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.session_path = path.into();
        self
    }

    /// Set the pagination size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Validate an API URL and strip trailing slashes.
pub fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(GSpotifyError::InvalidUrl("URL cannot be empty".into()));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(GSpotifyError::InvalidUrl(
            "URL must start with http:// or https://".into(),
        ));
    }
    Ok(url.trim_end_matches('/').to_string())
}

/// `<config dir>/gspotify/session.json`, or the working directory when the
/// platform has no config dir.
pub fn default_session_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gspotify")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation() {
        assert!(Config::new("https://music.example.com").is_ok());
        assert!(Config::new("http://localhost:8000").is_ok());
        assert!(Config::new("").is_err());
        assert!(Config::new("localhost:8000").is_err());
        assert!(Config::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_trailing_slashes_removed() {
        let config = Config::new("http://localhost:8000///").unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.page_size, 20);
        assert!(config.session_path.ends_with("session.json"));
    }

    #[test]
    fn test_page_size_floor() {
        let config = Config::default().with_page_size(0);
        assert_eq!(config.page_size, 1);
    }
}
