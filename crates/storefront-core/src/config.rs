// crates/storefront-core/src/config.rs

//! # Configuration
//!
//! [`StoreConfig`] carries the handful of knobs the storefront needs. It can
//! be deserialized from a JSON file (every field optional) and then
//! overridden by the caller, which is what the CLI does with its flags.

use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.bapi2.ebartex.pl";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
/// Queries whose trimmed length is at or below this never hit the network.
pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SKELETON_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Scheme and host of the catalog API, without the `/tw/index` path.
    pub base_url: String,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub request_timeout_secs: u64,
    /// Placeholder rows shown while a search is pending.
    pub skeleton_rows: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            min_query_chars: DEFAULT_MIN_QUERY_CHARS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            skeleton_rows: DEFAULT_SKELETON_ROWS,
        }
    }
}

impl StoreConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: StoreConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(StoreError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(StoreError::Config(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: self.debounce(),
            min_query_chars: self.min_query_chars,
            skeleton_rows: self.skeleton_rows,
        }
    }
}

/// The subset of [`StoreConfig`] the search controller cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub min_query_chars: usize,
    pub skeleton_rows: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        StoreConfig::default().search_settings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_storefront() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.base_url, "https://www.bapi2.ebartex.pl");
        assert_eq!(cfg.debounce(), Duration::from_millis(500));
        assert_eq!(cfg.min_query_chars, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = StoreConfig::from_json_str(r#"{"debounce_ms": 250}"#).unwrap();
        assert_eq!(cfg.debounce_ms, 250);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.skeleton_rows, DEFAULT_SKELETON_ROWS);
    }

    #[test]
    fn rejects_non_http_base() {
        let err = StoreConfig::from_json_str(r#"{"base_url": "ftp://x"}"#).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = StoreConfig::from_json_str(r#"{"request_timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = StoreConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }
}
