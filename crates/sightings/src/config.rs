//! Scan configuration
//!
//! Supports loading settings from (in order of priority):
//! 1. JSON file in the vinwatch config directory (`vinwatch.json`)
//! 2. Built-in defaults for the DRN "Buy It Now" notifications
//!
//! Every field is optional in the file; missing fields take their default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config filename in the vinwatch config directory
const CONFIG_FILE: &str = "vinwatch.json";

/// Upper bound on IDs requested per search query
pub const MAX_PAGE_SIZE: usize = 50;

/// Upper bound on messages fetched per scan
pub const MAX_MESSAGES: usize = 20;

/// Upper bound on concurrent message fetches
pub const MAX_FETCH_CONCURRENCY: usize = 10;

/// Settings for one mailbox scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Address the notifications are sent from
    pub sender: String,
    /// Keyword identifying the sender's domain in subjects
    pub domain_keyword: String,
    /// Fixed phrase every notification subject carries
    pub notification_phrase: String,
    /// Field keyword a notification subject must mention
    pub vin_keyword: String,
    /// IDs requested per query, capped at [`MAX_PAGE_SIZE`]
    pub page_size: usize,
    /// Messages fetched per scan, capped at [`MAX_MESSAGES`]
    pub max_messages: usize,
    /// Concurrent fetches, between 1 and [`MAX_FETCH_CONCURRENCY`]
    pub fetch_concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            sender: "BuyItNow@digitalrecognition.net".to_string(),
            domain_keyword: "DRN".to_string(),
            notification_phrase: "Buy It Now Hit".to_string(),
            vin_keyword: "VIN".to_string(),
            page_size: MAX_PAGE_SIZE,
            max_messages: MAX_MESSAGES,
            fetch_concurrency: 5,
        }
    }
}

impl ScanConfig {
    /// Load from `~/.config/vinwatch/vinwatch.json`, or defaults if absent
    pub fn load() -> Result<Self> {
        config::load_json_or_default(CONFIG_FILE)
    }

    /// Load from a specific JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scan config JSON")
    }

    /// Effective page size per search query
    pub fn page_limit(&self) -> usize {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }

    /// Effective number of messages fetched per scan
    pub fn message_limit(&self) -> usize {
        self.max_messages.min(MAX_MESSAGES)
    }

    /// Effective number of concurrent fetch workers
    pub fn worker_count(&self) -> usize {
        self.fetch_concurrency.clamp(1, MAX_FETCH_CONCURRENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = ScanConfig::from_json(r#"{ "max_messages": 5 }"#).unwrap();
        assert_eq!(cfg.max_messages, 5);
        assert_eq!(cfg.sender, "BuyItNow@digitalrecognition.net");
        assert_eq!(cfg.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_limits_are_clamped() {
        let cfg = ScanConfig {
            page_size: 500,
            max_messages: 100,
            fetch_concurrency: 0,
            ..Default::default()
        };
        assert_eq!(cfg.page_limit(), MAX_PAGE_SIZE);
        assert_eq!(cfg.message_limit(), MAX_MESSAGES);
        assert_eq!(cfg.worker_count(), 1);

        let cfg = ScanConfig {
            fetch_concurrency: 64,
            ..Default::default()
        };
        assert_eq!(cfg.worker_count(), MAX_FETCH_CONCURRENCY);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "sender": "alerts@example.com" }}"#).unwrap();

        let cfg = ScanConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.sender, "alerts@example.com");
        assert_eq!(cfg.domain_keyword, "DRN");
    }

    #[test]
    fn test_invalid_json() {
        assert!(ScanConfig::from_json(r#"{ "page_size": "many" }"#).is_err());
    }
}
