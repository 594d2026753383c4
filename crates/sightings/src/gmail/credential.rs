//! Mail-access credential
//!
//! The credential is acquired, refreshed and persisted by the surrounding
//! application. This crate only reads it to authorize API requests.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// OAuth token set in the shape Google's client libraries store it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailCredential {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expiry as milliseconds since the Unix epoch
    #[serde(default)]
    pub expiry_date: Option<i64>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl MailCredential {
    /// Create a bearer credential with only an access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: default_token_type(),
            expiry_date: None,
        }
    }

    /// Parse a credential from a JSON token document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse credential JSON")
    }

    /// Load a credential from a JSON token file
    pub fn from_file(path: &Path) -> Result<Self> {
        config::load_json_file(path)
    }

    /// Value for the HTTP `Authorization` header
    pub fn authorization_header(&self) -> String {
        let token_type = if self.token_type.is_empty() {
            "Bearer"
        } else {
            self.token_type.as_str()
        };
        format!("{} {}", token_type, self.access_token)
    }

    /// Whether the access token has passed its declared expiry.
    ///
    /// A credential without an expiry is never considered expired here;
    /// the backend still gets the final say.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date
            .is_some_and(|expiry| expiry <= now.timestamp_millis())
    }
}
