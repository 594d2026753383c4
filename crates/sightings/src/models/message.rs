//! Email record model produced for each qualifying notification

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder reported when no VIN could be extracted
pub const VIN_NOT_FOUND: &str = "VIN not found";

/// Unique identifier for a message (Gmail message ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Handling status of a notification
///
/// Records are always created as `New`; moving one to `Processed` is up
/// to whoever persists them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EmailStatus {
    #[default]
    New,
    Processed,
}

impl EmailStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Processed => "PROCESSED",
        }
    }
}

/// A vehicle-sighting notification, flattened for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRecord {
    /// Gmail message ID
    pub id: MessageId,
    pub subject: String,
    pub sender: String,
    /// Declared send time, or processing time when the header is unusable
    pub received_at: DateTime<Utc>,
    /// Local calendar date, e.g. `7/2/2025`
    pub date_display: String,
    /// Local time of day, e.g. `8:30:00 AM`
    pub time_display: String,
    pub snippet: String,
    /// Extracted VIN or [`VIN_NOT_FOUND`]
    pub vin: String,
    pub vehicle: String,
    pub plate: String,
    pub state: String,
    pub status: EmailStatus,
    /// Decoded message body the fields were extracted from
    pub raw_content: String,
}

impl EmailRecord {
    /// Whether a real VIN was extracted
    pub fn has_vin(&self) -> bool {
        self.vin != VIN_NOT_FOUND
    }
}
