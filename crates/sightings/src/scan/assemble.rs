//! Record assembly and ordering

use chrono::{DateTime, Local, Utc};

use crate::gmail::api::GmailMessage;
use crate::models::{EmailRecord, EmailStatus, MessageId, VIN_NOT_FOUND, VehicleInfo};

const NO_SUBJECT: &str = "No Subject";
const UNKNOWN_SENDER: &str = "Unknown Sender";
const NO_PREVIEW: &str = "No preview";

/// Header fields of a fetched message, with placeholders filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub id: MessageId,
    pub subject: String,
    pub sender: String,
    /// Raw `Date` header, if present
    pub date: Option<String>,
    pub snippet: String,
}

impl Envelope {
    pub fn from_message(message: &GmailMessage) -> Self {
        Self {
            id: MessageId::new(&message.id),
            subject: message
                .header("Subject")
                .unwrap_or_else(|| NO_SUBJECT.to_string()),
            sender: message
                .header("From")
                .unwrap_or_else(|| UNKNOWN_SENDER.to_string()),
            date: message.header("Date"),
            snippet: message
                .snippet
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NO_PREVIEW.to_string()),
        }
    }
}

/// Parse a `Date` header value
///
/// Accepts RFC 2822 (optionally followed by a `(UTC)` style comment) and
/// RFC 3339.
pub fn parse_date_header(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    let value = match value.rfind('(') {
        Some(start) if value.ends_with(')') => value[..start].trim_end(),
        _ => value,
    };

    DateTime::parse_from_rfc2822(value)
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Build the record for a qualifying message
///
/// `now` stands in for the receipt time when the `Date` header is missing
/// or unparsable.
pub fn build_record(
    envelope: Envelope,
    info: VehicleInfo,
    content: String,
    now: DateTime<Utc>,
) -> EmailRecord {
    let received_at = envelope
        .date
        .as_deref()
        .and_then(parse_date_header)
        .unwrap_or(now);
    let local = received_at.with_timezone(&Local);

    EmailRecord {
        id: envelope.id,
        subject: envelope.subject,
        sender: envelope.sender,
        received_at,
        date_display: local.format("%-m/%-d/%Y").to_string(),
        time_display: local.format("%-I:%M:%S %p").to_string(),
        snippet: envelope.snippet,
        vin: info.vin.unwrap_or_else(|| VIN_NOT_FOUND.to_string()),
        vehicle: info.vehicle,
        plate: info.plate,
        state: info.state,
        status: EmailStatus::New,
        raw_content: content,
    }
}

/// Sort newest first; equal timestamps keep their fetch order
pub fn sort_newest_first(records: &mut [EmailRecord]) {
    records.sort_by(|a, b| b.received_at.cmp(&a.received_at));
}
