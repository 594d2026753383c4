//! Sightings crate - Vehicle-sighting notification ingestion
//!
//! This crate turns automated "Buy It Now Hit" notification emails into
//! structured vehicle records:
//! - Gmail API client driven by an externally supplied credential
//! - Mail backend trait with an in-memory implementation
//! - Query planning and deduplicating search
//! - Bounded concurrent message fetching and payload decoding
//! - Subject classification and layered VIN/vehicle extraction
//! - Record assembly, ordering and summary statistics
//!
//! Every scan is stateless: nothing is persisted between calls.

pub mod backend;
pub mod config;
pub mod extract;
pub mod gmail;
pub mod models;
pub mod query;
pub mod scan;
pub mod search;

pub use backend::{BackendCall, InMemoryMailbox, MailBackend};
pub use config::ScanConfig;
pub use extract::{SubjectClassifier, extract_vehicle_info};
pub use gmail::{AuthExpiredError, GmailClient, MailCredential};
pub use models::{EmailRecord, EmailStatus, MessageId, Stats, UNKNOWN_VEHICLE, VIN_NOT_FOUND, VehicleInfo};
pub use query::{compute_stats, compute_stats_on};
pub use scan::{
    ScanError, ScanReport, ScanStats, fetch_notification_emails, fetch_notification_emails_with,
    scan_mailbox,
};
pub use search::{SearchQuery, plan_queries};
