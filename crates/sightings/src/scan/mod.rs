//! Notification scan pipeline
//!
//! search → fetch → classify → decode → extract → assemble. Each call is
//! independent: nothing is cached or persisted between scans.

mod assemble;
mod fetch;

pub use assemble::{Envelope, build_record, parse_date_header, sort_newest_first};
pub use fetch::{FetchOutcome, fetch_messages};

use chrono::Utc;
use log::{info, warn};

use crate::backend::MailBackend;
use crate::config::ScanConfig;
use crate::extract::{SubjectClassifier, extract_vehicle_info};
use crate::gmail::{GmailClient, MailCredential, decode_content, is_auth_expired};
use crate::models::EmailRecord;
use crate::search::{collect_candidates, plan_queries};

/// Errors that abort a scan
///
/// Failed queries and failed fetches never appear here; they only shrink
/// the result set.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The backend rejected the credential; re-authorize and retry
    #[error("Gmail authentication expired. Please reconnect.")]
    AuthExpired,
    /// Any other failure surfaced by a pipeline stage
    #[error("Failed to fetch notification emails: {0:#}")]
    Backend(anyhow::Error),
}

impl From<anyhow::Error> for ScanError {
    fn from(err: anyhow::Error) -> Self {
        if is_auth_expired(&err) {
            Self::AuthExpired
        } else {
            Self::Backend(err)
        }
    }
}

/// Statistics from a scan operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    /// Number of search queries issued
    pub queries_tried: usize,
    /// Unique candidate IDs returned by search
    pub candidates_found: usize,
    /// Number of messages fetched successfully
    pub messages_fetched: usize,
    /// Number of fetched messages rejected by the subject check
    pub messages_skipped: usize,
    /// Number of failed queries and fetches
    pub errors: usize,
    /// Duration of the scan
    pub duration_ms: u64,
}

/// Records produced by a scan plus how the scan went
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    /// Qualifying notifications, newest first
    pub emails: Vec<EmailRecord>,
    pub stats: ScanStats,
}

/// Run the full pipeline against a backend
///
/// # Arguments
/// * `backend` - Authenticated mailbox
/// * `config` - Sender, keywords and limits
pub fn scan_mailbox(backend: &dyn MailBackend, config: &ScanConfig) -> Result<ScanReport, ScanError> {
    let start = std::time::Instant::now();
    let now = Utc::now();
    let mut stats = ScanStats::default();

    // 1. Search and merge candidates
    let queries = plan_queries(config);
    let search = collect_candidates(backend, &queries, config.page_limit())?;
    stats.queries_tried = search.queries_tried;
    stats.candidates_found = search.candidates.len();
    stats.errors += search.errors;

    if search.candidates.is_empty() {
        info!("No notification emails found with any search query");
        stats.duration_ms = start.elapsed().as_millis() as u64;
        return Ok(ScanReport {
            emails: Vec::new(),
            stats,
        });
    }

    // 2. Fetch full messages
    let fetched = fetch_messages(
        backend,
        &search.candidates,
        config.message_limit(),
        config.worker_count(),
    )?;
    stats.messages_fetched = fetched.messages.len();
    stats.errors += fetched.errors;

    // 3. Classify, decode and extract
    let classifier = SubjectClassifier::new(config);
    let mut emails = Vec::with_capacity(fetched.messages.len());

    for message in fetched.messages {
        let envelope = Envelope::from_message(&message);
        if !classifier.is_notification(&envelope.subject) {
            warn!(
                "Skipping message {}: subject {:?} is not a notification",
                envelope.id.as_str(),
                envelope.subject
            );
            stats.messages_skipped += 1;
            continue;
        }

        let content = message
            .payload
            .as_ref()
            .map(decode_content)
            .unwrap_or_default();
        let info = extract_vehicle_info(&content, &envelope.subject);
        emails.push(build_record(envelope, info, content, now));
    }

    // 4. Order newest first
    sort_newest_first(&mut emails);

    stats.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Processed {} notification emails ({} skipped, {} errors)",
        emails.len(),
        stats.messages_skipped,
        stats.errors
    );

    Ok(ScanReport { emails, stats })
}

/// Run the pipeline against a backend and return only the records
pub fn fetch_notification_emails_with(
    backend: &dyn MailBackend,
    config: &ScanConfig,
) -> Result<Vec<EmailRecord>, ScanError> {
    scan_mailbox(backend, config).map(|report| report.emails)
}

/// Scan Gmail with the default configuration using the given credential
pub fn fetch_notification_emails(credential: MailCredential) -> Result<Vec<EmailRecord>, ScanError> {
    let client = GmailClient::new(credential);
    fetch_notification_emails_with(&client, &ScanConfig::default())
}
