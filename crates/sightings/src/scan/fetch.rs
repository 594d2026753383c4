//! Bounded, order-preserving message fetching

use anyhow::Result;
use log::warn;
use rayon::prelude::*;

use crate::backend::MailBackend;
use crate::gmail::api::GmailMessage;
use crate::gmail::{AuthExpiredError, is_auth_expired};
use crate::models::MessageId;

/// Messages fetched for one scan
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Successfully fetched messages, in candidate order
    pub messages: Vec<GmailMessage>,
    /// Number of fetches that failed and were dropped
    pub errors: usize,
}

/// Fetch up to `limit` candidates with at most `workers` requests in flight
///
/// Each ID is fetched once. Failures are logged and dropped without
/// affecting siblings. If any fetch reports an expired credential the
/// whole call fails once every in-flight fetch has finished.
pub fn fetch_messages(
    backend: &dyn MailBackend,
    candidates: &[MessageId],
    limit: usize,
    workers: usize,
) -> Result<FetchOutcome> {
    let ids = &candidates[..candidates.len().min(limit)];

    let results: Vec<Result<GmailMessage>> =
        match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
            Ok(pool) => pool.install(|| ids.par_iter().map(|id| backend.get_message(id)).collect()),
            Err(e) => {
                warn!("Could not start fetch pool, fetching sequentially: {}", e);
                ids.iter().map(|id| backend.get_message(id)).collect()
            }
        };

    let mut outcome = FetchOutcome::default();
    let mut auth_expired = false;

    for (id, result) in ids.iter().zip(results) {
        match result {
            Ok(message) => outcome.messages.push(message),
            Err(e) if is_auth_expired(&e) => auth_expired = true,
            Err(e) => {
                warn!("Error fetching message {}: {:#}", id.as_str(), e);
                outcome.errors += 1;
            }
        }
    }

    if auth_expired {
        return Err(AuthExpiredError.into());
    }
    Ok(outcome)
}
