//! Search execution and result merging

use anyhow::Result;
use log::{info, warn};
use std::collections::HashSet;

use super::SearchQuery;
use crate::backend::MailBackend;
use crate::gmail::is_auth_expired;
use crate::models::MessageId;

/// Merged result of running the query plan
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Unique candidate IDs in first-seen order
    pub candidates: Vec<MessageId>,
    /// Number of queries actually issued
    pub queries_tried: usize,
    /// Number of queries that failed and were skipped
    pub errors: usize,
}

/// Run queries in order and merge their results without duplicates
///
/// If the broadest query returns anything, the remaining queries are not
/// issued. A failing query is logged and skipped. Only an expired
/// credential is returned as an error.
///
/// # Arguments
/// * `backend` - Mailbox to search
/// * `queries` - Planned queries, broadest first
/// * `page_size` - Maximum IDs requested per query
pub fn collect_candidates(
    backend: &dyn MailBackend,
    queries: &[SearchQuery],
    page_size: usize,
) -> Result<SearchOutcome> {
    let mut outcome = SearchOutcome::default();
    let mut seen: HashSet<String> = HashSet::new();

    for query in queries {
        outcome.queries_tried += 1;

        let refs = match backend.list_message_ids(&query.text, page_size) {
            Ok(refs) => refs,
            Err(e) if is_auth_expired(&e) => return Err(e),
            Err(e) => {
                warn!("Search query {:?} failed: {:#}", query.text, e);
                outcome.errors += 1;
                continue;
            }
        };

        info!("Found {} messages with query {:?}", refs.len(), query.text);

        let found_any = !refs.is_empty();
        for msg_ref in refs {
            if seen.insert(msg_ref.id.clone()) {
                outcome.candidates.push(MessageId::new(msg_ref.id));
            }
        }

        // Broad results are taken as a superset of the narrower queries
        if found_any && query.is_broadest() {
            info!(
                "Using results from broad search: {} messages",
                outcome.candidates.len()
            );
            break;
        }
    }

    info!("Total unique messages found: {}", outcome.candidates.len());
    Ok(outcome)
}
