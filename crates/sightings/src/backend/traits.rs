//! Backend trait definitions

use anyhow::Result;

use crate::gmail::api::{GmailMessage, MessageRef};
use crate::models::MessageId;

/// An already-authenticated mailbox the pipeline can query
///
/// Implementations signal a rejected credential by returning an error
/// that wraps [`AuthExpiredError`](crate::gmail::AuthExpiredError).
pub trait MailBackend: Send + Sync {
    /// List message references matching a search query, at most `max_results`
    fn list_message_ids(&self, query: &str, max_results: usize) -> Result<Vec<MessageRef>>;

    /// Fetch the full header/payload structure of a message
    fn get_message(&self, id: &MessageId) -> Result<GmailMessage>;
}
