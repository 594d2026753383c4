//! In-memory mailbox implementation
//!
//! Serves canned messages to the pipeline for offline runs and tests.
//! Queries are evaluated with a small subset of Gmail search syntax:
//! `from:` terms, bare words and double-quoted phrases, all
//! case-insensitive and ANDed together.

use anyhow::{Result, anyhow};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::MailBackend;
use crate::gmail::api::{GmailMessage, MessageRef};
use crate::gmail::{AuthExpiredError, decode_content};
use crate::models::MessageId;

/// A backend call recorded by [`InMemoryMailbox`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List { query: String, max_results: usize },
    Get(MessageId),
}

/// In-memory implementation of [`MailBackend`]
///
/// Messages are returned in insertion order. Failures can be injected
/// per query, per message, or for the whole credential.
#[derive(Default)]
pub struct InMemoryMailbox {
    messages: Vec<GmailMessage>,
    /// Explicit result lists that bypass query evaluation
    query_results: HashMap<String, Vec<String>>,
    failing_queries: HashSet<String>,
    failing_fetches: HashSet<String>,
    auth_expired: bool,
    calls: Mutex<Vec<BackendCall>>,
}

impl InMemoryMailbox {
    /// Create a new empty mailbox
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message to the mailbox
    pub fn with_message(mut self, message: GmailMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Add several messages, keeping their order
    pub fn with_messages(mut self, messages: impl IntoIterator<Item = GmailMessage>) -> Self {
        self.messages.extend(messages);
        self
    }

    /// Answer `query` with exactly these IDs instead of evaluating it
    pub fn with_query_results<I, S>(mut self, query: impl Into<String>, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_results
            .insert(query.into(), ids.into_iter().map(Into::into).collect());
        self
    }

    /// Make every search for `query` fail
    pub fn fail_query(mut self, query: impl Into<String>) -> Self {
        self.failing_queries.insert(query.into());
        self
    }

    /// Make every fetch of message `id` fail
    pub fn fail_fetch(mut self, id: impl Into<String>) -> Self {
        self.failing_fetches.insert(id.into());
        self
    }

    /// Reject the credential on every call
    pub fn expire_auth(mut self) -> Self {
        self.auth_expired = true;
        self
    }

    /// Calls made so far, in the order they were received
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Number of messages fetched so far
    pub fn fetch_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, BackendCall::Get(_)))
            .count()
    }

    fn record(&self, call: BackendCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn matches(message: &GmailMessage, terms: &[QueryTerm]) -> bool {
        let header = |name: &str| message.header(name).unwrap_or_default().to_lowercase();
        let from = header("From");
        let text = format!(
            "{}\n{}\n{}",
            header("Subject"),
            message.snippet.as_deref().unwrap_or_default().to_lowercase(),
            message
                .payload
                .as_ref()
                .map(decode_content)
                .unwrap_or_default()
                .to_lowercase()
        );

        terms.iter().all(|term| match term {
            QueryTerm::From(addr) => from.contains(addr),
            QueryTerm::Text(word) => text.contains(word),
        })
    }
}

impl MailBackend for InMemoryMailbox {
    fn list_message_ids(&self, query: &str, max_results: usize) -> Result<Vec<MessageRef>> {
        self.record(BackendCall::List {
            query: query.to_string(),
            max_results,
        });

        if self.auth_expired {
            return Err(AuthExpiredError.into());
        }
        if self.failing_queries.contains(query) {
            return Err(anyhow!("Search failed for query: {}", query));
        }

        let ids: Vec<MessageRef> = match self.query_results.get(query) {
            Some(ids) => ids.iter().map(MessageRef::new).collect(),
            None => {
                let terms = parse_query_terms(query);
                self.messages
                    .iter()
                    .filter(|m| Self::matches(m, &terms))
                    .map(|m| MessageRef::new(&m.id))
                    .collect()
            }
        };

        Ok(ids.into_iter().take(max_results).collect())
    }

    fn get_message(&self, id: &MessageId) -> Result<GmailMessage> {
        self.record(BackendCall::Get(id.clone()));

        if self.auth_expired {
            return Err(AuthExpiredError.into());
        }
        if self.failing_fetches.contains(id.as_str()) {
            return Err(anyhow!("Fetch failed for message {}", id.as_str()));
        }

        self.messages
            .iter()
            .find(|m| m.id == id.as_str())
            .cloned()
            .ok_or_else(|| anyhow!("Message not found: {}", id.as_str()))
    }
}

/// A single lowercased search term
#[derive(Debug, PartialEq, Eq)]
enum QueryTerm {
    From(String),
    Text(String),
}

/// Split a query into terms, keeping double-quoted phrases together
fn parse_query_terms(query: &str) -> Vec<QueryTerm> {
    let mut terms = Vec::new();
    let mut rest = query.trim();

    while !rest.is_empty() {
        let (token, remainder) = if let Some(stripped) = rest.strip_prefix('"') {
            match stripped.find('"') {
                Some(end) => (&stripped[..end], &stripped[end + 1..]),
                None => (stripped, ""),
            }
        } else {
            match rest.find(char::is_whitespace) {
                Some(end) => (&rest[..end], &rest[end..]),
                None => (rest, ""),
            }
        };

        let token = token.trim().to_lowercase();
        if let Some(addr) = token.strip_prefix("from:") {
            terms.push(QueryTerm::From(addr.to_string()));
        } else if !token.is_empty() {
            terms.push(QueryTerm::Text(token));
        }
        rest = remainder.trim_start();
    }

    terms
}
