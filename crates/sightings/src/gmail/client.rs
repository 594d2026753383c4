//! Gmail API HTTP client
//!
//! Provides the search and fetch calls the scan pipeline needs.
//! Uses synchronous HTTP (ureq) to be executor-agnostic.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::MailCredential;
use super::api::{GmailMessage, ListMessagesResponse, MessageRef};
use crate::backend::MailBackend;
use crate::models::MessageId;

/// Error indicating the backend rejected the credential
///
/// This is the only failure that aborts a scan; the caller is expected
/// to re-authorize and try again.
#[derive(Debug, thiserror::Error)]
#[error("Gmail authentication expired. Please reconnect.")]
pub struct AuthExpiredError;

/// Check whether an error (or anything it wraps) is an [`AuthExpiredError`]
pub fn is_auth_expired(err: &anyhow::Error) -> bool {
    err.is::<AuthExpiredError>()
}

/// Gmail API client bound to a single credential
pub struct GmailClient {
    credential: MailCredential,
}

impl GmailClient {
    /// Gmail API base URL
    const BASE_URL: &'static str = "https://gmail.googleapis.com/gmail/v1";

    /// Gmail's own upper bound on `maxResults`
    const MAX_RESULTS_LIMIT: usize = 500;

    /// Create a new Gmail client
    pub fn new(credential: MailCredential) -> Self {
        Self { credential }
    }

    /// Search message IDs matching a Gmail query string
    ///
    /// # Arguments
    /// * `query` - Gmail search syntax, e.g. `from:someone@example.com VIN`
    /// * `max_results` - Maximum number of IDs to return (single page)
    pub fn search_messages(&self, query: &str, max_results: usize) -> Result<ListMessagesResponse> {
        let url = format!(
            "{}/users/me/messages?maxResults={}&q={}",
            Self::BASE_URL,
            max_results.clamp(1, Self::MAX_RESULTS_LIMIT),
            urlencoding::encode(query)
        );

        self.get_json(&url, "list messages")
    }

    /// Get full message details by ID
    pub fn get_full_message(&self, id: &MessageId) -> Result<GmailMessage> {
        let url = format!(
            "{}/users/me/messages/{}?format=full",
            Self::BASE_URL,
            urlencoding::encode(id.as_str())
        );

        self.get_json(&url, "get message")
    }

    /// Issue an authorized GET and parse the JSON response
    ///
    /// 401 responses and `invalid_token` errors become [`AuthExpiredError`].
    fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = ureq::get(url)
            .header("Authorization", &self.credential.authorization_header())
            .call();

        match response {
            Ok(mut resp) => resp
                .body_mut()
                .read_json()
                .with_context(|| format!("Failed to parse {} response", what)),
            Err(ureq::Error::StatusCode(401)) => Err(AuthExpiredError.into()),
            Err(e) if e.to_string().contains("invalid_token") => Err(AuthExpiredError.into()),
            Err(e) => Err(anyhow::anyhow!("Failed to send {} request: {}", what, e)),
        }
    }
}

impl MailBackend for GmailClient {
    fn list_message_ids(&self, query: &str, max_results: usize) -> Result<Vec<MessageRef>> {
        let list = self.search_messages(query, max_results)?;
        Ok(list.messages.unwrap_or_default())
    }

    fn get_message(&self, id: &MessageId) -> Result<GmailMessage> {
        self.get_full_message(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_expired_detected_through_context() {
        let err: anyhow::Error = AuthExpiredError.into();
        let wrapped = err.context("while listing messages");
        assert!(is_auth_expired(&wrapped));
    }

    #[test]
    fn test_other_errors_are_not_auth_expired() {
        let err = anyhow::anyhow!("connection reset");
        assert!(!is_auth_expired(&err));
    }

    #[test]
    fn test_list_response_without_messages() {
        let list: ListMessagesResponse =
            serde_json::from_str(r#"{"resultSizeEstimate": 0}"#).unwrap();
        assert!(list.messages.is_none());
        assert_eq!(list.result_size_estimate, Some(0));
    }

    #[test]
    fn test_full_message_deserializes() {
        let json = r#"{
            "id": "18f0a",
            "threadId": "18f0a",
            "snippet": "Vehicle Year 2007",
            "internalDate": "1751445000000",
            "payload": {
                "mimeType": "text/html",
                "headers": [{"name": "Subject", "value": "DRN Buy It Now Hit"}],
                "body": {"size": 5, "data": "aGVsbG8"}
            }
        }"#;

        let msg: GmailMessage = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, "18f0a");
        assert_eq!(msg.snippet.as_deref(), Some("Vehicle Year 2007"));
        let payload = msg.payload.unwrap();
        assert_eq!(payload.mime_type.as_deref(), Some("text/html"));
        assert_eq!(payload.body.unwrap().data.as_deref(), Some("aGVsbG8"));
    }
}
