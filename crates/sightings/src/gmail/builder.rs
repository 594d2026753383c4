//! Builder for Gmail API message values
//!
//! Produces the same shape `format=full` responses have, with bodies
//! base64url-encoded. Used by the in-memory mailbox and tests.

use base64::prelude::*;

use super::api::{GmailMessage, Header, MessageBody, MessagePart, MessagePayload};

/// Builder for creating [`GmailMessage`] instances
pub struct GmailMessageBuilder {
    id: String,
    headers: Vec<Header>,
    snippet: Option<String>,
    body: Option<String>,
    parts: Vec<MessagePart>,
}

impl GmailMessage {
    /// Create a new message builder
    pub fn builder(id: impl Into<String>) -> GmailMessageBuilder {
        GmailMessageBuilder::new(id.into())
    }

    /// Look up a header on the top-level payload
    pub fn header(&self, name: &str) -> Option<String> {
        self.payload
            .as_ref()
            .and_then(|p| super::extract_header(p, name))
    }
}

impl GmailMessageBuilder {
    fn new(id: String) -> Self {
        Self {
            id,
            headers: Vec::new(),
            snippet: None,
            body: None,
            parts: Vec::new(),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn subject(self, subject: impl Into<String>) -> Self {
        self.header("Subject", subject)
    }

    pub fn from(self, from: impl Into<String>) -> Self {
        self.header("From", from)
    }

    pub fn date(self, date: impl Into<String>) -> Self {
        self.header("Date", date)
    }

    pub fn snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Single inline body
    pub fn body(mut self, text: impl AsRef<str>) -> Self {
        self.body = Some(BASE64_URL_SAFE_NO_PAD.encode(text.as_ref()));
        self
    }

    /// Append a multipart part with the given media type
    pub fn part(mut self, mime_type: impl Into<String>, text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        self.parts.push(MessagePart {
            part_id: Some(self.parts.len().to_string()),
            mime_type: Some(mime_type.into()),
            body: Some(MessageBody {
                size: u32::try_from(text.len()).ok(),
                data: Some(BASE64_URL_SAFE_NO_PAD.encode(text)),
            }),
            ..Default::default()
        });
        self
    }

    pub fn build(self) -> GmailMessage {
        let (mime_type, parts) = if self.parts.is_empty() {
            ("text/plain", None)
        } else {
            ("multipart/alternative", Some(self.parts))
        };

        GmailMessage {
            thread_id: Some(self.id.clone()),
            id: self.id,
            snippet: self.snippet,
            internal_date: None,
            payload: Some(MessagePayload {
                headers: Some(self.headers),
                body: Some(MessageBody {
                    size: None,
                    data: self.body,
                }),
                parts,
                mime_type: Some(mime_type.to_string()),
            }),
        }
    }
}
