//! Gmail payload decoding
//!
//! Turns a message payload (single body or multipart tree) into one text
//! string. HTML is left as-is; the extractor cleans it.

use base64::prelude::*;

use super::api::{MessagePart, MessagePayload};

/// Extract a header value by name (case-insensitive)
pub fn extract_header(payload: &MessagePayload, name: &str) -> Option<String> {
    payload.headers.as_ref()?.iter().find_map(|h| {
        if h.name.eq_ignore_ascii_case(name) {
            Some(h.value.clone())
        } else {
            None
        }
    })
}

/// Decode the text content of a message payload
///
/// An inline body wins when present. Otherwise every `text/plain` and
/// `text/html` part is decoded and concatenated in payload order, walking
/// nested multipart containers depth-first. Returns an empty string when
/// nothing decodable exists.
pub fn decode_content(payload: &MessagePayload) -> String {
    if let Some(body) = &payload.body
        && let Some(data) = &body.data
        && !data.is_empty()
        && let Some(text) = decode_base64_body(data)
    {
        return text;
    }

    let mut content = String::new();
    if let Some(parts) = &payload.parts {
        collect_text_parts(parts, &mut content);
    }
    content
}

/// Append decoded text of matching parts to `out`, in order
fn collect_text_parts(parts: &[MessagePart], out: &mut String) {
    for part in parts {
        if is_text_media_type(part.mime_type.as_deref()) {
            if let Some(body) = &part.body
                && let Some(data) = &body.data
                && let Some(text) = decode_base64_body(data)
            {
                out.push_str(&text);
            }
        } else if let Some(nested) = &part.parts {
            collect_text_parts(nested, out);
        }
    }
}

/// `text/plain` or `text/html`, ignoring parameters like charset
fn is_text_media_type(mime_type: Option<&str>) -> bool {
    let Some(mime_type) = mime_type else {
        return false;
    };
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("text/plain") || essence.eq_ignore_ascii_case("text/html")
}

/// Decode base64-encoded body data
///
/// Gmail uses URL-safe base64 but padding can vary, so we try multiple decoders.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
pub fn decode_base64_body(data: &str) -> Option<String> {
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE};

    let decoders: &[&base64::engine::GeneralPurpose] =
        &[&BASE64_URL_SAFE_NO_PAD, &URL_SAFE, &STANDARD, &STANDARD_NO_PAD];

    decoders
        .iter()
        .find_map(|decoder| decoder.decode(data).ok())
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}
