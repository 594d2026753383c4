//! VIN extraction

use log::debug;

use super::patterns::{BARE_VIN, CONTENT_VIN, Matcher, SUBJECT_VIN};

/// Whether `vin` is 17 uppercase characters from the VIN alphabet
pub fn is_valid_vin(vin: &str) -> bool {
    vin.len() == 17
        && vin
            .bytes()
            .all(|b| b.is_ascii_digit() || (b.is_ascii_uppercase() && !matches!(b, b'I' | b'O' | b'Q')))
}

/// Extract a VIN, preferring the subject line over the body
///
/// Order: `VIN:` in the subject, then labeled VINs in the cleaned body,
/// then any bare uppercase VIN-alphabet run in the body. The result is
/// always uppercase.
pub fn extract_vin(cleaned_content: &str, subject: &str) -> Option<String> {
    if let Some(vin) = capture_vin(&SUBJECT_VIN, subject) {
        debug!("Found VIN in subject: {}", vin);
        return Some(vin);
    }

    CONTENT_VIN
        .iter()
        .chain(std::iter::once(&*BARE_VIN))
        .find_map(|matcher| {
            let vin = capture_vin(matcher, cleaned_content)?;
            debug!("Found VIN in content: {} using pattern {:?}", vin, matcher.name);
            Some(vin)
        })
}

fn capture_vin(matcher: &Matcher, text: &str) -> Option<String> {
    let vin = matcher.capture(text)?.to_ascii_uppercase();
    is_valid_vin(&vin).then_some(vin)
}
