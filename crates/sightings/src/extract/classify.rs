//! Subject-line gate for genuine notifications

use crate::config::ScanConfig;

/// Decides from the subject alone whether a message is a notification
///
/// All three keywords must appear, case-insensitively. Messages that fail
/// are dropped before any body decoding or extraction.
#[derive(Debug, Clone)]
pub struct SubjectClassifier {
    required: [String; 3],
}

impl SubjectClassifier {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            required: [
                config.domain_keyword.to_lowercase(),
                config.notification_phrase.to_lowercase(),
                config.vin_keyword.to_lowercase(),
            ],
        }
    }

    pub fn is_notification(&self, subject: &str) -> bool {
        let subject = subject.to_lowercase();
        self.required.iter().all(|keyword| subject.contains(keyword))
    }
}

impl Default for SubjectClassifier {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}
