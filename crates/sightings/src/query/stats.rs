//! Summary statistics over email records

use chrono::{Local, NaiveDate};

use crate::models::{EmailRecord, EmailStatus, Stats};

/// Compute stats relative to the current local date
pub fn compute_stats(emails: &[EmailRecord]) -> Stats {
    compute_stats_on(emails, Local::now().date_naive())
}

/// Compute stats relative to a given local calendar date
///
/// A record counts toward `today_count` when its receipt time, converted
/// to local time, falls on `today`.
pub fn compute_stats_on(emails: &[EmailRecord], today: NaiveDate) -> Stats {
    Stats {
        new_count: emails
            .iter()
            .filter(|e| e.status == EmailStatus::New)
            .count(),
        total_count: emails.len(),
        today_count: emails
            .iter()
            .filter(|e| e.received_at.with_timezone(&Local).date_naive() == today)
            .count(),
    }
}
