//! Integration tests for the sightings crate
//!
//! These tests drive the complete scan flow through the in-memory mailbox.

use chrono::{Local, TimeZone, Utc};
use sightings::gmail::api::GmailMessage;
use sightings::{
    BackendCall, EmailStatus, InMemoryMailbox, ScanConfig, ScanError, VIN_NOT_FOUND,
    compute_stats, compute_stats_on, extract::is_valid_vin, fetch_notification_emails_with,
    plan_queries, scan_mailbox,
};
use std::collections::HashSet;

const SENDER: &str = "DRN Buy It Now <BuyItNow@digitalrecognition.net>";

/// Helper to create a notification as the sender formats it
fn notification(id: &str, vin: &str, date: &str, table: &str) -> GmailMessage {
    GmailMessage::builder(id)
        .from(SENDER)
        .subject(format!("DRN Buy It Now Hit - VIN: {}", vin))
        .date(date)
        .snippet("Buy It Now Hit")
        .part("text/plain", table)
        .part("text/html", format!("<html><body><table>{}</table></body></html>", table))
        .build()
}

fn html_table(year: &str, make: &str, model: &str, color: &str, plate: &str, state: &str) -> String {
    format!(
        "<tr><td>Vehicle Year</td><td>{}</td></tr>\
         <tr><td>Vehicle Make</td><td>{}</td></tr>\
         <tr><td>Vehicle Model</td><td>{}</td></tr>\
         <tr><td>Vehicle Color</td><td>{}</td></tr>\
         <tr><td>Plate&nbsp;ID</td><td>{}</td></tr>\
         <tr><td>State ID</td><td>{}</td></tr>",
        year, make, model, color, plate, state
    )
}

fn sample_mailbox() -> InMemoryMailbox {
    InMemoryMailbox::new()
        .with_message(
            GmailMessage::builder("older")
                .from(SENDER)
                .subject("DRN Buy It Now Hit - VIN: 2FTRX18W1XCA01234")
                .date("Tue, 1 Jul 2025 11:00:00 +0000")
                .part(
                    "text/html",
                    html_table("1999", "Ford", "Ranger", "Blue", "XYZ789", "ca"),
                )
                .build(),
        )
        .with_message(
            GmailMessage::builder("newer")
                .from(SENDER)
                .subject("DRN Buy It Now Hit - VIN: 1HGCM82633A123456")
                .date("Wed, 2 Jul 2025 08:30:00 +0000 (UTC)")
                .part(
                    "text/html",
                    html_table("2007", "Chevrolet", "Tahoe", "Gray", "ABC123", "TX"),
                )
                .part("image/png", "not really a png")
                .build(),
        )
        .with_message(
            GmailMessage::builder("digest")
                .from(SENDER)
                .subject("DRN weekly digest")
                .body("Nothing to report")
                .build(),
        )
        .with_message(
            GmailMessage::builder("unrelated")
                .from("friend@example.com")
                .subject("DRN Buy It Now Hit - VIN: 1HGCM82633A999999")
                .build(),
        )
}

#[test]
fn test_full_scan() {
    let mailbox = sample_mailbox();
    let report = scan_mailbox(&mailbox, &ScanConfig::default()).unwrap();

    let ids: Vec<&str> = report.emails.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["newer", "older"]);

    let newer = &report.emails[0];
    assert_eq!(newer.vin, "1HGCM82633A123456");
    assert_eq!(newer.vehicle, "2007 Chevrolet Tahoe Gray");
    assert_eq!(newer.plate, "ABC123");
    assert_eq!(newer.state, "TX");
    assert_eq!(newer.status, EmailStatus::New);
    assert_eq!(newer.sender, SENDER);
    assert_eq!(
        newer.received_at,
        Utc.with_ymd_and_hms(2025, 7, 2, 8, 30, 0).unwrap()
    );
    assert!(newer.raw_content.contains("Chevrolet"));
    assert!(!newer.raw_content.contains("not really a png"));

    let older = &report.emails[1];
    assert_eq!(older.vehicle, "1999 Ford Ranger Blue");
    assert_eq!(older.state, "CA");

    // Broad query found mail, so nothing narrower was issued
    assert_eq!(report.stats.queries_tried, 1);
    assert_eq!(report.stats.candidates_found, 3);
    assert_eq!(report.stats.messages_fetched, 3);
    assert_eq!(report.stats.messages_skipped, 1);
    assert_eq!(report.stats.errors, 0);
}

#[test]
fn test_plain_text_table() {
    let mailbox = InMemoryMailbox::new().with_message(notification(
        "m1",
        "1HGCM82633A123456",
        "Wed, 2 Jul 2025 08:30:00 +0000",
        "Vehicle Year 2007 Vehicle Make Chevrolet Vehicle Model Tahoe Vehicle Color Gray \
         Plate ID ABC123 State ID TX",
    ));

    let emails = fetch_notification_emails_with(&mailbox, &ScanConfig::default()).unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].vehicle, "2007 Chevrolet Tahoe Gray");
    assert_eq!(emails[0].plate, "ABC123");
    assert_eq!(emails[0].state, "TX");
}

#[test]
fn test_overlapping_queries_never_duplicate_records() {
    let queries = plan_queries(&ScanConfig::default());
    let table = html_table("2010", "Toyota", "Camry", "White", "JKL456", "NV");
    let mailbox = InMemoryMailbox::new()
        .with_messages([
            notification("1", "1HGCM82633A000001", "Wed, 2 Jul 2025 08:00:00 +0000", &table),
            notification("2", "1HGCM82633A000002", "Wed, 2 Jul 2025 09:00:00 +0000", &table),
            notification("3", "1HGCM82633A000003", "Wed, 2 Jul 2025 10:00:00 +0000", &table),
        ])
        .with_query_results(queries[0].text.clone(), Vec::<String>::new())
        .with_query_results(queries[1].text.clone(), ["1", "2"])
        .with_query_results(queries[2].text.clone(), ["2", "3"])
        .with_query_results(queries[3].text.clone(), ["3", "1"]);

    let report = scan_mailbox(&mailbox, &ScanConfig::default()).unwrap();
    let ids: HashSet<&str> = report.emails.iter().map(|e| e.id.as_str()).collect();

    assert_eq!(report.emails.len(), 3);
    assert_eq!(ids, HashSet::from(["1", "2", "3"]));
    assert_eq!(report.stats.queries_tried, 4);
    assert_eq!(mailbox.fetch_count(), 3);
}

#[test]
fn test_output_is_sorted_newest_first() {
    let table = html_table("2010", "Toyota", "Camry", "White", "JKL456", "NV");
    let mailbox = InMemoryMailbox::new().with_messages([
        notification("a", "1HGCM82633A000001", "Mon, 30 Jun 2025 08:00:00 +0000", &table),
        notification("b", "1HGCM82633A000002", "Wed, 2 Jul 2025 09:00:00 +0000", &table),
        notification("c", "1HGCM82633A000003", "Tue, 1 Jul 2025 10:00:00 +0000", &table),
        notification("d", "1HGCM82633A000004", "not a date", &table),
    ]);

    let emails = fetch_notification_emails_with(&mailbox, &ScanConfig::default()).unwrap();
    assert!(emails.windows(2).all(|w| w[0].received_at >= w[1].received_at));

    // Unparsable date falls back to processing time, which is the newest
    assert_eq!(emails[0].id.as_str(), "d");
}

#[test]
fn test_failed_query_and_fetch_degrade_gracefully() {
    let queries = plan_queries(&ScanConfig::default());
    let table = html_table("2010", "Toyota", "Camry", "White", "JKL456", "NV");
    let mailbox = InMemoryMailbox::new()
        .with_messages([
            notification("1", "1HGCM82633A000001", "Wed, 2 Jul 2025 08:00:00 +0000", &table),
            notification("2", "1HGCM82633A000002", "Wed, 2 Jul 2025 09:00:00 +0000", &table),
        ])
        .fail_query(queries[0].text.clone())
        .fail_fetch("2");

    let report = scan_mailbox(&mailbox, &ScanConfig::default()).unwrap();
    let ids: Vec<&str> = report.emails.iter().map(|e| e.id.as_str()).collect();

    assert_eq!(ids, vec!["1"]);
    // One failed query plus one failed fetch; the narrower queries still ran
    assert_eq!(report.stats.errors, 2);
    assert_eq!(report.stats.queries_tried, 4);
}

#[test]
fn test_every_query_failing_yields_empty_result() {
    let mut mailbox = InMemoryMailbox::new();
    for query in plan_queries(&ScanConfig::default()) {
        mailbox = mailbox.fail_query(query.text);
    }

    let emails = fetch_notification_emails_with(&mailbox, &ScanConfig::default()).unwrap();
    assert!(emails.is_empty());
}

#[test]
fn test_auth_expiry_is_surfaced() {
    let mailbox = sample_mailbox().expire_auth();
    let result = fetch_notification_emails_with(&mailbox, &ScanConfig::default());
    assert!(matches!(result, Err(ScanError::AuthExpired)));
}

#[test]
fn test_fetch_limit_and_page_size_are_applied() {
    let table = html_table("2010", "Toyota", "Camry", "White", "JKL456", "NV");
    let mailbox = InMemoryMailbox::new().with_messages((0..30).map(|i| {
        notification(
            &format!("m{:02}", i),
            "1HGCM82633A000001",
            "Wed, 2 Jul 2025 08:00:00 +0000",
            &table,
        )
    }));
    let config = ScanConfig {
        page_size: 25,
        max_messages: 100,
        ..Default::default()
    };

    let report = scan_mailbox(&mailbox, &config).unwrap();
    assert_eq!(report.stats.candidates_found, 25);
    assert_eq!(report.emails.len(), 20);
    assert!(matches!(
        &mailbox.calls()[0],
        BackendCall::List { max_results: 25, .. }
    ));

    // Equal timestamps keep fetch order
    let ids: Vec<&str> = report.emails.iter().map(|e| e.id.as_str()).collect();
    let expected: Vec<String> = (0..20).map(|i| format!("m{:02}", i)).collect();
    assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
}

#[test]
fn test_missing_fields_use_sentinels() {
    let mailbox = InMemoryMailbox::new().with_message(
        GmailMessage::builder("bare")
            .from(SENDER)
            .subject("DRN Buy It Now Hit - VIN pending")
            .build(),
    );

    let emails = fetch_notification_emails_with(&mailbox, &ScanConfig::default()).unwrap();
    assert_eq!(emails.len(), 1);
    assert_eq!(emails[0].vin, VIN_NOT_FOUND);
    assert_eq!(emails[0].vehicle, "Unknown");
    assert_eq!(emails[0].plate, "");
    assert_eq!(emails[0].state, "");
    assert_eq!(emails[0].snippet, "No preview");
}

#[test]
fn test_extracted_vins_are_well_formed() {
    let report = scan_mailbox(&sample_mailbox(), &ScanConfig::default()).unwrap();
    for email in report.emails.iter().filter(|e| e.has_vin()) {
        assert!(is_valid_vin(&email.vin), "bad VIN {}", email.vin);
    }
}

#[test]
fn test_stats_over_scan_results() {
    let today = Local::now().format("%a, %-d %b %Y %H:%M:%S %z").to_string();
    let table = html_table("2010", "Toyota", "Camry", "White", "JKL456", "NV");
    let mailbox = InMemoryMailbox::new().with_messages([
        notification("today", "1HGCM82633A000001", &today, &table),
        notification("old", "1HGCM82633A000002", "Tue, 1 Jul 2025 08:00:00 +0000", &table),
    ]);

    let mut emails = fetch_notification_emails_with(&mailbox, &ScanConfig::default()).unwrap();
    let stats = compute_stats(&emails);
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.new_count, 2);
    assert_eq!(stats.today_count, 1);

    // Status changes are the caller's business; stats follow them
    emails[0].status = EmailStatus::Processed;
    let stats = compute_stats_on(&emails, Local::now().date_naive());
    assert_eq!(stats.new_count, 1);
    assert_eq!(stats.total_count, 2);
}
