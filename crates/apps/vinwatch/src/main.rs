//! vinwatch - scan a Gmail mailbox for DRN "Buy It Now Hit" notifications
//!
//! Prints the extracted vehicle records and summary counts as JSON.
//!
//! ```bash
//! vinwatch --token ~/.config/vinwatch/gmail-token.json
//! vinwatch --stats-only
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::{error, info, warn};
use serde::Serialize;
use sightings::{
    EmailRecord, GmailClient, MailCredential, ScanConfig, ScanError, Stats, compute_stats,
    scan_mailbox,
};

const TOKEN_FILE: &str = "gmail-token.json";

#[derive(Parser)]
#[command(
    name = "vinwatch",
    about = "Extract vehicle sightings from DRN Buy It Now notification emails",
    version
)]
struct Cli {
    /// Path to a JSON file holding the Gmail access token
    #[arg(long)]
    token: Option<PathBuf>,

    /// Path to a scan configuration file (defaults to vinwatch.json in the config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print only the summary counts
    #[arg(long)]
    stats_only: bool,
}

#[derive(Serialize)]
struct Output<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    emails: Option<&'a [EmailRecord]>,
    stats: Stats,
}

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(ScanError::AuthExpired) = e.downcast_ref::<ScanError>() {
                error!("{} Refresh the token at {}", e, token_path(&cli).display());
            } else {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn token_path(cli: &Cli) -> PathBuf {
    cli.token
        .clone()
        .or_else(|| config::config_path(TOKEN_FILE))
        .unwrap_or_else(|| PathBuf::from(TOKEN_FILE))
}

fn run(cli: &Cli) -> Result<()> {
    let token_path = token_path(cli);
    let credential = MailCredential::from_file(&token_path)
        .with_context(|| format!("Failed to load Gmail token from {}", token_path.display()))?;
    if credential.is_expired(Utc::now()) {
        warn!("Gmail token at {} looks expired; the scan will likely be rejected", token_path.display());
    }

    let scan_config = match &cli.config {
        Some(path) => ScanConfig::from_file(path)?,
        None => ScanConfig::load()?,
    };

    let client = GmailClient::new(credential);
    let report = scan_mailbox(&client, &scan_config)?;
    info!(
        "Scan finished in {}ms: {} queries, {} candidates, {} errors",
        report.stats.duration_ms,
        report.stats.queries_tried,
        report.stats.candidates_found,
        report.stats.errors
    );

    let output = Output {
        emails: (!cli.stats_only).then_some(report.emails.as_slice()),
        stats: compute_stats(&report.emails),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
