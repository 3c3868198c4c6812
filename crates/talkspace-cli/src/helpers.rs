//! Shared CLI helpers — session bootstrap, passwords, error printing.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use talkspace_api::{ApiError, HttpApi};
use talkspace_core::config::{load_config, Config};
use talkspace_core::Client;

/// Env var read when a password flag is omitted.
pub const PASSWORD_ENV: &str = "TALKSPACE_PASSWORD";

/// Loaded config plus a restored client. Built once per invocation.
pub struct App {
    pub config: Config,
    pub client: Client,
}

impl App {
    /// Load config, open the session file, and run the one-time restore.
    pub fn bootstrap(config_path: Option<&Path>) -> Self {
        let config = load_config(config_path);
        let mut client = Client::with_file_storage(&config);
        client.session_mut().restore();
        App { config, client }
    }

    pub fn api(&self) -> Result<HttpApi> {
        HttpApi::new(&self.config.api).context("failed to build HTTP client")
    }
}

/// Password from the flag, else from `$TALKSPACE_PASSWORD`.
pub fn password_or_env(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var(PASSWORD_ENV).ok())
        .with_context(|| format!("no password given; pass --password or set {PASSWORD_ENV}"))
}

/// Marker for an error already printed by [`report`]. `main` exits non-zero
/// without printing it again.
#[derive(Debug)]
pub struct Reported;

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("request failed")
    }
}

impl std::error::Error for Reported {}

/// Print an API error for a human and return the [`Reported`] marker.
pub fn report(err: ApiError) -> anyhow::Error {
    match &err {
        ApiError::Invalid(invalid) => {
            for field_error in invalid.errors() {
                eprintln!(
                    "  {} {}: {}",
                    "✗".red(),
                    field_error.field.bold(),
                    field_error.message
                );
            }
        }
        ApiError::Unauthorized { .. } => {
            eprintln!(
                "  {} {}",
                "✗".red(),
                "Session expired or invalid. Run `talkspace login`.".yellow()
            );
        }
        ApiError::NotAuthenticated => {
            eprintln!("  {} {}", "✗".red(), "Not signed in. Run `talkspace login`.".yellow());
        }
        other => eprintln!("  {} {}", "✗".red(), other),
    }
    tracing::debug!(error = ?err, "Reported API error");
    anyhow::Error::new(Reported)
}

pub fn print_success(message: &str) {
    println!("  {} {}", "✓".green(), message);
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
