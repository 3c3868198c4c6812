//! Talkspace CLI — entry point.
//!
//! # Commands
//!
//! - `talkspace init` — write a default config
//! - `talkspace status` — show config and session state
//! - `talkspace login --email EMAIL` / `talkspace logout`
//! - `talkspace rooms list|create` — list or create rooms
//! - `talkspace interests` — show the interest table
//! - `talkspace password change|forgot|reset`
//! - `talkspace profile --gender G --phone P` — update the profile

mod auth_cmd;
mod helpers;
mod init;
mod password_cmd;
mod rooms_cmd;
mod status;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::helpers::Reported;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Talkspace — audio and video rooms from the terminal
#[derive(Parser)]
#[command(name = "talkspace", version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ~/.talkspace/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true, default_value_t = false)]
    logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config and create the data directory
    Init,

    /// Show configuration and session status
    Status,

    /// Sign in and remember the session
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Password (falls back to $TALKSPACE_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign out and wipe the stored session
    Logout,

    /// List or create rooms
    Rooms {
        #[command(subcommand)]
        action: rooms_cmd::RoomsCommands,
    },

    /// Show the interests rooms can be tagged with
    Interests,

    /// Change or reset the account password
    Password {
        #[command(subcommand)]
        action: password_cmd::PasswordCommands,
    },

    /// Update profile details
    Profile {
        /// Gender (e.g. Male / Female / Other)
        #[arg(long)]
        gender: String,

        /// Phone number
        #[arg(long)]
        phone: String,

        /// Free-form interest, e.g. "Tech, Music"
        #[arg(long)]
        interest: Option<String>,

        /// Short bio
        #[arg(long)]
        description: Option<String>,

        /// Profile image to upload
        #[arg(long)]
        image: Option<String>,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.logs);

    match run(cli.command, cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        // Already printed in detail.
        Err(e) if e.is::<Reported>() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("  {} {:#}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Init => init::run(config_path),
        Commands::Status => status::run(config_path),
        Commands::Login { email, password } => auth_cmd::login(config_path, email, password).await,
        Commands::Logout => auth_cmd::logout(config_path),
        Commands::Rooms { action } => rooms_cmd::dispatch(config_path, action).await,
        Commands::Interests => {
            rooms_cmd::print_interests();
            Ok(())
        }
        Commands::Password { action } => password_cmd::dispatch(config_path, action).await,
        Commands::Profile {
            gender,
            phone,
            interest,
            description,
            image,
        } => auth_cmd::update_profile(config_path, gender, phone, interest, description, image).await,
    }
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("talkspace=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
