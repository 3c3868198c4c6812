//! `talkspace status` — show configuration and session state.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use talkspace_core::config::get_config_path;
use talkspace_core::session::LAST_EMAIL_FLAG;
use talkspace_core::AuthStatus;

use crate::helpers::App;

/// Run the status command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    let app = App::bootstrap(config_path);
    let config = &app.config;
    let path = config_path.map_or_else(get_config_path, Path::to_path_buf);

    println!();
    println!("{}", "Talkspace Status".cyan().bold());
    println!();

    println!("  {:<18} {} {}", "Config:".bold(), path.display(), found(path.exists()));

    let session_file = config.storage.session_file();
    println!(
        "  {:<18} {} {}",
        "Session file:".bold(),
        session_file.display(),
        found(session_file.exists())
    );

    println!("  {:<18} {}", "Backend:".bold(), config.api.base_url);
    println!(
        "  {:<18} {}",
        "Rooms:".bold(),
        format!(
            "duplicates: {} | clear on logout: {}",
            config.rooms.duplicate_policy, config.rooms.clear_on_logout
        )
        .dimmed()
    );

    println!();
    let session = app.client.session();
    let auth = match session.status() {
        AuthStatus::Authenticated => format!("{} signed in", "✓".green()),
        AuthStatus::Unauthenticated => format!("{}", "· signed out".dimmed()),
        AuthStatus::Loading => format!("{}", "· loading".yellow()),
    };
    println!("  {:<18} {}", "Session:".bold(), auth);
    if let Some(email) = session.flag(LAST_EMAIL_FLAG) {
        println!("  {:<18} {}", "Last email:".bold(), email);
    }

    println!();
    Ok(())
}

fn found(exists: bool) -> String {
    if exists {
        "✓".green().to_string()
    } else {
        "(not found)".red().to_string()
    }
}
