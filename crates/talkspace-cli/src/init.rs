//! `talkspace init` — write a default config and create the data directory.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use talkspace_core::config::{get_config_path, load_config, save_config};

use crate::helpers::print_success;

/// Run the init command.
pub fn run(config_path: Option<&Path>) -> Result<()> {
    println!();
    println!("{}", "Talkspace — Setup".cyan().bold());
    println!();

    let path = config_path.map_or_else(get_config_path, Path::to_path_buf);

    // Also picks up env overrides, so `TALKSPACE_API__BASE_URL=... talkspace init`
    // bakes the URL into the new file.
    let config = load_config(Some(&path));
    if path.exists() {
        print_success(&format!("config already exists at {}", path.display()));
    } else {
        save_config(&config, Some(&path))?;
        print_success(&format!("created config at {}", path.display()));
    }

    let data_dir = config.storage.data_dir();
    std::fs::create_dir_all(&data_dir)?;
    print_success(&format!("data dir at {}", data_dir.display()));

    println!();
    println!("  Backend: {}", config.api.base_url.bold());
    println!("  Next: {}", "talkspace login --email you@example.com".dimmed());
    println!();
    Ok(())
}
