//! Config loader — reads `~/.talkspace/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.talkspace/config.json`
//! 3. Environment variables `TALKSPACE_<SECTION>__<FIELD>` (override JSON)

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    load_config_from_path(&config_path)
}

/// Load config from a specific file path.
fn load_config_from_path(path: &Path) -> Config {
    apply_env_overrides(read_config_file(path))
}

/// Parse the file at `path`, falling back to defaults. No env overrides.
fn read_config_file(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config JSON: {}", e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply `TALKSPACE_<SECTION>__<FIELD>` overrides read through `lookup`.
///
/// Supported overrides:
/// - `TALKSPACE_API__BASE_URL` → `api.base_url`
/// - `TALKSPACE_API__TIMEOUT_SECS` → `api.timeout_secs`
/// - `TALKSPACE_ROOMS__DUPLICATE_POLICY` → `rooms.duplicate_policy`
/// - `TALKSPACE_ROOMS__CLEAR_ON_LOGOUT` → `rooms.clear_on_logout`
/// - `TALKSPACE_STORAGE__DATA_DIR` → `storage.data_dir`
fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(val) = lookup("TALKSPACE_API__BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = lookup("TALKSPACE_API__TIMEOUT_SECS") {
        match val.parse::<u64>() {
            Ok(n) => config.api.timeout_secs = n,
            Err(_) => warn!("Ignoring TALKSPACE_API__TIMEOUT_SECS={}: not a number", val),
        }
    }

    if let Some(val) = lookup("TALKSPACE_ROOMS__DUPLICATE_POLICY") {
        match val.parse() {
            Ok(policy) => config.rooms.duplicate_policy = policy,
            Err(e) => warn!("Ignoring TALKSPACE_ROOMS__DUPLICATE_POLICY: {}", e),
        }
    }
    if let Some(val) = lookup("TALKSPACE_ROOMS__CLEAR_ON_LOGOUT") {
        config.rooms.clear_on_logout = val == "true" || val == "1";
    }

    if let Some(val) = lookup("TALKSPACE_STORAGE__DATA_DIR") {
        config.storage.data_dir = Some(val);
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
