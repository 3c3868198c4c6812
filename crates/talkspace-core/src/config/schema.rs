//! Configuration schema.
//!
//! Hierarchy: `Config` → `ApiConfig`, `RoomsConfig`, `StorageConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rooms::DuplicatePolicy;

/// Root configuration — loaded from `~/.talkspace/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub api: ApiConfig,
    pub rooms: RoomsConfig,
    pub storage: StorageConfig,
}

/// Backend connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiConfig {
    /// Backend origin, without the `/api/v1/...` suffix.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Room cache behavior.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RoomsConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Empty the room cache when the session logs out.
    pub clear_on_logout: bool,
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Upsert,
            clear_on_logout: true,
        }
    }
}

/// Where session data lives.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StorageConfig {
    /// Overrides `~/.talkspace`. `~` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

impl StorageConfig {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map(crate::utils::expand_home)
            .unwrap_or_else(crate::utils::get_data_path)
    }

    /// Path of the session document inside the data directory.
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join(crate::utils::SESSION_FILE_NAME)
    }
}
