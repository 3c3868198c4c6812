//! File-backed session storage.
//!
//! File format: one JSON document at `~/.talkspace/session.json`:
//!
//! ```json
//! {"updatedAt": "2025-01-01T00:00:00Z", "entries": {"access_token": "..."}}
//! ```
//!
//! Writes go to a sibling `.tmp` file which is then renamed over the
//! document, so a crash mid-write leaves the previous document intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{SessionStorage, StorageError};

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Session storage persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Storage backed by the document at `path`. Nothing is created until
    /// the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// Storage at the default location (`~/.talkspace/session.json`).
    pub fn default_location() -> Self {
        Self::new(crate::utils::get_session_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SessionDocument, StorageError> {
        if !self.path.exists() {
            return Ok(SessionDocument::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SessionDocument::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, mut doc: SessionDocument) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        doc.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(&doc)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        restrict_permissions(&tmp)?;
        std::fs::rename(&tmp, &self.path)?;

        debug!(
            "Saved session document ({} entries) to {}",
            doc.entries.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// The document holds a bearer token; keep it owner-only.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // An unreadable document is replaced rather than blocking new writes.
        let mut doc = self.load().unwrap_or_default();
        doc.entries.insert(key.to_string(), value.to_string());
        self.save(doc)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut doc = self.load()?;
        if doc.entries.remove(key).is_some() {
            self.save(doc)?;
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session document {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.load()?.entries.into_keys().collect())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
