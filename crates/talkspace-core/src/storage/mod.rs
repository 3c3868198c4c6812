//! Durable key/value storage behind the session store.
//!
//! Every operation returns a `Result` so callers see storage failures
//! explicitly. The session store treats them as non-fatal.
//!
//! # Key layout
//!
//! - `access_token` — the bearer token
//! - anything else — auxiliary flags written by auth flows
//!
//! `clear()` wipes every key at once.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "access_token";

/// Failure while touching durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt session document: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Capability interface over durable session storage.
///
/// Implementations must be cheap to share (`Send + Sync`) and take `&self`;
/// interior mutability is the implementation's concern.
pub trait SessionStorage: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a single key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key.
    fn clear(&self) -> Result<(), StorageError>;

    /// All keys currently stored, sorted.
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}
