//! Session token lifecycle over a [`SessionStorage`] capability.
//!
//! Storage failures never leave this module: reads degrade to "no session",
//! writes are best effort and logged.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::{SessionStorage, TOKEN_KEY};

/// Flag written by the login flow with the email that last signed in.
pub const LAST_EMAIL_FLAG: &str = "last_email";

/// What a consumer should show for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStatus {
    /// Restore has not run yet. Show a neutral loading state.
    Loading,
    /// A token is held.
    Authenticated,
    /// Restore ran and no token is held. Redirect to login.
    Unauthenticated,
}

/// Single source of truth for "is there a usable credential, and what is it".
///
/// Owned by the application root and handed out by reference; mutations take
/// `&mut self`, so two mutations of one store can never interleave.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    token: Option<String>,
    ready: bool,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("has_token", &self.token.is_some())
            .field("ready", &self.ready)
            .finish()
    }
}

impl SessionStore {
    /// A fresh store: not ready, no token. Call [`restore`](Self::restore)
    /// once before rendering any authenticated view.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        SessionStore {
            storage,
            token: None,
            ready: false,
        }
    }

    /// Recover a previously persisted token, then mark the store ready.
    ///
    /// Runs once; later calls are no-ops. An unreadable store is treated the
    /// same as an empty one.
    pub fn restore(&mut self) {
        if self.ready {
            debug!("Session already restored, skipping");
            return;
        }

        match self.storage.get(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                debug!("Restored persisted session token");
                self.token = Some(token);
            }
            Ok(_) => debug!("No persisted session found"),
            Err(e) => warn!("Failed to read persisted session, starting logged out: {}", e),
        }

        self.ready = true;
    }

    /// Adopt `credential` as the current token and persist it.
    ///
    /// No network validation happens here; the caller already obtained the
    /// credential from the backend. Does not touch the ready gate: only
    /// [`restore`](Self::restore) marks the store ready.
    pub fn login(&mut self, credential: impl Into<String>) {
        let credential = credential.into();
        debug_assert!(!credential.is_empty(), "login called with an empty credential");

        if let Err(e) = self.storage.set(TOKEN_KEY, &credential) {
            warn!("Failed to persist session token: {}", e);
        }
        self.token = Some(credential);
        info!("Session started");
    }

    /// Drop the token and wipe every persisted session key.
    pub fn logout(&mut self) {
        if let Err(e) = self.storage.clear() {
            warn!("Failed to wipe persisted session: {}", e);
        }
        self.token = None;
        info!("Session ended");
    }

    /// Persist an auxiliary flag alongside the token. Wiped by `logout`.
    pub fn set_flag(&self, key: &str, value: &str) {
        debug_assert_ne!(key, TOKEN_KEY, "use login() to set the token");
        if let Err(e) = self.storage.set(key, value) {
            warn!(flag = key, "Failed to persist session flag: {}", e);
        }
    }

    /// Read an auxiliary flag. Storage errors read as absent.
    pub fn flag(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(flag = key, "Failed to read session flag: {}", e);
                None
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn current_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.ready && self.token.is_some()
    }

    pub fn status(&self) -> AuthStatus {
        match (self.ready, self.token.is_some()) {
            (false, _) => AuthStatus::Loading,
            (true, true) => AuthStatus::Authenticated,
            (true, false) => AuthStatus::Unauthenticated,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
