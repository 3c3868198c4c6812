//! Application root — owns the session store and the room cache.
//!
//! One `Client` per running application, constructed explicitly and handed to
//! collaborators by reference. It is the only place where the two stores are
//! coupled: [`Client::logout`] can cascade into the room cache.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::rooms::RoomCache;
use crate::session::SessionStore;
use crate::storage::{FileStorage, SessionStorage};

#[derive(Debug)]
pub struct Client {
    session: SessionStore,
    rooms: RoomCache,
    clear_rooms_on_logout: bool,
}

impl Client {
    /// Build a client over `storage`, with room behavior from `config`.
    ///
    /// The session is not restored yet; call `session_mut().restore()` once.
    pub fn new(storage: Arc<dyn SessionStorage>, config: &Config) -> Self {
        Client {
            session: SessionStore::new(storage),
            rooms: RoomCache::new(config.rooms.duplicate_policy),
            clear_rooms_on_logout: config.rooms.clear_on_logout,
        }
    }

    /// Client persisting to the session file named by `config.storage`.
    pub fn with_file_storage(config: &Config) -> Self {
        let storage = FileStorage::new(config.storage.session_file());
        debug!("Session storage at {}", storage.path().display());
        Self::new(Arc::new(storage), config)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn rooms(&self) -> &RoomCache {
        &self.rooms
    }

    pub fn rooms_mut(&mut self) -> &mut RoomCache {
        &mut self.rooms
    }

    /// End the session and, if configured, forget the cached rooms.
    pub fn logout(&mut self) {
        self.session.logout();
        if self.clear_rooms_on_logout {
            debug!(dropped = self.rooms.len(), "Clearing room cache on logout");
            self.rooms.clear();
        }
    }
}
