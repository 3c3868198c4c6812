//! Room cache — ordered client-side mirror of the rooms this session knows.
//!
//! Newest first. Entries are never edited in place: the list changes only by
//! whole-list replace, prepend, or whole-entry replace under
//! [`DuplicatePolicy::Upsert`]. Ids are unique within the cache.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::types::Room;

/// What `add_one` does when the id is already cached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Drop the cached entry and prepend the new one.
    #[default]
    Upsert,
    /// Keep the cached entry, ignore the new one.
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DuplicatePolicy::Upsert => "upsert",
            DuplicatePolicy::Reject => "reject",
        })
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upsert" => Ok(DuplicatePolicy::Upsert),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("unknown duplicate policy '{other}'")),
        }
    }
}

/// Result of [`RoomCache::add_one`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Replaced,
    Rejected,
}

#[derive(Debug, Default)]
pub struct RoomCache {
    rooms: Vec<Room>,
    policy: DuplicatePolicy,
}

impl RoomCache {
    pub fn new(policy: DuplicatePolicy) -> Self {
        RoomCache {
            rooms: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Replace the whole list after a bulk fetch, keeping server order.
    ///
    /// A repeated id keeps its first occurrence.
    pub fn replace_all(&mut self, rooms: Vec<Room>) {
        let mut seen = HashSet::with_capacity(rooms.len());
        let total = rooms.len();
        self.rooms = rooms
            .into_iter()
            .filter(|room| {
                let fresh = seen.insert(room.id.clone());
                if !fresh {
                    warn!(room_id = %room.id, "Dropping repeated room id from server list");
                }
                fresh
            })
            .collect();
        debug!(kept = self.rooms.len(), received = total, "Room cache replaced");
    }

    /// Insert a newly created room at the front.
    pub fn add_one(&mut self, room: Room) -> AddOutcome {
        let existing = self.rooms.iter().position(|r| r.id == room.id);

        match (existing, self.policy) {
            (None, _) => {
                self.rooms.insert(0, room);
                AddOutcome::Inserted
            }
            (Some(_), DuplicatePolicy::Reject) => {
                debug!(room_id = %room.id, "Room already cached, keeping existing entry");
                AddOutcome::Rejected
            }
            (Some(index), DuplicatePolicy::Upsert) => {
                self.rooms.remove(index);
                self.rooms.insert(0, room);
                AddOutcome::Replaced
            }
        }
    }

    /// Snapshot of the current list. Later mutations don't affect it.
    pub fn current_rooms(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    pub fn get(&self, id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
