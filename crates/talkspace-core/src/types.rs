//! Core types for Talkspace — rooms, room-creation payloads, and interests.
//!
//! Wire format matches the backend: snake_case keys, lowercase enum values
//! (`"public"`, `"video"`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ─────────────────────────────────────────────
// Room enums
// ─────────────────────────────────────────────

/// Who can see and join a room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
}

/// Media kind of a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    Audio,
    Video,
}

impl Privacy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Private => "private",
        }
    }
}

impl RoomType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Audio => "audio",
            RoomType::Video => "video",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Privacy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(Privacy::Public),
            "private" => Ok(Privacy::Private),
            other => Err(format!("unknown privacy '{other}' (expected public or private)")),
        }
    }
}

impl FromStr for RoomType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "audio" => Ok(RoomType::Audio),
            "video" => Ok(RoomType::Video),
            other => Err(format!("unknown room type '{other}' (expected audio or video)")),
        }
    }
}

// ─────────────────────────────────────────────
// Room
// ─────────────────────────────────────────────

/// A server-side conversation room, as cached by the client.
///
/// `id` is assigned by the server. Rooms are never edited in place once
/// cached; see [`crate::rooms::RoomCache`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub privacy: Privacy,
    pub room_type: RoomType,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}

impl Room {
    /// Build a room from a creation payload and the id the server assigned.
    pub fn from_new(id: impl Into<String>, new_room: NewRoom) -> Self {
        Room {
            id: id.into(),
            name: new_room.name,
            description: new_room.description,
            privacy: new_room.privacy,
            room_type: new_room.room_type,
            interests: new_room.interests,
            participants: new_room.participants,
        }
    }

    /// Human-readable interest names, in the room's order.
    pub fn interest_names(&self) -> Vec<&str> {
        self.interests.iter().map(|id| interest_name(id)).collect()
    }
}

/// Room-creation payload, before the server assigns an id.
///
/// Produced by [`crate::validation::CreateRoomForm::validate`].
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewRoom {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub privacy: Privacy,
    pub room_type: RoomType,
    pub interests: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participants: Option<Vec<String>>,
}

// ─────────────────────────────────────────────
// Interests
// ─────────────────────────────────────────────

/// A room topic tag. Rooms reference interests by id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interest {
    pub id: &'static str,
    pub name: &'static str,
}

/// Fixed interest lookup table.
pub const INTERESTS: &[Interest] = &[
    Interest {
        id: "dbac4910-103d-421d-a51d-3a1dbd2720f0",
        name: "Book",
    },
    Interest {
        id: "6ee6d0d8-69eb-4655-a40a-3c467c63279f",
        name: "Eating",
    },
];

/// Find an interest by id.
pub fn find_interest(id: &str) -> Option<&'static Interest> {
    INTERESTS.iter().find(|i| i.id == id)
}

/// Find an interest by display name (case-insensitive).
pub fn find_interest_by_name(name: &str) -> Option<&'static Interest> {
    INTERESTS.iter().find(|i| i.name.eq_ignore_ascii_case(name.trim()))
}

/// Resolve an interest id to its display name; unknown ids display as-is.
pub fn interest_name(id: &str) -> &str {
    find_interest(id).map_or(id, |i| i.name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_room_deserializes_backend_payload() {
        let room: Room = serde_json::from_value(json!({
            "id": "r-1",
            "name": "Book club",
            "description": "Monthly reads",
            "privacy": "private",
            "room_type": "audio",
            "interests": ["dbac4910-103d-421d-a51d-3a1dbd2720f0"],
            "participants": ["u-1", "u-2"]
        }))
        .unwrap();

        assert_eq!(room.id, "r-1");
        assert_eq!(room.privacy, Privacy::Private);
        assert_eq!(room.room_type, RoomType::Audio);
        assert_eq!(room.participants.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_room_optional_fields_missing() {
        let room: Room = serde_json::from_value(json!({
            "id": "r-2",
            "name": "Lunch",
            "privacy": "public",
            "room_type": "video"
        }))
        .unwrap();

        assert!(room.description.is_none());
        assert!(room.participants.is_none());
        assert!(room.interests.is_empty());
    }

    #[test]
    fn test_new_room_serialization_skips_none() {
        let new_room = NewRoom {
            name: "Standup".into(),
            description: None,
            privacy: Privacy::Public,
            room_type: RoomType::Video,
            interests: vec!["x".into()],
            participants: None,
        };
        let value = serde_json::to_value(&new_room).unwrap();

        assert_eq!(value["room_type"], "video");
        assert_eq!(value["privacy"], "public");
        assert!(value.get("description").is_none());
        assert!(value.get("participants").is_none());
    }

    #[test]
    fn test_room_from_new() {
        let new_room = NewRoom {
            name: "Standup".into(),
            description: Some("daily".into()),
            privacy: Privacy::Private,
            room_type: RoomType::Audio,
            interests: vec![],
            participants: None,
        };
        let room = Room::from_new("abc", new_room);
        assert_eq!(room.id, "abc");
        assert_eq!(room.description.as_deref(), Some("daily"));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("Video".parse::<RoomType>().unwrap(), RoomType::Video);
        assert_eq!(" private ".parse::<Privacy>().unwrap(), Privacy::Private);
        assert!("hologram".parse::<RoomType>().is_err());
    }

    #[test]
    fn test_interest_lookup() {
        assert_eq!(interest_name("6ee6d0d8-69eb-4655-a40a-3c467c63279f"), "Eating");
        assert_eq!(interest_name("unknown-id"), "unknown-id");
        assert_eq!(
            find_interest_by_name("book").map(|i| i.id),
            Some("dbac4910-103d-421d-a51d-3a1dbd2720f0")
        );
    }

    #[test]
    fn test_room_interest_names() {
        let room = Room {
            id: "r".into(),
            name: "n".into(),
            description: None,
            privacy: Privacy::Public,
            room_type: RoomType::Audio,
            interests: vec![
                "dbac4910-103d-421d-a51d-3a1dbd2720f0".into(),
                "mystery".into(),
            ],
            participants: None,
        };
        assert_eq!(room.interest_names(), vec!["Book", "mystery"]);
    }
}
