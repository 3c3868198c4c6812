//! Client core for Talkspace.
//!
//! - [`session::SessionStore`] — bearer token, persistence, ready gate
//! - [`rooms::RoomCache`] — newest-first mirror of known rooms
//! - [`client::Client`] — application root owning both stores
//! - [`storage`] — durable key/value capability behind the session
//! - [`validation`] — form rules for auth, profile, and room creation
//! - [`config`] — `~/.talkspace/config.json` + env overrides
//!
//! Nothing here talks to the network. Network results are pushed into the
//! stores by the API layer.

pub mod client;
pub mod config;
pub mod rooms;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;
pub mod validation;

pub use client::Client;
pub use rooms::{AddOutcome, DuplicatePolicy, RoomCache};
pub use session::{AuthStatus, SessionStore};
pub use types::{NewRoom, Privacy, Room, RoomType};
