//! Session store — the bearer token, its persistence, and the ready gate.
//!
//! Two independent booleans make up the state: whether a token is held and
//! whether the one-time restore has run. `ready` only ever goes from false to
//! true. Consumers read [`AuthStatus`] and must treat `Loading` as a neutral
//! state, never as "logged out".

pub mod store;

pub use store::{AuthStatus, SessionStore, LAST_EMAIL_FLAG};
