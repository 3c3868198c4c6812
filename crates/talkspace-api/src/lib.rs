//! Backend layer for the Talkspace client.
//!
//! # Architecture
//!
//! - [`traits::TalkspaceApi`] — trait over the backend REST API
//! - [`http::HttpApi`] — reqwest implementation
//! - [`flows`] — validate → call → update `talkspace_core::Client`

pub mod error;
pub mod flows;
pub mod http;
pub mod traits;

pub use error::ApiError;
pub use http::HttpApi;
pub use traits::TalkspaceApi;
