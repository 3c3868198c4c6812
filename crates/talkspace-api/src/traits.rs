//! Backend API trait — the seam between the flows and the network.
//!
//! [`crate::http::HttpApi`] is the real implementation. Flows only see this
//! trait, so tests can substitute an in-process fake.

use async_trait::async_trait;
use talkspace_core::types::{NewRoom, Room};
use talkspace_core::validation::{ChangePasswordForm, ResetPasswordForm, UpdateProfileForm};

use crate::error::ApiError;

/// Calls against the Talkspace backend.
///
/// Methods taking `token` send it as a bearer credential. Implementations
/// report a rejected credential as [`ApiError::Unauthorized`].
#[async_trait]
pub trait TalkspaceApi: Send + Sync {
    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    /// Fetch the rooms visible to the session, in server order.
    async fn list_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError>;

    /// Create a room; returns it with its server-assigned id.
    async fn create_room(&self, token: &str, room: &NewRoom) -> Result<Room, ApiError>;

    /// Change the signed-in user's password. Returns the server's message.
    async fn change_password(
        &self,
        token: &str,
        form: &ChangePasswordForm,
    ) -> Result<String, ApiError>;

    /// Ask the server to email a reset link.
    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError>;

    /// Set a new password using the `uid`/`reset_token` pair from the link.
    async fn confirm_password_reset(
        &self,
        uid: &str,
        reset_token: &str,
        form: &ResetPasswordForm,
    ) -> Result<(), ApiError>;

    /// Update profile fields, uploading the image if one is given.
    async fn update_profile(&self, token: &str, form: &UpdateProfileForm) -> Result<(), ApiError>;
}
