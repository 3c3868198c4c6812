//! HTTP client for the Talkspace REST API.
//!
//! All endpoints live under `{base_url}/api/v1/startup/`. Responses come in
//! a few shapes depending on the endpoint (bare object, `{"data": ...}`, or a
//! paginated `{"results": [...]}`); [`Envelope`] accepts all of them.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error};

use talkspace_core::config::ApiConfig;
use talkspace_core::types::{NewRoom, Room};
use talkspace_core::validation::{ChangePasswordForm, ResetPasswordForm, UpdateProfileForm};

use crate::error::ApiError;
use crate::traits::TalkspaceApi;

const API_PREFIX: &str = "api/v1/startup";

// ─────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Data { data: T },
    Results { results: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Data { data } => data,
            Envelope::Results { results } => results,
            Envelope::Bare(inner) => inner,
        }
    }
}

#[derive(Deserialize)]
struct TokenBody {
    #[serde(alias = "access_token", alias = "token")]
    access: String,
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(String::from)
}

// ─────────────────────────────────────────────
// HttpApi
// ─────────────────────────────────────────────

/// [`TalkspaceApi`] over reqwest.
pub struct HttpApi {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// Backend origin, no trailing slash.
    base_url: String,
}

impl std::fmt::Debug for HttpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(HttpApi {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for an endpoint path such as `"auth/login/"`.
    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, API_PREFIX, path)
    }

    /// Send a request and map non-success statuses to [`ApiError`].
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "HTTP request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
        error!(status = %status, message = %message, "API error");

        // 403 means "not allowed to do this", not "credential is bad".
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized { message });
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(Envelope::into_inner)
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl TalkspaceApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        debug!(email = %email, "Logging in");
        let request = self
            .client
            .post(self.url("auth/login/"))
            .json(&json!({ "email": email, "password": password }));
        let token: TokenBody = self.send_json(request).await?;
        Ok(token.access)
    }

    async fn list_rooms(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        let request = self.client.get(self.url("talkspace/rooms/")).bearer_auth(token);
        let rooms: Vec<Room> = self.send_json(request).await?;
        debug!(count = rooms.len(), "Fetched rooms");
        Ok(rooms)
    }

    async fn create_room(&self, token: &str, room: &NewRoom) -> Result<Room, ApiError> {
        debug!(name = %room.name, room_type = %room.room_type, "Creating room");
        let request = self
            .client
            .post(self.url("talkspace/rooms/"))
            .bearer_auth(token)
            .json(room);
        self.send_json(request).await
    }

    async fn change_password(
        &self,
        token: &str,
        form: &ChangePasswordForm,
    ) -> Result<String, ApiError> {
        let request = self
            .client
            .post(self.url("auth/change-password/"))
            .bearer_auth(token)
            .json(&json!({ "password": form.password, "password2": form.password2 }));
        let body = self.send(request).await?;

        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("data").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| "Password changed successfully!".to_string());
        Ok(message)
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), ApiError> {
        let request = self
            .client
            .post(self.url("auth/password-reset/"))
            .json(&json!({ "email": email }));
        self.send(request).await?;
        Ok(())
    }

    async fn confirm_password_reset(
        &self,
        uid: &str,
        reset_token: &str,
        form: &ResetPasswordForm,
    ) -> Result<(), ApiError> {
        let path = format!("auth/password-reset/{uid}/{reset_token}/");
        let request = self.client.post(self.url(&path)).json(&json!({
            "new_password": form.new_password,
            "confirm_password": form.confirm_password,
        }));
        self.send(request).await?;
        Ok(())
    }

    async fn update_profile(&self, token: &str, form: &UpdateProfileForm) -> Result<(), ApiError> {
        let mut multipart = Form::new()
            .text("gender", form.gender.clone())
            .text("phone", form.phone.clone());
        if let Some(interest) = &form.interest {
            multipart = multipart.text("interest", interest.clone());
        }
        if let Some(description) = &form.description {
            multipart = multipart.text("description", description.clone());
        }
        if let Some(path) = &form.image {
            let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::Io {
                path: path.clone(),
                source,
            })?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            multipart = multipart.part("image", Part::bytes(bytes).file_name(file_name));
        }

        let request = self
            .client
            .patch(self.url("auth/profile/"))
            .bearer_auth(token)
            .multipart(multipart);
        self.send(request).await?;
        Ok(())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
