//! Flows — validate a form, call the backend, push the result into the stores.
//!
//! Store mutations happen strictly after the network call resolves. A bearer
//! call answered with [`ApiError::Unauthorized`] logs the client out before
//! the error is returned.

use tracing::{info, warn};

use talkspace_core::client::Client;
use talkspace_core::rooms::AddOutcome;
use talkspace_core::session::{AuthStatus, LAST_EMAIL_FLAG};
use talkspace_core::types::Room;
use talkspace_core::validation::{
    ChangePasswordForm, CreateRoomForm, ForgotPasswordForm, LoginForm, ResetPasswordForm,
    UpdateProfileForm,
};

use crate::error::ApiError;
use crate::traits::TalkspaceApi;

/// Token for a bearer call, or `NotAuthenticated` without touching the network.
fn bearer(client: &Client) -> Result<String, ApiError> {
    match (client.session().status(), client.session().current_token()) {
        (AuthStatus::Authenticated, Some(token)) => Ok(token.to_string()),
        _ => Err(ApiError::NotAuthenticated),
    }
}

/// Drop a credential the server no longer accepts.
fn guard_session<T>(client: &mut Client, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(e) = &result {
        if e.is_unauthorized() {
            warn!("Credential rejected by server, logging out");
            client.logout();
        }
    }
    result
}

/// Sign in and persist the returned token.
pub async fn login(
    client: &mut Client,
    api: &dyn TalkspaceApi,
    form: &LoginForm,
) -> Result<(), ApiError> {
    form.validate()?;
    let token = api.login(&form.email, &form.password).await?;

    let session = client.session_mut();
    session.login(token);
    session.set_flag(LAST_EMAIL_FLAG, &form.email);
    info!(email = %form.email, "Logged in");
    Ok(())
}

/// Fetch the room list and replace the cache with it. Returns the cached count.
pub async fn refresh_rooms(client: &mut Client, api: &dyn TalkspaceApi) -> Result<usize, ApiError> {
    let token = bearer(client)?;
    let result = api.list_rooms(&token).await;
    let rooms = guard_session(client, result)?;

    client.rooms_mut().replace_all(rooms);
    Ok(client.rooms().len())
}

/// Create a room and prepend it to the cache.
pub async fn create_room(
    client: &mut Client,
    api: &dyn TalkspaceApi,
    form: &CreateRoomForm,
) -> Result<(Room, AddOutcome), ApiError> {
    let new_room = form.validate()?;
    let token = bearer(client)?;
    let result = api.create_room(&token, &new_room).await;
    let room = guard_session(client, result)?;

    let outcome = client.rooms_mut().add_one(room.clone());
    info!(room_id = %room.id, ?outcome, "Room created");
    Ok((room, outcome))
}

/// Change the password, then end the session so the user signs in again.
pub async fn change_password(
    client: &mut Client,
    api: &dyn TalkspaceApi,
    form: &ChangePasswordForm,
) -> Result<String, ApiError> {
    form.validate()?;
    let token = bearer(client)?;
    let result = api.change_password(&token, form).await;
    let message = guard_session(client, result)?;

    client.logout();
    Ok(message)
}

/// Ask for a reset link. Needs no session.
pub async fn request_password_reset(
    api: &dyn TalkspaceApi,
    form: &ForgotPasswordForm,
) -> Result<(), ApiError> {
    form.validate()?;
    api.request_password_reset(&form.email).await?;
    info!(email = %form.email, "Password reset link requested");
    Ok(())
}

/// Complete a reset from an emailed link, then end any local session.
pub async fn confirm_password_reset(
    client: &mut Client,
    api: &dyn TalkspaceApi,
    uid: &str,
    reset_token: &str,
    form: &ResetPasswordForm,
) -> Result<(), ApiError> {
    form.validate()?;
    api.confirm_password_reset(uid, reset_token, form).await?;

    client.logout();
    Ok(())
}

pub async fn update_profile(
    client: &mut Client,
    api: &dyn TalkspaceApi,
    form: &UpdateProfileForm,
) -> Result<(), ApiError> {
    form.validate()?;
    let token = bearer(client)?;
    let result = api.update_profile(&token, form).await;
    guard_session(client, result)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use talkspace_core::config::Config;
    use talkspace_core::storage::{MemoryStorage, SessionStorage, TOKEN_KEY};
    use talkspace_core::types::{NewRoom, Privacy, RoomType};

    /// In-process backend: canned rooms, optional forced rejection.
    #[derive(Default)]
    struct FakeApi {
        reject_token: bool,
        rooms: Vec<Room>,
        next_id: Mutex<Option<String>>,
        calls: AtomicUsize,
    }

    impl FakeApi {
        fn hit(&self) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject_token {
                Err(ApiError::Unauthorized {
                    message: "Token expired".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl TalkspaceApi for FakeApi {
        async fn login(&self, _email: &str, password: &str) -> Result<String, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if password == "right" {
                Ok("fresh-token".into())
            } else {
                Err(ApiError::Unauthorized {
                    message: "Invalid credentials".into(),
                })
            }
        }

        async fn list_rooms(&self, _token: &str) -> Result<Vec<Room>, ApiError> {
            self.hit()?;
            Ok(self.rooms.clone())
        }

        async fn create_room(&self, _token: &str, room: &NewRoom) -> Result<Room, ApiError> {
            self.hit()?;
            let id = self
                .next_id
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| "created".into());
            Ok(Room::from_new(id, room.clone()))
        }

        async fn change_password(
            &self,
            _token: &str,
            _form: &ChangePasswordForm,
        ) -> Result<String, ApiError> {
            self.hit()?;
            Ok("Password changed".into())
        }

        async fn request_password_reset(&self, _email: &str) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn confirm_password_reset(
            &self,
            _uid: &str,
            _reset_token: &str,
            _form: &ResetPasswordForm,
        ) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn update_profile(
            &self,
            _token: &str,
            _form: &UpdateProfileForm,
        ) -> Result<(), ApiError> {
            self.hit()
        }
    }

    fn room(id: &str) -> Room {
        Room {
            id: id.into(),
            name: format!("room {id}"),
            description: None,
            privacy: Privacy::Public,
            room_type: RoomType::Video,
            interests: vec![],
            participants: None,
        }
    }

    fn signed_in_client() -> (Client, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let mut client = Client::new(storage.clone(), &Config::default());
        client.session_mut().restore();
        client.session_mut().login("tok");
        (client, storage)
    }

    fn room_form(name: &str) -> CreateRoomForm {
        CreateRoomForm {
            name: name.into(),
            description: None,
            privacy: Privacy::Public,
            room_type: Some(RoomType::Audio),
            interests: vec!["dbac4910-103d-421d-a51d-3a1dbd2720f0".into()],
        }
    }

    #[tokio::test]
    async fn test_login_persists_token_and_email() {
        let storage = Arc::new(MemoryStorage::new());
        let mut client = Client::new(storage.clone(), &Config::default());
        client.session_mut().restore();

        let form = LoginForm {
            email: "me@example.com".into(),
            password: "right".into(),
        };
        login(&mut client, &FakeApi::default(), &form).await.unwrap();

        assert_eq!(client.session().current_token(), Some("fresh-token"));
        assert_eq!(storage.get(TOKEN_KEY).unwrap().as_deref(), Some("fresh-token"));
        assert_eq!(
            client.session().flag(LAST_EMAIL_FLAG).as_deref(),
            Some("me@example.com")
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_session_alone() {
        let storage = Arc::new(MemoryStorage::new());
        let mut client = Client::new(storage, &Config::default());
        client.session_mut().restore();

        let form = LoginForm {
            email: "me@example.com".into(),
            password: "wrong".into(),
        };
        let err = login(&mut client, &FakeApi::default(), &form).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(client.session().status(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_invalid_form_skips_network() {
        let api = FakeApi::default();
        let (mut client, _) = signed_in_client();

        let err = create_room(&mut client, &api, &CreateRoomForm::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_bearer_flows_require_session() {
        let api = FakeApi::default();
        let mut client = Client::new(Arc::new(MemoryStorage::new()), &Config::default());

        // Not restored yet: loading is not "signed in"
        let err = refresh_rooms(&mut client, &api).await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));

        client.session_mut().restore();
        let err = create_room(&mut client, &api, &room_form("x")).await.unwrap_err();
        assert!(matches!(err, ApiError::NotAuthenticated));
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refresh_then_create_orders_newest_first() {
        let api = FakeApi {
            rooms: vec![room("x"), room("y")],
            ..Default::default()
        };
        let (mut client, _) = signed_in_client();
        client.rooms_mut().add_one(room("stale"));

        let count = refresh_rooms(&mut client, &api).await.unwrap();
        assert_eq!(count, 2);

        let (created, outcome) = create_room(&mut client, &api, &room_form("New")).await.unwrap();
        assert_eq!(outcome, AddOutcome::Inserted);
        assert_eq!(created.name, "New");

        let ids: Vec<String> = client.rooms().current_rooms().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["created", "x", "y"]);
    }

    #[tokio::test]
    async fn test_retried_create_upserts() {
        let api = FakeApi::default();
        *api.next_id.lock().unwrap() = Some("same".into());
        let (mut client, _) = signed_in_client();

        create_room(&mut client, &api, &room_form("first")).await.unwrap();
        let (_, outcome) = create_room(&mut client, &api, &room_form("retry")).await.unwrap();

        assert_eq!(outcome, AddOutcome::Replaced);
        assert_eq!(client.rooms().len(), 1);
        assert_eq!(client.rooms().get("same").unwrap().name, "retry");
    }

    #[tokio::test]
    async fn test_unauthorized_logs_out_and_clears_rooms() {
        let api = FakeApi {
            reject_token: true,
            ..Default::default()
        };
        let (mut client, storage) = signed_in_client();
        client.rooms_mut().add_one(room("a"));

        let err = refresh_rooms(&mut client, &api).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(client.session().status(), AuthStatus::Unauthenticated);
        assert!(client.rooms().is_empty());
        assert!(storage.keys().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_change_password_logs_out() {
        let (mut client, _) = signed_in_client();
        let form = ChangePasswordForm {
            password: "Str0ng!pass".into(),
            password2: "Str0ng!pass".into(),
        };
        let message = change_password(&mut client, &FakeApi::default(), &form)
            .await
            .unwrap();
        assert_eq!(message, "Password changed");
        assert_eq!(client.session().current_token(), None);
    }

    #[tokio::test]
    async fn test_password_reset_flows() {
        let api = FakeApi::default();
        request_password_reset(&api, &ForgotPasswordForm { email: "a@b.co".into() })
            .await
            .unwrap();

        let bad = request_password_reset(&api, &ForgotPasswordForm { email: "nope".into() }).await;
        assert!(matches!(bad, Err(ApiError::Invalid(_))));

        let (mut client, _) = signed_in_client();
        let form = ResetPasswordForm {
            new_password: "longenough".into(),
            confirm_password: "longenough".into(),
        };
        confirm_password_reset(&mut client, &api, "uid", "tok", &form)
            .await
            .unwrap();
        assert_eq!(client.session().status(), AuthStatus::Unauthenticated);
        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_session() {
        let (mut client, _) = signed_in_client();
        let form = UpdateProfileForm {
            gender: "Other".into(),
            phone: "0123456789".into(),
            ..Default::default()
        };
        update_profile(&mut client, &FakeApi::default(), &form).await.unwrap();
        assert_eq!(client.session().current_token(), Some("tok"));
    }
}
