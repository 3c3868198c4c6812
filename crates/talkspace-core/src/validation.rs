//! Form validation for the auth, profile, and room-creation flows.
//!
//! Every form checks all of its fields and reports every failure at once.
//! Messages are user-facing and attached to the field they concern.

use std::fmt;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::types::{NewRoom, Privacy, RoomType};

const MIN_PASSWORD_LEN: usize = 8;
const MIN_PHONE_LEN: usize = 10;
const ROOM_TYPE_REQUIRED: &str = "Room type is required";

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

/// A single failed rule on a single field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All field failures of one form submission.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid form: {}", render(.0))]
pub struct ValidationError(pub Vec<FieldError>);

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Messages reported for `field`, in rule order.
    pub fn messages_for(&self, field: &str) -> Vec<&'static str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message)
            .collect()
    }
}

/// Collects failures while a form is checked.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.errors.push(FieldError { field, message });
        }
    }

    fn has_errors_on(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError(self.errors))
        }
    }
}

// ─────────────────────────────────────────────
// Rule helpers
// ─────────────────────────────────────────────

/// Address pattern used by the web client's forms. The `regex` crate has no
/// lookaround, so the leading-dot and double-dot rules are checked apart.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("email pattern compiles")
});

/// Whether `email` is an address the backend will accept.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

// ─────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.check(is_valid_email(&self.email), "email", "Enter a valid email");
        c.check(!self.password.is_empty(), "password", "Password is required");
        c.finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.check(is_valid_email(&self.email), "email", "Enter a valid email");
        c.finish()
    }
}

/// New password chosen through an emailed reset link.
#[derive(Clone, Debug, Default)]
pub struct ResetPasswordForm {
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        const TOO_SHORT: &str = "Password must be at least 8 characters.";

        let mut c = Checker::default();
        c.check(char_len(&self.new_password) >= MIN_PASSWORD_LEN, "new_password", TOO_SHORT);
        c.check(
            char_len(&self.confirm_password) >= MIN_PASSWORD_LEN,
            "confirm_password",
            TOO_SHORT,
        );
        if !c.has_errors_on("new_password") && !c.has_errors_on("confirm_password") {
            c.check(
                self.new_password == self.confirm_password,
                "confirm_password",
                "Passwords do not match",
            );
        }
        c.finish()
    }
}

/// Password change for a signed-in user. Stricter than a reset.
#[derive(Clone, Debug, Default)]
pub struct ChangePasswordForm {
    pub password: String,
    pub password2: String,
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let p = &self.password;
        let mut c = Checker::default();
        c.check(
            char_len(p) >= MIN_PASSWORD_LEN,
            "password",
            "Password must be at least 8 characters",
        );
        c.check(
            p.chars().any(|ch| ch.is_ascii_uppercase()),
            "password",
            "Must contain at least one uppercase letter",
        );
        c.check(
            p.chars().any(|ch| ch.is_ascii_digit()),
            "password",
            "Must contain at least one number",
        );
        c.check(
            p.chars().any(|ch| !ch.is_ascii_alphanumeric()),
            "password",
            "Must contain at least one special character",
        );
        c.check(!self.password2.is_empty(), "password2", "Please confirm your password");
        if !c.has_errors_on("password") && !c.has_errors_on("password2") {
            c.check(self.password == self.password2, "password2", "Passwords don't match");
        }
        c.finish()
    }
}

#[derive(Clone, Debug, Default)]
pub struct CreateRoomForm {
    pub name: String,
    pub description: Option<String>,
    pub privacy: Privacy,
    /// Unset until the user picks one.
    pub room_type: Option<RoomType>,
    pub interests: Vec<String>,
}

impl CreateRoomForm {
    /// Check the form and produce the creation payload.
    ///
    /// Blank descriptions are dropped; interest order is kept.
    pub fn validate(&self) -> Result<NewRoom, ValidationError> {
        let mut c = Checker::default();
        c.check(!self.name.trim().is_empty(), "name", "Room name is required");
        c.check(self.room_type.is_some(), "room_type", ROOM_TYPE_REQUIRED);
        c.check(
            !self.interests.is_empty(),
            "interests",
            "At least one interest is required",
        );
        c.finish()?;

        let room_type = self.room_type.ok_or_else(|| {
            ValidationError(vec![FieldError {
                field: "room_type",
                message: ROOM_TYPE_REQUIRED,
            }])
        })?;
        Ok(NewRoom {
            name: self.name.trim().to_string(),
            description: self
                .description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
            privacy: self.privacy,
            room_type,
            interests: self.interests.clone(),
            participants: None,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct UpdateProfileForm {
    pub gender: String,
    pub phone: String,
    pub interest: Option<String>,
    pub description: Option<String>,
    /// Local path of a profile picture to upload.
    pub image: Option<PathBuf>,
}

impl UpdateProfileForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut c = Checker::default();
        c.check(!self.gender.is_empty(), "gender", "Gender is required.");
        c.check(char_len(&self.phone) >= MIN_PHONE_LEN, "phone", "Phone number is required.");
        c.finish()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
