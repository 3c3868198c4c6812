//! `talkspace password` — change, forgot, reset.
//!
//! A successful change or reset ends the local session; sign in again with
//! the new password.

use std::path::Path;

use anyhow::Result;
use clap::Subcommand;

use talkspace_api::flows;
use talkspace_core::validation::{ChangePasswordForm, ForgotPasswordForm, ResetPasswordForm};

use crate::helpers::{print_success, report, App};

#[derive(Subcommand)]
pub enum PasswordCommands {
    /// Change the password of the signed-in account
    Change {
        /// New password
        #[arg(long)]
        password: String,

        /// Repeat the new password
        #[arg(long)]
        confirm: String,
    },

    /// Email a password reset link
    Forgot {
        #[arg(short, long)]
        email: String,
    },

    /// Set a new password from a reset link's uid and token
    Reset {
        #[arg(long)]
        uid: String,

        #[arg(long)]
        token: String,

        /// New password
        #[arg(long)]
        password: String,

        /// Repeat the new password
        #[arg(long)]
        confirm: String,
    },
}

pub async fn dispatch(config_path: Option<&Path>, cmd: PasswordCommands) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let api = app.api()?;

    match cmd {
        PasswordCommands::Change { password, confirm } => {
            let form = ChangePasswordForm {
                password,
                password2: confirm,
            };
            let message = flows::change_password(&mut app.client, &api, &form)
                .await
                .map_err(report)?;
            print_success(&message);
            println!("  signed out; log in again with the new password");
        }
        PasswordCommands::Forgot { email } => {
            flows::request_password_reset(&api, &ForgotPasswordForm { email })
                .await
                .map_err(report)?;
            print_success("Reset link sent to your email.");
        }
        PasswordCommands::Reset {
            uid,
            token,
            password,
            confirm,
        } => {
            let form = ResetPasswordForm {
                new_password: password,
                confirm_password: confirm,
            };
            flows::confirm_password_reset(&mut app.client, &api, &uid, &token, &form)
                .await
                .map_err(report)?;
            print_success("Password reset successful");
        }
    }
    Ok(())
}
