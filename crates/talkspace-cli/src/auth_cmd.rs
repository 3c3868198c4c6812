//! `talkspace login`, `talkspace logout`, `talkspace profile`.

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use talkspace_api::flows;
use talkspace_core::utils::expand_home;
use talkspace_core::validation::{LoginForm, UpdateProfileForm};

use crate::helpers::{password_or_env, print_success, report, App};

pub async fn login(config_path: Option<&Path>, email: String, password: Option<String>) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let api = app.api()?;

    let form = LoginForm {
        email,
        password: password_or_env(password)?,
    };
    flows::login(&mut app.client, &api, &form)
        .await
        .map_err(report)?;

    print_success(&format!("signed in as {}", form.email.bold()));
    Ok(())
}

pub fn logout(config_path: Option<&Path>) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let was_signed_in = app.client.session().is_authenticated();

    // Always wipe: stray flags may exist even without a token.
    app.client.logout();

    if was_signed_in {
        print_success("signed out");
    } else {
        println!("  {}", "not signed in".dimmed());
    }
    Ok(())
}

pub async fn update_profile(
    config_path: Option<&Path>,
    gender: String,
    phone: String,
    interest: Option<String>,
    description: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let mut app = App::bootstrap(config_path);
    let api = app.api()?;

    let form = UpdateProfileForm {
        gender,
        phone,
        interest,
        description,
        image: image.as_deref().map(expand_home),
    };
    flows::update_profile(&mut app.client, &api, &form)
        .await
        .map_err(report)?;

    print_success("profile updated");
    Ok(())
}
