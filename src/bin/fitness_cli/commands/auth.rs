// ABOUTME: Login, callback, status, refresh and logout commands for fitness-cli
// ABOUTME: Drives the auth controller and reports its state to the terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::AppContext;
use crate::helpers::display::{display_auth_state, display_redirect};
use anyhow::{anyhow, Context, Result};
use tracing::info;
use url::Url;

pub fn login(context: &AppContext) -> Result<()> {
    let mut auth = context.home_controller()?;
    let navigation = auth.login()?;
    display_redirect("Open this URL in your browser to sign in:", &navigation);
    println!("Then run: fitness-cli callback '<address you were redirected to>'");
    Ok(())
}

pub async fn callback(context: &AppContext, redirected_to: &str) -> Result<()> {
    let address = Url::parse(redirected_to).context("Callback address is not a valid URL")?;
    let mut auth = context.controller(address);
    let state = auth.initialize().await;
    display_auth_state(state);

    if let Some(error) = &state.error {
        return Err(anyhow!("{error}"));
    }
    info!("Login completed");
    Ok(())
}

pub async fn status(context: &AppContext) -> Result<()> {
    let mut auth = context.home_controller()?;
    let state = auth.initialize().await;
    display_auth_state(state);
    Ok(())
}

pub async fn refresh(context: &AppContext) -> Result<()> {
    let mut auth = context.home_controller()?;
    auth.refresh().await?;
    println!("Access token refreshed.");
    Ok(())
}

pub fn logout(context: &AppContext) -> Result<()> {
    let mut auth = context.home_controller()?;
    let navigation = auth.logout();
    display_redirect(
        "Session cleared. Open this URL to end the identity provider session:",
        &navigation,
    );
    Ok(())
}
