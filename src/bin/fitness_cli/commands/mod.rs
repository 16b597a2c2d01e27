// ABOUTME: Command modules for fitness-cli and the shared wiring they run on
// ABOUTME: Builds the auth controller and API client over the persisted session file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod activities;
pub mod auth;

use anyhow::{Context, Result};
use fitness_client::api::ActivityApiClient;
use fitness_client::auth::{AuthController, MemoryAddressBar};
use fitness_client::config::{ClientConfig, ProviderEndpoints};
use fitness_client::oauth2_client::OAuth2Client;
use fitness_client::session::{FileSessionStore, Session, SessionStore};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Configuration and session shared by every command
pub struct AppContext {
    config: ClientConfig,
    endpoints: ProviderEndpoints,
    store: Arc<FileSessionStore>,
}

impl AppContext {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let endpoints = config
            .identity
            .endpoints()
            .context("Invalid identity provider configuration")?;
        let store = match &config.session_file {
            Some(path) => FileSessionStore::new(path),
            None => FileSessionStore::default_location()
                .context("Cannot determine the session file location")?,
        };
        Ok(Self {
            config,
            endpoints,
            store: Arc::new(store),
        })
    }

    pub fn session_path(&self) -> &Path {
        self.store.path()
    }

    /// Controller for a "page load" at `address`
    pub fn controller(&self, address: Url) -> AuthController {
        let provider = OAuth2Client::with_timeouts(
            self.endpoints.clone(),
            self.config.oauth_timeouts,
        );
        let store: Arc<dyn SessionStore> = self.store.clone();
        AuthController::new(
            self.endpoints.clone(),
            Arc::new(provider),
            store,
            Arc::new(MemoryAddressBar::new(address)),
        )
    }

    /// Controller at the application address, with no callback pending
    pub fn home_controller(&self) -> Result<AuthController> {
        let home = Url::parse(&self.config.identity.redirect_uri)
            .context("Invalid redirect URI")?;
        Ok(self.controller(home))
    }

    pub fn api(&self) -> Result<ActivityApiClient> {
        let store: Arc<dyn SessionStore> = self.store.clone();
        ActivityApiClient::new(&self.config.api, Session::new(store))
            .context("Invalid API configuration")
    }
}
