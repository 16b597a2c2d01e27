// ABOUTME: Main library entry point for the fitness activity tracker client
// ABOUTME: PKCE login against Keycloak plus authenticated access to the activity backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Fitness Client
//!
//! Client side of the fitness activity tracker: the `OAuth2` authorization
//! code flow with `PKCE` against a Keycloak realm, and a bearer-authenticated
//! client for the activity and recommendation services.
//!
//! ## Architecture
//!
//! - **PKCE**: verifier, challenge and anti-forgery state generation
//! - **Session**: key-value store for transient login artifacts and tokens
//! - **`OAuth2` client**: code exchange, refresh and user-info calls
//! - **Auth**: controller owning the login lifecycle and exposed state
//! - **API**: activity CRUD and recommendation retrieval
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fitness_client::auth::{AuthController, MemoryAddressBar, Navigation};
//! use fitness_client::config::ClientConfig;
//! use fitness_client::oauth2_client::OAuth2Client;
//! use fitness_client::session::MemorySessionStore;
//! use url::Url;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ClientConfig::from_env();
//!     let endpoints = config.identity.endpoints()?;
//!     let provider = Arc::new(OAuth2Client::with_timeouts(endpoints.clone(), config.oauth_timeouts));
//!     let address_bar = Arc::new(MemoryAddressBar::new(Url::parse(&config.identity.redirect_uri)?));
//!
//!     let mut auth = AuthController::new(
//!         endpoints,
//!         provider,
//!         Arc::new(MemorySessionStore::new()),
//!         address_bar,
//!     );
//!     auth.initialize().await;
//!
//!     if !auth.state().is_authenticated {
//!         let Navigation::Redirect(url) = auth.login()?;
//!         println!("Open {url} to sign in");
//!     }
//!     Ok(())
//! }
//! ```

/// Activity and recommendation REST client
pub mod api;

/// Authentication controller and exposed state
pub mod auth;

/// Configuration loaded from the environment
pub mod config;

/// Protocol constants, session keys and defaults
pub mod constants;

/// Error types and codes
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Wire and domain models
pub mod models;

/// `OAuth2` client for the identity provider
pub mod oauth2_client;

/// `PKCE` parameter generation
pub mod pkce;

/// Session storage backends
pub mod session;

/// Shared utilities
pub mod utils;
