// ABOUTME: Shared test utilities for the fitness client integration tests
// ABOUTME: Scripted identity provider, controller harness and in-process HTTP servers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
//! Shared test utilities for `fitness_client`

use async_trait::async_trait;
use axum::Router;
use fitness_client::auth::{AuthController, MemoryAddressBar};
use fitness_client::config::{IdentityProviderConfig, ProviderEndpoints};
use fitness_client::errors::AuthError;
use fitness_client::models::{TokenSet, UserClaims};
use fitness_client::oauth2_client::IdentityProvider;
use fitness_client::session::{MemorySessionStore, SessionStore};
use serde_json::json;
use std::sync::{Arc, Mutex, Once};
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Application address used as redirect URI throughout the tests
pub const APP_URL: &str = "http://localhost:5173";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn sample_claims() -> UserClaims {
    serde_json::from_value(json!({
        "sub": "user-123",
        "preferred_username": "jdoe",
        "name": "Jane Doe",
        "email": "jane@example.com"
    }))
    .unwrap()
}

pub fn token_set(access: &str, refresh: Option<&str>) -> TokenSet {
    TokenSet {
        access_token: access.to_owned(),
        refresh_token: refresh.map(str::to_owned),
        token_type: "Bearer".to_owned(),
        expires_in: Some(300),
        scope: Some("openid profile email".to_owned()),
        id_token: None,
    }
}

/// Endpoints of the default local Keycloak realm
pub fn default_endpoints() -> ProviderEndpoints {
    IdentityProviderConfig::default().endpoints().unwrap()
}

/// Endpoints of a realm served from `base_url`
pub fn endpoints_at(base_url: &str) -> ProviderEndpoints {
    IdentityProviderConfig {
        url: base_url.to_owned(),
        realm: "fitness-oauth2".to_owned(),
        client_id: "oauth2-pkce-client".to_owned(),
        redirect_uri: APP_URL.to_owned(),
    }
    .endpoints()
    .unwrap()
}

// ============================================================================
// Scripted identity provider
// ============================================================================

/// Identity provider returning canned results and recording every call
pub struct ScriptedProvider {
    exchange_result: Mutex<Result<TokenSet, AuthError>>,
    user_info_result: Mutex<Result<UserClaims, AuthError>>,
    refresh_result: Mutex<Result<TokenSet, AuthError>>,
    hang_exchange: bool,
    pub exchange_calls: Mutex<Vec<(String, String)>>,
    pub user_info_calls: Mutex<Vec<String>>,
    pub refresh_calls: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            exchange_result: Mutex::new(Ok(token_set("access-1", Some("refresh-1")))),
            user_info_result: Mutex::new(Ok(sample_claims())),
            refresh_result: Mutex::new(Ok(token_set("access-2", Some("refresh-2")))),
            hang_exchange: false,
            exchange_calls: Mutex::new(Vec::new()),
            user_info_calls: Mutex::new(Vec::new()),
            refresh_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_exchange_result(self, result: Result<TokenSet, AuthError>) -> Self {
        *self.exchange_result.lock().unwrap() = result;
        self
    }

    pub fn with_user_info_result(self, result: Result<UserClaims, AuthError>) -> Self {
        *self.user_info_result.lock().unwrap() = result;
        self
    }

    pub fn with_refresh_result(self, result: Result<TokenSet, AuthError>) -> Self {
        *self.refresh_result.lock().unwrap() = result;
        self
    }

    /// Code exchange never completes
    pub fn hanging(mut self) -> Self {
        self.hang_exchange = true;
        self
    }

    pub fn exchange_count(&self) -> usize {
        self.exchange_calls.lock().unwrap().len()
    }
}

impl Default for ScriptedProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenSet, AuthError> {
        self.exchange_calls
            .lock()
            .unwrap()
            .push((code.to_owned(), code_verifier.to_owned()));
        if self.hang_exchange {
            std::future::pending::<()>().await;
        }
        self.exchange_result.lock().unwrap().clone()
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        self.refresh_calls
            .lock()
            .unwrap()
            .push(refresh_token.to_owned());
        self.refresh_result.lock().unwrap().clone()
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserClaims, AuthError> {
        self.user_info_calls
            .lock()
            .unwrap()
            .push(access_token.to_owned());
        self.user_info_result.lock().unwrap().clone()
    }
}

// ============================================================================
// Controller harness
// ============================================================================

/// Controller wired to in-memory collaborators that tests can inspect
pub struct Harness {
    pub provider: Arc<ScriptedProvider>,
    pub store: Arc<MemorySessionStore>,
    pub address_bar: Arc<MemoryAddressBar>,
}

impl Harness {
    pub fn new(provider: ScriptedProvider) -> Self {
        init_test_logging();
        Self {
            provider: Arc::new(provider),
            store: Arc::new(MemorySessionStore::new()),
            address_bar: Arc::new(MemoryAddressBar::new(Url::parse(APP_URL).unwrap())),
        }
    }

    /// Fresh controller over the shared store and address bar, like a page load
    pub fn page_load(&self) -> AuthController {
        let store: Arc<dyn SessionStore> = self.store.clone();
        AuthController::new(
            default_endpoints(),
            self.provider.clone(),
            store,
            self.address_bar.clone(),
        )
    }

    /// Point the address bar somewhere else
    pub fn navigate(&self, address: &str) {
        use fitness_client::auth::AddressBar;
        self.address_bar.replace(Url::parse(address).unwrap());
    }

    pub fn address(&self) -> String {
        use fitness_client::auth::AddressBar;
        self.address_bar.current().to_string()
    }

    pub fn stored(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap()
    }

    pub fn stored_keys(&self) -> Vec<String> {
        let mut keys = self.store.keys().unwrap();
        keys.sort();
        keys
    }
}

/// Query parameter of `url` by name
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

// ============================================================================
// In-process HTTP servers
// ============================================================================

/// Serve `app` on an ephemeral localhost port and return its base URL
pub async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
