// ABOUTME: Identity provider configuration and the endpoint URLs derived from it
// ABOUTME: Keycloak realm layout, authorization URL construction and logout redirect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{defaults, env_vars, keycloak_paths, oauth};
use crate::errors::AuthError;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;
use url::Url;

/// Identity provider settings for the public PKCE client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProviderConfig {
    /// Provider base URL (e.g. `http://localhost:8181`)
    pub url: String,
    /// Realm hosting the client
    pub realm: String,
    /// Public client identifier
    pub client_id: String,
    /// Application address registered as redirect and post-logout target
    pub redirect_uri: String,
}

impl Default for IdentityProviderConfig {
    fn default() -> Self {
        Self {
            url: defaults::KEYCLOAK_URL.to_owned(),
            realm: defaults::KEYCLOAK_REALM.to_owned(),
            client_id: defaults::KEYCLOAK_CLIENT_ID.to_owned(),
            redirect_uri: defaults::REDIRECT_URI.to_owned(),
        }
    }
}

impl IdentityProviderConfig {
    /// Load from `KEYCLOAK_URL`, `KEYCLOAK_REALM`, `KEYCLOAK_CLIENT_ID` and `OAUTH_REDIRECT_URI`
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            url: env::var(env_vars::KEYCLOAK_URL)
                .unwrap_or_else(|_| defaults::KEYCLOAK_URL.to_owned()),
            realm: env::var(env_vars::KEYCLOAK_REALM)
                .unwrap_or_else(|_| defaults::KEYCLOAK_REALM.to_owned()),
            client_id: env::var(env_vars::KEYCLOAK_CLIENT_ID)
                .unwrap_or_else(|_| defaults::KEYCLOAK_CLIENT_ID.to_owned()),
            redirect_uri: env::var(env_vars::REDIRECT_URI)
                .unwrap_or_else(|_| defaults::REDIRECT_URI.to_owned()),
        };
        info!(
            url = %config.url,
            realm = %config.realm,
            client_id = %config.client_id,
            "Loaded identity provider configuration"
        );
        config
    }

    /// Parse and validate every provider endpoint
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidConfiguration`] if the base URL or redirect URI
    /// is not an absolute URL, or any field is empty
    pub fn endpoints(&self) -> Result<ProviderEndpoints, AuthError> {
        if self.realm.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration("realm is empty".to_owned()));
        }
        if self.client_id.trim().is_empty() {
            return Err(AuthError::InvalidConfiguration(
                "client_id is empty".to_owned(),
            ));
        }

        let base = Url::parse(&self.url)
            .map_err(|e| AuthError::InvalidConfiguration(format!("url '{}': {e}", self.url)))?;
        if base.cannot_be_a_base() {
            return Err(AuthError::InvalidConfiguration(format!(
                "url '{}' cannot be a base URL",
                self.url
            )));
        }
        Url::parse(&self.redirect_uri).map_err(|e| {
            AuthError::InvalidConfiguration(format!("redirect_uri '{}': {e}", self.redirect_uri))
        })?;

        let realm_endpoint = |path: &str| -> Result<Url, AuthError> {
            let mut endpoint = base.clone();
            {
                let mut segments = endpoint.path_segments_mut().map_err(|()| {
                    AuthError::InvalidConfiguration(format!("url '{}' has no path", self.url))
                })?;
                segments.pop_if_empty().push("realms").push(&self.realm);
                segments.extend(path.split('/'));
            }
            Ok(endpoint)
        };

        Ok(ProviderEndpoints {
            authorization: realm_endpoint(keycloak_paths::AUTH)?,
            token: realm_endpoint(keycloak_paths::TOKEN)?,
            userinfo: realm_endpoint(keycloak_paths::USERINFO)?,
            logout: realm_endpoint(keycloak_paths::LOGOUT)?,
            client_id: self.client_id.clone(),
            redirect_uri: self.redirect_uri.clone(),
        })
    }
}

/// Validated provider endpoints plus the client identity sent to them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    /// Authorization endpoint (browser redirect target for login)
    pub authorization: Url,
    /// Token endpoint (code exchange and refresh)
    pub token: Url,
    /// User-info endpoint
    pub userinfo: Url,
    /// End-session endpoint
    pub logout: Url,
    /// Public client identifier
    pub client_id: String,
    /// Application address, sent verbatim (validated as an absolute URL)
    pub redirect_uri: String,
}

impl ProviderEndpoints {
    /// Authorization request URL for a PKCE login
    #[must_use]
    pub fn authorization_url(&self, code_challenge: &str, state: &str) -> Url {
        let mut url = self.authorization.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", oauth::RESPONSE_TYPE_CODE)
            .append_pair("scope", &oauth::SCOPES.join(" "))
            .append_pair("code_challenge", code_challenge)
            .append_pair("code_challenge_method", oauth::CODE_CHALLENGE_METHOD)
            .append_pair("state", state);
        url
    }

    /// End-session URL returning to the application afterwards
    #[must_use]
    pub fn logout_url(&self) -> Url {
        let mut url = self.logout.clone();
        url.query_pairs_mut()
            .append_pair("redirect_uri", &self.redirect_uri);
        url
    }
}
