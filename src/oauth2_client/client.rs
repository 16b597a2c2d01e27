// ABOUTME: OAuth2 client for the public PKCE client registered with the identity provider
// ABOUTME: Authorization code exchange, refresh grant and user-info retrieval over reqwest
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::IdentityProvider;
use crate::config::{HttpTimeouts, ProviderEndpoints};
use crate::constants::oauth;
use crate::errors::AuthError;
use crate::models::{TokenSet, UserClaims};
use crate::utils::http_client::oauth_client;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Error body returned by the token endpoint (RFC 6749 section 5.2)
#[derive(Debug, Default, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// `OAuth2` client talking to the provider's token and user-info endpoints
pub struct OAuth2Client {
    endpoints: ProviderEndpoints,
    client: Client,
}

impl OAuth2Client {
    /// Create a client with the default identity provider timeouts
    #[must_use]
    pub fn new(endpoints: ProviderEndpoints) -> Self {
        Self::with_timeouts(endpoints, HttpTimeouts::oauth_defaults())
    }

    /// Create a client with explicit timeouts
    #[must_use]
    pub fn with_timeouts(endpoints: ProviderEndpoints, timeouts: HttpTimeouts) -> Self {
        Self {
            endpoints,
            client: oauth_client(timeouts),
        }
    }

    /// Create a client reusing an existing `reqwest` client
    #[must_use]
    pub const fn with_http_client(endpoints: ProviderEndpoints, client: Client) -> Self {
        Self { endpoints, client }
    }

    /// Provider endpoints this client targets
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    async fn post_token_form(&self, params: &[(&str, &str)]) -> Result<TokenSet, AuthError> {
        let response = self
            .client
            .post(self.endpoints.token.clone())
            .form(params)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Token endpoint request failed");
                AuthError::TokenExchangeFailed(format!("{}: {e}", oauth::TOKEN_EXCHANGE_FAILED))
            })?;

        if !response.status().is_success() {
            return Err(Self::token_error(response).await);
        }

        response.json::<TokenSet>().await.map_err(|e| {
            warn!(error = %e, "Token endpoint returned an unreadable body");
            AuthError::TokenExchangeFailed(format!("{}: {e}", oauth::TOKEN_EXCHANGE_FAILED))
        })
    }

    /// Turn a non-success token response into an error, preferring the provider's description
    async fn token_error(response: Response) -> AuthError {
        let status = response.status();
        let body: TokenErrorResponse = response.json().await.unwrap_or_default();
        warn!(
            status = status.as_u16(),
            error = body.error.as_deref().unwrap_or("unknown"),
            "Token endpoint rejected the request"
        );
        AuthError::TokenExchangeFailed(
            body.error_description
                .filter(|description| !description.is_empty())
                .unwrap_or_else(|| oauth::TOKEN_EXCHANGE_FAILED.to_owned()),
        )
    }
}

#[async_trait]
impl IdentityProvider for OAuth2Client {
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenSet, AuthError> {
        debug!(endpoint = %self.endpoints.token, "Exchanging authorization code");
        let params = [
            ("grant_type", oauth::GRANT_TYPE_AUTHORIZATION_CODE),
            ("client_id", self.endpoints.client_id.as_str()),
            ("code", code),
            ("redirect_uri", self.endpoints.redirect_uri.as_str()),
            ("code_verifier", code_verifier),
        ];
        let tokens = self.post_token_form(&params).await?;
        info!(
            has_refresh_token = tokens.refresh_token.is_some(),
            expires_in = tokens.expires_in,
            "Authorization code exchanged"
        );
        Ok(tokens)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        debug!(endpoint = %self.endpoints.token, "Refreshing access token");
        let params = [
            ("grant_type", oauth::GRANT_TYPE_REFRESH_TOKEN),
            ("client_id", self.endpoints.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];
        self.post_token_form(&params).await
    }

    async fn fetch_user_info(&self, access_token: &str) -> Result<UserClaims, AuthError> {
        let response = self
            .client
            .get(self.endpoints.userinfo.clone())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::UserInfoFetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::UserInfoFetchFailed(format!(
                "user-info endpoint returned {status}"
            )));
        }

        response
            .json::<UserClaims>()
            .await
            .map_err(|e| AuthError::UserInfoFetchFailed(e.to_string()))
    }
}
