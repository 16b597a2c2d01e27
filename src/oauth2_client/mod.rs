// ABOUTME: OAuth 2.0 client module for the identity provider
// ABOUTME: IdentityProvider trait plus the reqwest-backed token exchange client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # OAuth 2.0 Client Module
//!
//! The auth controller talks to the identity provider only through
//! [`IdentityProvider`], so tests can stand in a scripted provider.
//! [`OAuth2Client`] is the network implementation:
//! - authorization code exchange with a `PKCE` verifier
//! - refresh token grant
//! - user-info retrieval with a bearer credential

/// Core OAuth 2.0 client implementation
pub mod client;

pub use client::OAuth2Client;

use crate::errors::AuthError;
use crate::models::{TokenSet, UserClaims};
use async_trait::async_trait;

/// Network operations the login flow needs from the identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange an authorization code and its `PKCE` verifier for tokens
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExchangeFailed`] with the provider's
    /// `error_description` when present
    async fn exchange_code(&self, code: &str, code_verifier: &str) -> Result<TokenSet, AuthError>;

    /// Obtain a new access token with a refresh token
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExchangeFailed`] if the grant is rejected
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenSet, AuthError>;

    /// Retrieve the claims of the user owning `access_token`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserInfoFetchFailed`] on a non-success response
    async fn fetch_user_info(&self, access_token: &str) -> Result<UserClaims, AuthError>;
}
