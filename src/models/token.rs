// ABOUTME: Token endpoint response model for authorization code and refresh grants
// ABOUTME: Access token plus optional refresh token, lifetime and granted scope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Tokens issued by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer credential for API calls
    pub access_token: String,
    /// Credential for the refresh grant, if the provider issued one
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type (usually "Bearer")
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Space-separated granted scopes
    #[serde(default)]
    pub scope: Option<String>,
    /// `OpenID Connect` ID token
    #[serde(default)]
    pub id_token: Option<String>,
}

fn default_token_type() -> String {
    "Bearer".to_owned()
}
