// ABOUTME: User-info claims returned by the OpenID Connect provider
// ABOUTME: Opaque JSON object with accessors for subject and display name
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims from the user-info endpoint
///
/// Kept as an untyped mapping: the provider decides which claims it releases
/// and the client only ever reads a handful of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserClaims(Map<String, Value>);

impl UserClaims {
    /// Wrap a raw claims object
    #[must_use]
    pub const fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// String claim by name, `None` if absent or not a string
    #[must_use]
    pub fn get_str(&self, claim: &str) -> Option<&str> {
        self.0.get(claim).and_then(Value::as_str)
    }

    /// Subject identifier, forwarded to the backend as the user id
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.get_str("sub")
    }

    /// Preferred username, then full name, then email
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.get_str("preferred_username")
            .or_else(|| self.get_str("name"))
            .or_else(|| self.get_str("email"))
    }

    /// Email claim
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// Raw claims
    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for UserClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
