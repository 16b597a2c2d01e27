// ABOUTME: Authentication state exposed to consumers of the auth controller
// ABOUTME: AuthState projection, lifecycle status and the navigation the caller must perform
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::UserClaims;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};
use url::Url;

/// Where the login lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    /// No confirmed user
    Anonymous,
    /// A login, callback, user-info or refresh call is in flight
    Authenticating,
    /// User claims confirmed by the identity provider
    Authenticated,
}

impl Display for AuthStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
        })
    }
}

/// Read-only view of the authentication state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthState {
    /// Claims of the signed-in user
    pub user: Option<UserClaims>,
    /// Current access token
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// An auth operation is in progress
    pub loading: bool,
    /// Last error message shown to the user
    pub error: Option<String>,
    /// True iff `user` is present
    pub is_authenticated: bool,
}

impl AuthState {
    /// State before `initialize` has run
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
            error: None,
            is_authenticated: false,
        }
    }

    pub(crate) fn set_user(&mut self, user: Option<UserClaims>) {
        self.is_authenticated = user.is_some();
        self.user = user;
    }

    pub(crate) fn sign_out(&mut self) {
        self.set_user(None);
        self.token = None;
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// Browser navigation the caller has to carry out
///
/// A redirect ends the current page's part in the flow; nothing after it
/// should depend on controller state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Send the user agent to this URL
    Redirect(Url),
}

impl Navigation {
    /// Target URL
    #[must_use]
    pub const fn url(&self) -> &Url {
        match self {
            Self::Redirect(url) => url,
        }
    }
}
