// ABOUTME: System-wide constants for the fitness client
// ABOUTME: Session keys, OpenID Connect paths, PKCE sizes, HTTP headers and environment defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded protocol values and the defaults used when an environment
//! variable is not set.

/// Keys used in the session key-value store
pub mod session_keys {
    /// Access token returned by the token endpoint
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Refresh token returned by the token endpoint
    pub const REFRESH_TOKEN: &str = "refresh_token";
    /// Serialized user-info claims
    pub const USER: &str = "user";
    /// PKCE code verifier for the in-flight login attempt
    pub const CODE_VERIFIER: &str = "code_verifier";
    /// Anti-forgery state for the in-flight login attempt
    pub const STATE: &str = "state";

    /// Every key the controller ever writes
    pub const ALL: [&str; 5] = [ACCESS_TOKEN, REFRESH_TOKEN, USER, CODE_VERIFIER, STATE];
}

/// `OAuth2` / `OpenID Connect` protocol values
pub mod oauth {
    /// Response type requested from the authorization endpoint
    pub const RESPONSE_TYPE_CODE: &str = "code";
    /// Grant type for the authorization code exchange
    pub const GRANT_TYPE_AUTHORIZATION_CODE: &str = "authorization_code";
    /// Grant type for refreshing an access token
    pub const GRANT_TYPE_REFRESH_TOKEN: &str = "refresh_token";
    /// `PKCE` challenge method (SHA-256)
    pub const CODE_CHALLENGE_METHOD: &str = "S256";
    /// Scopes requested on login
    pub const SCOPES: [&str; 3] = ["openid", "profile", "email"];
    /// Number of random bytes behind a code verifier (43 base64url characters)
    pub const CODE_VERIFIER_BYTES: usize = 32;
    /// Number of random bytes behind the anti-forgery state (22 base64url characters)
    pub const STATE_BYTES: usize = 16;
    /// Callback query parameter carrying the authorization code
    pub const CALLBACK_CODE_PARAM: &str = "code";
    /// Callback query parameter carrying the state
    pub const CALLBACK_STATE_PARAM: &str = "state";
    /// Fallback message when the token endpoint gives no `error_description`
    pub const TOKEN_EXCHANGE_FAILED: &str = "Token exchange failed";
    /// Message surfaced when user-info retrieval fails
    pub const USER_INFO_FAILED: &str = "Failed to fetch user information";
}

/// Keycloak realm endpoint layout
pub mod keycloak_paths {
    /// Authorization endpoint, relative to the realm
    pub const AUTH: &str = "protocol/openid-connect/auth";
    /// Token endpoint, relative to the realm
    pub const TOKEN: &str = "protocol/openid-connect/token";
    /// User-info endpoint, relative to the realm
    pub const USERINFO: &str = "protocol/openid-connect/userinfo";
    /// End-session endpoint, relative to the realm
    pub const LOGOUT: &str = "protocol/openid-connect/logout";
}

/// HTTP header names
pub mod headers {
    /// Header the backend reads the caller's subject from
    pub const USER_ID: &str = "X-User-ID";
}

/// Defaults applied when the corresponding environment variable is absent
pub mod defaults {
    /// Identity provider base URL
    pub const KEYCLOAK_URL: &str = "http://localhost:8181";
    /// Identity provider realm
    pub const KEYCLOAK_REALM: &str = "fitness-oauth2";
    /// Public client identifier
    pub const KEYCLOAK_CLIENT_ID: &str = "oauth2-pkce-client";
    /// Application address the provider redirects back to
    pub const REDIRECT_URI: &str = "http://localhost:5173";
    /// Backend REST API base URL
    pub const API_BASE: &str = "http://localhost:8080/api";
    /// Request timeout for identity provider calls
    pub const OAUTH_TIMEOUT_SECS: u64 = 15;
    /// Connect timeout for identity provider calls
    pub const OAUTH_CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Request timeout for backend API calls
    pub const API_TIMEOUT_SECS: u64 = 60;
    /// Connect timeout for backend API calls
    pub const API_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Directory under the platform data dir holding the session file
    pub const SESSION_DIR: &str = "fitness-client";
    /// Session file name
    pub const SESSION_FILE: &str = "session.json";
}

/// Environment variable names
pub mod env_vars {
    /// Identity provider base URL
    pub const KEYCLOAK_URL: &str = "KEYCLOAK_URL";
    /// Identity provider realm
    pub const KEYCLOAK_REALM: &str = "KEYCLOAK_REALM";
    /// Public client identifier
    pub const KEYCLOAK_CLIENT_ID: &str = "KEYCLOAK_CLIENT_ID";
    /// Redirect target registered with the provider
    pub const REDIRECT_URI: &str = "OAUTH_REDIRECT_URI";
    /// Backend REST API base URL
    pub const API_BASE: &str = "FITNESS_API_BASE";
    /// Identity provider request timeout (seconds)
    pub const OAUTH_TIMEOUT_SECS: &str = "OAUTH_HTTP_TIMEOUT_SECS";
    /// Identity provider connect timeout (seconds)
    pub const OAUTH_CONNECT_TIMEOUT_SECS: &str = "OAUTH_HTTP_CONNECT_TIMEOUT_SECS";
    /// Backend request timeout (seconds)
    pub const API_TIMEOUT_SECS: &str = "API_HTTP_TIMEOUT_SECS";
    /// Backend connect timeout (seconds)
    pub const API_CONNECT_TIMEOUT_SECS: &str = "API_HTTP_CONNECT_TIMEOUT_SECS";
    /// Session file override
    pub const SESSION_FILE: &str = "FITNESS_SESSION_FILE";
}

/// Service identification for structured logs
pub mod service_names {
    /// Name reported by the logging layer
    pub const FITNESS_CLIENT: &str = "fitness-client";
}
