// ABOUTME: Environment configuration for the fitness client
// ABOUTME: Backend API location, HTTP timeouts and session file placement
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration; there is no config file.

use super::oauth::IdentityProviderConfig;
use crate::constants::{defaults, env_vars};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

/// Request and connect timeouts for one HTTP client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpTimeouts {
    /// Whole-request timeout
    pub request: Duration,
    /// TCP/TLS connect timeout
    pub connect: Duration,
}

impl HttpTimeouts {
    /// Defaults for identity provider calls (15s / 5s)
    #[must_use]
    pub const fn oauth_defaults() -> Self {
        Self {
            request: Duration::from_secs(defaults::OAUTH_TIMEOUT_SECS),
            connect: Duration::from_secs(defaults::OAUTH_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Defaults for backend API calls (60s / 10s)
    #[must_use]
    pub const fn api_defaults() -> Self {
        Self {
            request: Duration::from_secs(defaults::API_TIMEOUT_SECS),
            connect: Duration::from_secs(defaults::API_CONNECT_TIMEOUT_SECS),
        }
    }
}

/// Backend REST API settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL, e.g. `http://localhost:8080/api`
    pub base_url: String,
    /// HTTP timeouts
    pub timeouts: HttpTimeouts,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::API_BASE.to_owned(),
            timeouts: HttpTimeouts::api_defaults(),
        }
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Identity provider settings
    pub identity: IdentityProviderConfig,
    /// Timeouts for identity provider calls
    pub oauth_timeouts: HttpTimeouts,
    /// Backend API settings
    pub api: ApiConfig,
    /// Session file override; `None` means the platform default location
    pub session_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            identity: IdentityProviderConfig::default(),
            oauth_timeouts: HttpTimeouts::oauth_defaults(),
            api: ApiConfig::default(),
            session_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        let oauth_timeouts = HttpTimeouts {
            request: env_secs(
                env_vars::OAUTH_TIMEOUT_SECS,
                defaults::OAUTH_TIMEOUT_SECS,
            ),
            connect: env_secs(
                env_vars::OAUTH_CONNECT_TIMEOUT_SECS,
                defaults::OAUTH_CONNECT_TIMEOUT_SECS,
            ),
        };
        let api = ApiConfig {
            base_url: env::var(env_vars::API_BASE).unwrap_or_else(|_| defaults::API_BASE.to_owned()),
            timeouts: HttpTimeouts {
                request: env_secs(env_vars::API_TIMEOUT_SECS, defaults::API_TIMEOUT_SECS),
                connect: env_secs(
                    env_vars::API_CONNECT_TIMEOUT_SECS,
                    defaults::API_CONNECT_TIMEOUT_SECS,
                ),
            },
        };

        Self {
            identity: IdentityProviderConfig::from_env(),
            oauth_timeouts,
            api,
            session_file: env::var_os(env_vars::SESSION_FILE).map(PathBuf::from),
        }
    }
}

/// Seconds from `key`, or `default` when unset or unparsable
fn env_secs(key: &str, default: u64) -> Duration {
    let secs = match env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "Ignoring invalid timeout, using default");
            default
        }),
        Err(_) => default,
    };
    Duration::from_secs(secs)
}
