// ABOUTME: Configuration management module for the fitness client
// ABOUTME: Identity provider endpoints, backend API settings and HTTP timeouts from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: backend API, timeouts, session file
//! - **OAuth**: identity provider realm and the endpoints derived from it

/// Environment configuration
pub mod environment;
/// Identity provider configuration
pub mod oauth;

pub use environment::{ApiConfig, ClientConfig, HttpTimeouts};
pub use oauth::{IdentityProviderConfig, ProviderEndpoints};
