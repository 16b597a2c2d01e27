// ABOUTME: Error taxonomy for the login flow, session storage and backend API calls
// ABOUTME: Maps every error onto a stable ErrorCode for consistent reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Error Handling
//!
//! Three error families, one per boundary:
//! - [`AuthError`] for everything the auth controller can recover from
//! - [`StorageError`] for session store backends
//! - [`ApiError`] for the activity/recommendation REST client
//!
//! Each exposes [`ErrorCode`] so callers can report failures uniformly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication (1000-1999)
    /// Backend answered 401
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired = 1000,
    /// Credentials were presented but rejected
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid = 1001,

    // Resource Management (4000-4999)
    /// Backend returned 404
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// Identity provider or backend answered with an error
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// Identity provider or backend could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// Code exchange, refresh or user-info call failed
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,

    // Configuration (6000-6999)
    /// Endpoint or client configuration is unusable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Local failure such as an unavailable random source
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Session store could not be read or written
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Payload could not be encoded or decoded
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Stable identifier, identical to the serialized form
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::AuthInvalid => "AUTH_INVALID",
            Self::ResourceNotFound => "RESOURCE_NOT_FOUND",
            Self::ExternalServiceError => "EXTERNAL_SERVICE_ERROR",
            Self::ExternalServiceUnavailable => "EXTERNAL_SERVICE_UNAVAILABLE",
            Self::ExternalAuthFailed => "EXTERNAL_AUTH_FAILED",
            Self::ConfigInvalid => "CONFIG_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session store failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    /// Backing file could not be read or written
    #[error("session storage I/O error: {0}")]
    Io(String),

    /// Stored content could not be (de)serialized
    #[error("session storage serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Error code for reporting
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Io(_) => ErrorCode::StorageError,
            Self::Serialization(_) => ErrorCode::SerializationError,
        }
    }
}

/// Failures of the login flow
///
/// All of these are recovered by the auth controller: the session is cleared,
/// the message lands in `AuthState::error` and the user stays anonymous.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Callback `state` does not match the one stored at login
    #[error("Invalid state parameter")]
    StateMismatch,

    /// Token endpoint rejected the exchange or could not be reached
    #[error("{0}")]
    TokenExchangeFailed(String),

    /// User-info endpoint returned a non-success response or could not be reached
    #[error("Failed to fetch user information: {0}")]
    UserInfoFetchFailed(String),

    /// The operating system random source failed
    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    /// Identity provider settings could not be turned into endpoints
    #[error("Invalid identity provider configuration: {0}")]
    InvalidConfiguration(String),

    /// The session store failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Error code for reporting
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::StateMismatch => ErrorCode::AuthInvalid,
            Self::TokenExchangeFailed(_) | Self::UserInfoFetchFailed(_) => {
                ErrorCode::ExternalAuthFailed
            }
            Self::RandomSourceUnavailable(_) => ErrorCode::InternalError,
            Self::InvalidConfiguration(_) => ErrorCode::ConfigInvalid,
            Self::Storage(err) => err.code(),
        }
    }
}

/// Failures talking to the activity/recommendation backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request never produced a response (connect, timeout, TLS)
    #[error("API request failed: {0}")]
    Network(#[source] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or canonical reason
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode API response: {0}")]
    Decode(String),

    /// Endpoint URL could not be built from the base URL
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Reading credentials from the session failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Error code for reporting
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Network(_) => ErrorCode::ExternalServiceUnavailable,
            Self::Status { status: 401, .. } => ErrorCode::AuthRequired,
            Self::Status { status: 404, .. } => ErrorCode::ResourceNotFound,
            Self::Status { .. } => ErrorCode::ExternalServiceError,
            Self::Decode(_) => ErrorCode::SerializationError,
            Self::InvalidUrl(_) => ErrorCode::ConfigInvalid,
            Self::Storage(err) => err.code(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
