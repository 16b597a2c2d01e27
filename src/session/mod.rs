// ABOUTME: Session store abstraction holding transient login artifacts and the resulting token/user
// ABOUTME: Typed Session view over a pluggable key-value backend (memory or JSON file)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Session Store
//!
//! A string key-value store with the same shape as browser `sessionStorage`.
//! Backends implement [`SessionStore`]; the controller and the API client go
//! through the typed [`Session`] view so key names live in one place.
//!
//! Only the auth controller writes. The API client reads the access token and
//! user claims to authenticate its requests.

/// JSON file backend persisting across process runs
pub mod file;
/// Process-scoped in-memory backend
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;

use crate::constants::session_keys;
use crate::errors::StorageError;
use crate::models::UserClaims;
use std::sync::Arc;
use tracing::warn;

/// Key-value backend for session data
pub trait SessionStore: Send + Sync {
    /// Value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove every key
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    fn clear(&self) -> Result<(), StorageError>;

    /// Keys currently present, in no particular order
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

/// Typed view over a [`SessionStore`]
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Wrap a backend
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Underlying backend
    #[must_use]
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Stored access token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    pub fn access_token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(session_keys::ACCESS_TOKEN)
    }

    /// Stored refresh token
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    pub fn refresh_token(&self) -> Result<Option<String>, StorageError> {
        self.store.get(session_keys::REFRESH_TOKEN)
    }

    /// Stored PKCE verifier of the in-flight login
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    pub fn code_verifier(&self) -> Result<Option<String>, StorageError> {
        self.store.get(session_keys::CODE_VERIFIER)
    }

    /// Stored anti-forgery state of the in-flight login
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    pub fn state(&self) -> Result<Option<String>, StorageError> {
        self.store.get(session_keys::STATE)
    }

    /// Stored user claims
    ///
    /// An entry that does not parse is reported at warn level and treated as
    /// absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read
    pub fn user(&self) -> Result<Option<UserClaims>, StorageError> {
        let Some(raw) = self.store.get(session_keys::USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Failed to parse user from session store");
                Ok(None)
            }
        }
    }

    /// Persist verifier and state for a new login attempt
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    pub fn begin_login(&self, code_verifier: &str, state: &str) -> Result<(), StorageError> {
        self.store.set(session_keys::CODE_VERIFIER, code_verifier)?;
        self.store.set(session_keys::STATE, state)
    }

    /// Persist tokens from a successful exchange or refresh
    ///
    /// A missing refresh token removes any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    pub fn store_tokens(
        &self,
        access_token: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), StorageError> {
        self.store.set(session_keys::ACCESS_TOKEN, access_token)?;
        match refresh_token {
            Some(token) => self.store.set(session_keys::REFRESH_TOKEN, token),
            None => self.store.remove(session_keys::REFRESH_TOKEN),
        }
    }

    /// Persist user claims
    ///
    /// # Errors
    ///
    /// Returns an error if the claims cannot be serialized or written
    pub fn store_user(&self, user: &UserClaims) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(session_keys::USER, &raw)
    }

    /// Drop verifier and state once the exchange is over
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    pub fn finish_login(&self) -> Result<(), StorageError> {
        self.store.remove(session_keys::CODE_VERIFIER)?;
        self.store.remove(session_keys::STATE)
    }

    /// Remove everything
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.clear()
    }
}
