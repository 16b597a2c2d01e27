// ABOUTME: PKCE parameter generation for the OAuth2 authorization code flow
// ABOUTME: Random verifier and state values plus the S256 code challenge (RFC 7636)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # PKCE Parameter Generator
//!
//! Verifier and state are raw random bytes encoded as base64url without
//! padding. The challenge is the base64url (no padding) SHA-256 digest of the
//! verifier string.
//!
//! The random source is injectable so that a failing source can be exercised;
//! production code uses the operating system generator.

use crate::constants::oauth::{CODE_CHALLENGE_METHOD, CODE_VERIFIER_BYTES, STATE_BYTES};
use crate::errors::AuthError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Compute the `S256` code challenge for a verifier
#[must_use]
pub fn generate_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Generate a code verifier from the operating system random source
///
/// # Errors
///
/// Returns [`AuthError::RandomSourceUnavailable`] if the OS generator fails
pub fn generate_verifier() -> Result<String, AuthError> {
    PkceGenerator::new().generate_verifier()
}

/// Generate an anti-forgery state value from the operating system random source
///
/// # Errors
///
/// Returns [`AuthError::RandomSourceUnavailable`] if the OS generator fails
pub fn generate_state() -> Result<String, AuthError> {
    PkceGenerator::new().generate_state()
}

/// Everything `login()` needs from one generator pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkceParams {
    /// Secret kept in the session until the code exchange
    pub code_verifier: String,
    /// SHA-256 of the verifier, sent on the authorization request
    pub code_challenge: String,
    /// Always "S256"
    pub code_challenge_method: &'static str,
    /// Anti-forgery value echoed back on the callback
    pub state: String,
}

impl PkceParams {
    /// Fresh parameters from the operating system random source
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RandomSourceUnavailable`] if the OS generator fails
    pub fn generate() -> Result<Self, AuthError> {
        PkceGenerator::new().generate()
    }
}

/// Source of PKCE values, generic over the random number generator
pub struct PkceGenerator<R = OsRng> {
    rng: R,
}

impl PkceGenerator<OsRng> {
    /// Generator backed by the operating system random source
    #[must_use]
    pub const fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for PkceGenerator<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> PkceGenerator<R> {
    /// Generator backed by a caller-supplied random source
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// 32 random bytes, base64url without padding
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RandomSourceUnavailable`] if the generator fails
    pub fn generate_verifier(&mut self) -> Result<String, AuthError> {
        self.random_token::<CODE_VERIFIER_BYTES>()
    }

    /// 16 random bytes, base64url without padding
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RandomSourceUnavailable`] if the generator fails
    pub fn generate_state(&mut self) -> Result<String, AuthError> {
        self.random_token::<STATE_BYTES>()
    }

    /// Verifier, matching challenge and a fresh state
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RandomSourceUnavailable`] if the generator fails
    pub fn generate(&mut self) -> Result<PkceParams, AuthError> {
        let code_verifier = self.generate_verifier()?;
        let code_challenge = generate_challenge(&code_verifier);
        let state = self.generate_state()?;

        Ok(PkceParams {
            code_verifier,
            code_challenge,
            code_challenge_method: CODE_CHALLENGE_METHOD,
            state,
        })
    }

    fn random_token<const N: usize>(&mut self) -> Result<String, AuthError> {
        let mut bytes = [0_u8; N];
        self.rng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| AuthError::RandomSourceUnavailable(e.to_string()))?;
        Ok(URL_SAFE_NO_PAD.encode(bytes))
    }
}
