// ABOUTME: Authentication module for the browser-style PKCE login flow
// ABOUTME: Controller, exposed state and the address bar seam the callback arrives through
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Authentication
//!
//! [`AuthController`] walks the login lifecycle
//! `anonymous -> authenticating -> authenticated`, falling back to anonymous
//! on any failure. It never navigates itself: `login` and `logout` hand a
//! [`Navigation`] back to the caller.

/// Login lifecycle orchestration
pub mod controller;
/// Address bar abstraction and callback parsing
pub mod location;
/// Exposed state types
pub mod state;

pub use controller::AuthController;
pub use location::{AddressBar, CallbackParams, MemoryAddressBar};
pub use state::{AuthState, AuthStatus, Navigation};
