// ABOUTME: Data models shared by the auth controller, token client and activity API client
// ABOUTME: Re-exports user claims, token sets, activities and recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `UserClaims`: opaque user-info claims returned by the identity provider
//! - `TokenSet`: token endpoint response
//! - `Activity` / `ActivityRequest` / `ActivityType`: backend activity records
//! - `Recommendation`: AI-generated analysis of a single activity

/// Activity and recommendation wire types
pub mod activity;
/// Token endpoint response
pub mod token;
/// User-info claims
pub mod user;

pub use activity::{Activity, ActivityRequest, ActivityType, Recommendation};
pub use token::TokenSet;
pub use user::UserClaims;
