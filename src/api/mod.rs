// ABOUTME: Backend REST API access for activities and AI recommendations
// ABOUTME: Re-exports the authenticated activity client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Activity and recommendation endpoints
pub mod activities;

pub use activities::ActivityApiClient;
