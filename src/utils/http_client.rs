// ABOUTME: HTTP client construction for identity provider and backend API calls
// ABOUTME: Applies the configured request and connect timeouts to reqwest clients

use crate::config::HttpTimeouts;
use reqwest::{Client, ClientBuilder};
use tracing::warn;

/// Create a client with the given timeouts
///
/// Falls back to a default client if the builder fails (TLS backend
/// initialization is the only realistic cause).
#[must_use]
pub fn create_client_with_timeouts(timeouts: HttpTimeouts) -> Client {
    ClientBuilder::new()
        .timeout(timeouts.request)
        .connect_timeout(timeouts.connect)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client with timeouts, using defaults");
            Client::new()
        })
}

/// Client for token exchange, refresh and user-info calls
///
/// These should be fast; the defaults are 15s request / 5s connect.
#[must_use]
pub fn oauth_client(timeouts: HttpTimeouts) -> Client {
    create_client_with_timeouts(timeouts)
}

/// Client for backend activity and recommendation calls
///
/// Recommendation lookups may wait on the backend; the defaults are 60s / 10s.
#[must_use]
pub fn api_client(timeouts: HttpTimeouts) -> Client {
    create_client_with_timeouts(timeouts)
}
