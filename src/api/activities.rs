// ABOUTME: REST client for the activity and recommendation services behind the API gateway
// ABOUTME: Attaches the bearer token and X-User-ID header read from the session on every request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{ApiConfig, HttpTimeouts};
use crate::constants::headers;
use crate::errors::ApiError;
use crate::models::{Activity, ActivityRequest, Recommendation};
use crate::session::Session;
use crate::utils::http_client::api_client;
use futures_util::future::try_join;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

/// Authenticated client for the fitness backend
///
/// Read-only with respect to the session: credentials are looked up on every
/// request, so a login or logout in the controller takes effect immediately.
#[derive(Clone)]
pub struct ActivityApiClient {
    base_url: Url,
    client: Client,
    session: Session,
}

impl std::fmt::Debug for ActivityApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ActivityApiClient {
    /// Client for `config.base_url` with the configured timeouts
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        Self::with_http_client(&config.base_url, api_client(config.timeouts), session)
    }

    /// Client for `base_url` with default API timeouts
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse
    pub fn from_base_url(base_url: &str, session: Session) -> Result<Self, ApiError> {
        Self::with_http_client(base_url, api_client(HttpTimeouts::api_defaults()), session)
    }

    /// Client reusing an existing `reqwest` client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base URL does not parse or
    /// cannot carry a path
    pub fn with_http_client(
        base_url: &str,
        client: Client,
        session: Session,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url} cannot be a base URL"
            )));
        }
        Ok(Self {
            base_url,
            client,
            session,
        })
    }

    /// Backend base URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// All activities of the signed-in user
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn get_activities(&self) -> Result<Vec<Activity>, ApiError> {
        let request = self.request(Method::GET, &["activities"])?;
        Self::json(Self::send(request).await?).await
    }

    /// Log a new activity
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn add_activity(&self, activity: &ActivityRequest) -> Result<Activity, ApiError> {
        let request = self.request(Method::POST, &["activities"])?.json(activity);
        Self::json(Self::send(request).await?).await
    }

    /// One activity by id
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn get_activity(&self, activity_id: &str) -> Result<Activity, ApiError> {
        let request = self.request(Method::GET, &["activities", activity_id])?;
        Self::json(Self::send(request).await?).await
    }

    /// Recommendation generated for an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode
    pub async fn get_activity_detail(&self, activity_id: &str) -> Result<Recommendation, ApiError> {
        let request = self.request(Method::GET, &["recommendations", "activity", activity_id])?;
        Self::json(Self::send(request).await?).await
    }

    /// Delete an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn delete_activity(&self, activity_id: &str) -> Result<(), ApiError> {
        let request = self.request(Method::DELETE, &["activities", activity_id])?;
        Self::send(request).await?;
        Ok(())
    }

    /// Delete the recommendation attached to an activity
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails
    pub async fn delete_recommendation_by_activity_id(
        &self,
        activity_id: &str,
    ) -> Result<(), ApiError> {
        let request = self
            .request(Method::DELETE, &["recommendations", "activity"])?
            .query(&[("activityId", activity_id)]);
        Self::send(request).await?;
        Ok(())
    }

    /// Delete an activity and its recommendation, both requests in flight at once
    ///
    /// # Errors
    ///
    /// Returns the first error from either deletion
    pub async fn delete_activity_with_recommendation(
        &self,
        activity_id: &str,
    ) -> Result<(), ApiError> {
        try_join(
            self.delete_activity(activity_id),
            self.delete_recommendation_by_activity_id(activity_id),
        )
        .await?;
        Ok(())
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Request with session credentials attached
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        debug!(method = %method, path = url.path(), "API request");
        let mut builder = self.client.request(method, url);

        if let Some(token) = self.session.access_token()? {
            builder = builder.bearer_auth(token);
        }
        // Session::user already warns about and skips an unparsable entry
        if let Some(subject) = self
            .session
            .user()?
            .as_ref()
            .and_then(|user| user.subject().map(str::to_owned))
        {
            builder = builder.header(headers::USER_ID, subject);
        }

        Ok(builder)
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            status.canonical_reason().unwrap_or("request failed").to_owned()
        } else {
            body
        };
        warn!(status = status.as_u16(), "API request failed");
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
