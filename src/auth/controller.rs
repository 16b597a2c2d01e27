// ABOUTME: Auth controller driving the PKCE login, callback, user-info, refresh and logout steps
// ABOUTME: Owns the exposed AuthState and is the only writer of the session store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::location::{strip_callback_params, AddressBar, CallbackParams};
use super::state::{AuthState, AuthStatus, Navigation};
use crate::config::ProviderEndpoints;
use crate::constants::oauth;
use crate::errors::AuthError;
use crate::models::{TokenSet, UserClaims};
use crate::oauth2_client::IdentityProvider;
use crate::pkce::PkceGenerator;
use crate::session::{Session, SessionStore};
use rand::rngs::OsRng;
use rand::RngCore;
use std::sync::Arc;
use tracing::{debug, info, warn};

type BoxedRng = Box<dyn RngCore + Send + Sync>;

/// Orchestrates the authorization code flow with `PKCE`
///
/// Every failure is recovered here: the caller sees it through
/// [`AuthState::error`] and the session never keeps a half-finished login.
pub struct AuthController {
    endpoints: ProviderEndpoints,
    provider: Arc<dyn IdentityProvider>,
    session: Session,
    address_bar: Arc<dyn AddressBar>,
    pkce: PkceGenerator<BoxedRng>,
    state: AuthState,
    status: AuthStatus,
}

impl AuthController {
    /// Controller drawing `PKCE` values from the operating system generator
    #[must_use]
    pub fn new(
        endpoints: ProviderEndpoints,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn SessionStore>,
        address_bar: Arc<dyn AddressBar>,
    ) -> Self {
        Self {
            endpoints,
            provider,
            session: Session::new(store),
            address_bar,
            pkce: PkceGenerator::with_rng(Box::new(OsRng)),
            state: AuthState::initial(),
            status: AuthStatus::Anonymous,
        }
    }

    /// Replace the random source used for verifier and state
    #[must_use]
    pub fn with_rng(mut self, rng: impl RngCore + Send + Sync + 'static) -> Self {
        self.pkce = PkceGenerator::with_rng(Box::new(rng));
        self
    }

    /// Current exposed state
    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    /// Current lifecycle status
    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        self.status
    }

    /// Session the controller writes to
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Provider endpoints in use
    #[must_use]
    pub const fn endpoints(&self) -> &ProviderEndpoints {
        &self.endpoints
    }

    /// Resolve the state on page load
    ///
    /// A callback in the address is scrubbed from it before the exchange
    /// starts, so a reload cannot replay the code. Without a callback, a
    /// stored access token is restored and confirmed against the provider.
    pub async fn initialize(&mut self) -> &AuthState {
        self.state.loading = true;

        let current = self.address_bar.current();
        if let Some(callback) = CallbackParams::from_url(&current) {
            self.address_bar.replace(strip_callback_params(&current));
            debug!("Authorization callback detected, parameters removed from address");
            // Failures are recorded in the exposed state
            let _ = self.handle_callback(&callback.code, &callback.state).await;
        } else {
            match self.session.access_token() {
                Ok(Some(token)) => {
                    debug!("Restoring stored access token");
                    self.state.token = Some(token.clone());
                    self.status = AuthStatus::Authenticating;
                    let _ = self.fetch_user_info(&token).await;
                }
                Ok(None) => {
                    self.state.sign_out();
                    self.status = AuthStatus::Anonymous;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read session on startup, discarding it");
                    if let Err(clear_err) = self.session.clear() {
                        warn!(error = %clear_err, "Failed to clear unreadable session");
                    }
                    self.state.sign_out();
                    self.state.error = Some(e.to_string());
                    self.status = AuthStatus::Anonymous;
                }
            }
        }

        self.state.loading = false;
        &self.state
    }

    /// Start a login and return the authorization redirect
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::RandomSourceUnavailable`] if no secure random
    /// values could be drawn, or a storage error if the verifier and state
    /// could not be persisted. Either way `error` reads `"Login failed: ..."`.
    pub fn login(&mut self) -> Result<Navigation, AuthError> {
        self.state.loading = true;
        self.state.error = None;

        match self.begin_login() {
            Ok(url) => {
                self.status = AuthStatus::Authenticating;
                info!("Redirecting to identity provider for login");
                Ok(Navigation::Redirect(url))
            }
            Err(e) => {
                warn!(error = %e, "Login could not be started");
                self.state.error = Some(format!("Login failed: {e}"));
                self.state.loading = false;
                Err(e)
            }
        }
    }

    fn begin_login(&mut self) -> Result<url::Url, AuthError> {
        let params = self.pkce.generate()?;
        self.session
            .begin_login(&params.code_verifier, &params.state)?;
        Ok(self
            .endpoints
            .authorization_url(&params.code_challenge, &params.state))
    }

    /// Complete a login from the authorization response
    ///
    /// A user-info failure after a successful exchange keeps the token, leaves
    /// `user` empty and records the error; the call itself still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::StateMismatch`] if `state` differs from the stored
    /// one, [`AuthError::TokenExchangeFailed`] if the provider rejects the
    /// code, or a storage error. In each case the session is cleared.
    pub async fn handle_callback(&mut self, code: &str, state: &str) -> Result<(), AuthError> {
        self.state.loading = true;
        self.status = AuthStatus::Authenticating;

        let result = self.complete_login(code, state).await;
        if let Err(e) = &result {
            warn!(error = %e, code = %e.code(), "Authentication callback failed");
            if let Err(clear_err) = self.session.clear() {
                warn!(error = %clear_err, "Failed to clear session after authentication failure");
            }
            self.state.sign_out();
            self.state.error = Some(format!("Authentication failed: {e}"));
            self.status = AuthStatus::Anonymous;
        }

        self.state.loading = false;
        result
    }

    async fn complete_login(&mut self, code: &str, state: &str) -> Result<(), AuthError> {
        let stored_state = self.session.state()?;
        if stored_state.as_deref() != Some(state) {
            return Err(AuthError::StateMismatch);
        }

        let verifier = self.session.code_verifier()?.ok_or_else(|| {
            AuthError::TokenExchangeFailed(format!(
                "{}: no code verifier stored",
                oauth::TOKEN_EXCHANGE_FAILED
            ))
        })?;

        let tokens = self.provider.exchange_code(code, &verifier).await?;
        self.store_tokens(&tokens)?;

        // Failure is recorded in the exposed state and does not undo the exchange
        let _ = self.fetch_user_info(&tokens.access_token).await;

        self.session.finish_login()?;
        info!(
            authenticated = self.state.is_authenticated,
            "Authorization callback completed"
        );
        Ok(())
    }

    /// End the session and return the provider logout redirect
    #[must_use = "the logout redirect must be followed to end the provider session"]
    pub fn logout(&mut self) -> Navigation {
        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear session on logout");
        }
        self.state.sign_out();
        self.state.error = None;
        self.state.loading = false;
        self.status = AuthStatus::Anonymous;
        info!("Logged out, redirecting to identity provider");
        Navigation::Redirect(self.endpoints.logout_url())
    }

    /// Confirm `access_token` against the user-info endpoint
    ///
    /// On success the claims are stored and exposed. On failure `error` reads
    /// `"Failed to fetch user information"` and the token is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UserInfoFetchFailed`] on a non-success response,
    /// or a storage error if the claims could not be persisted
    pub async fn fetch_user_info(&mut self, access_token: &str) -> Result<UserClaims, AuthError> {
        match self.load_user(access_token).await {
            Ok(user) => {
                debug!(subject = user.subject().unwrap_or("unknown"), "User info loaded");
                self.state.set_user(Some(user.clone()));
                self.status = AuthStatus::Authenticated;
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, "Error fetching user info");
                self.state.set_user(None);
                self.state.error = Some(oauth::USER_INFO_FAILED.to_owned());
                self.status = AuthStatus::Anonymous;
                Err(e)
            }
        }
    }

    async fn load_user(&self, access_token: &str) -> Result<UserClaims, AuthError> {
        let user = self.provider.fetch_user_info(access_token).await?;
        self.session.store_user(&user)?;
        Ok(user)
    }

    /// Obtain a fresh access token with the stored refresh token
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::TokenExchangeFailed`] if no refresh token is
    /// stored or the provider rejects it; the session is then cleared
    pub async fn refresh(&mut self) -> Result<(), AuthError> {
        self.state.loading = true;
        let previous = self.status;
        self.status = AuthStatus::Authenticating;

        let result = self.refresh_tokens().await;
        match &result {
            Ok(()) => {
                self.status = if self.state.is_authenticated {
                    AuthStatus::Authenticated
                } else {
                    previous
                };
                info!("Access token refreshed");
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed");
                if let Err(clear_err) = self.session.clear() {
                    warn!(error = %clear_err, "Failed to clear session after refresh failure");
                }
                self.state.sign_out();
                self.state.error = Some(format!("Authentication failed: {e}"));
                self.status = AuthStatus::Anonymous;
            }
        }

        self.state.loading = false;
        result
    }

    async fn refresh_tokens(&mut self) -> Result<(), AuthError> {
        let refresh_token = self.session.refresh_token()?.ok_or_else(|| {
            AuthError::TokenExchangeFailed("No refresh token stored".to_owned())
        })?;
        let mut tokens = self.provider.refresh_token(&refresh_token).await?;
        // Providers that do not rotate refresh tokens omit them from the response
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = Some(refresh_token);
        }
        self.store_tokens(&tokens)
    }

    fn store_tokens(&mut self, tokens: &TokenSet) -> Result<(), AuthError> {
        self.session
            .store_tokens(&tokens.access_token, tokens.refresh_token.as_deref())?;
        self.state.token = Some(tokens.access_token.clone());
        Ok(())
    }
}
