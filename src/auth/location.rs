// ABOUTME: Address bar abstraction the login callback is read from and scrubbed in
// ABOUTME: In-memory implementation plus the helper that strips callback parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::oauth::{CALLBACK_CODE_PARAM, CALLBACK_STATE_PARAM};
use std::sync::RwLock;
use url::Url;

/// The user-visible application address
///
/// `replace` rewrites the address without navigating, so a later reload does
/// not deliver the same callback again.
pub trait AddressBar: Send + Sync {
    /// Address currently shown
    fn current(&self) -> Url;

    /// Replace the shown address in place
    fn replace(&self, url: Url);
}

/// Address bar held in memory
#[derive(Debug)]
pub struct MemoryAddressBar {
    url: RwLock<Url>,
}

impl MemoryAddressBar {
    /// Address bar showing `url`
    #[must_use]
    pub const fn new(url: Url) -> Self {
        Self {
            url: RwLock::new(url),
        }
    }
}

impl AddressBar for MemoryAddressBar {
    fn current(&self) -> Url {
        match self.url.read() {
            Ok(url) => url.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn replace(&self, url: Url) {
        match self.url.write() {
            Ok(mut current) => *current = url,
            Err(poisoned) => *poisoned.into_inner() = url,
        }
    }
}

/// Authorization response carried in the address query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackParams {
    /// Authorization code
    pub code: String,
    /// Echoed anti-forgery state
    pub state: String,
}

impl CallbackParams {
    /// Extract `code` and `state`; `None` unless both are present and non-empty
    #[must_use]
    pub fn from_url(url: &Url) -> Option<Self> {
        let mut code = None;
        let mut state = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                CALLBACK_CODE_PARAM if code.is_none() => code = Some(value.into_owned()),
                CALLBACK_STATE_PARAM if state.is_none() => state = Some(value.into_owned()),
                _ => {}
            }
        }
        match (code, state) {
            (Some(code), Some(state)) if !code.is_empty() && !state.is_empty() => {
                Some(Self { code, state })
            }
            _ => None,
        }
    }
}

/// Copy of `url` without the `code` and `state` query parameters
///
/// Path, fragment and every other parameter are kept. An emptied query is
/// dropped entirely. Provider extras such as `session_state` and `iss`
/// therefore stay visible; only the values that could replay the exchange
/// are removed.
#[must_use]
pub fn strip_callback_params(url: &Url) -> Url {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != CALLBACK_CODE_PARAM && key != CALLBACK_STATE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut stripped = url.clone();
    if kept.is_empty() {
        stripped.set_query(None);
    } else {
        stripped.query_pairs_mut().clear().extend_pairs(kept);
    }
    stripped
}
