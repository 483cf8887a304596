//! Usage: Single-entry, process-local token store shared by all route handlers.
//!
//! Known limitation: there is one token pair per process (single tenant). Concurrent
//! exchanges or refreshes race and the last write wins.

use super::provider::OAuthTokenSet;
use crate::shared::mutex_ext::MutexExt;
use crate::shared::security::mask_token;
use std::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: Option<i64>,
    pub refresh_expires_at: Option<i64>,
    pub open_id: Option<String>,
    pub scope: Option<String>,
}

impl TokenPair {
    pub fn is_authorized(&self) -> bool {
        !self.access_token.is_empty()
    }
}

impl From<&OAuthTokenSet> for TokenPair {
    fn from(tokens: &OAuthTokenSet) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone().unwrap_or_default(),
            expires_at: tokens.expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            open_id: tokens.open_id.clone(),
            scope: tokens.scope.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct TokenStore {
    inner: Mutex<TokenPair>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> TokenPair {
        self.inner.lock_or_recover().clone()
    }

    /// Non-empty access token, if any.
    pub fn access_token(&self) -> Option<String> {
        let guard = self.inner.lock_or_recover();
        Some(guard.access_token.clone()).filter(|v| !v.is_empty())
    }

    /// Non-empty refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        let guard = self.inner.lock_or_recover();
        Some(guard.refresh_token.clone()).filter(|v| !v.is_empty())
    }

    pub fn is_authorized(&self) -> bool {
        self.inner.lock_or_recover().is_authorized()
    }

    /// Overwrite (never merge) the stored pair with a fresh token set.
    pub fn replace(&self, tokens: &OAuthTokenSet) {
        let next = TokenPair::from(tokens);
        tracing::info!(
            access_token = %mask_token(&next.access_token),
            has_refresh_token = !next.refresh_token.is_empty(),
            expires_at = next.expires_at,
            "token store updated"
        );
        *self.inner.lock_or_recover() = next;
    }
}
