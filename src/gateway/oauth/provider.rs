//! Usage: `ProviderApi` trait - the seam between route handlers and the TikTok Open API.
//!
//! Handlers only talk to `dyn ProviderApi`; the production implementation lives in
//! `tiktok.rs`, tests plug in recording stubs.

use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered, but without the expected payload. Carries the raw body.
    #[error("{body}")]
    Rejected { body: String },
    /// Network, body read or JSON decode failure.
    #[error("{0}")]
    Transport(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenExchangeRequest {
    pub client_key: String,
    pub client_secret: String,
    pub code: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRefreshRequest {
    pub client_key: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Token set returned from the token endpoint (authorization_code or refresh_token grant).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuthTokenSet {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<i64>,
    pub refresh_expires_at: Option<i64>,
    pub open_id: Option<String>,
    pub scope: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowerQuery {
    pub username: String,
    pub fields: String,
}

impl FollowerQuery {
    pub fn follower_count(username: &str) -> Self {
        Self {
            username: username.to_string(),
            fields: "follower_count".to_string(),
        }
    }
}

/// User-info reply: the body text exactly as received plus its decoded form.
#[derive(Debug, Clone, PartialEq)]
pub struct UserInfoResponse {
    pub body: String,
    pub payload: serde_json::Value,
}

impl UserInfoResponse {
    pub fn parse(body: String) -> ProviderResult<Self> {
        let payload = serde_json::from_str(&body).map_err(|e| {
            ProviderError::Transport(format!("user info response json invalid: {e}"))
        })?;
        Ok(Self { body, payload })
    }
}

pub trait ProviderApi: Send + Sync {
    /// Exchange an authorization code for a token set.
    fn exchange_code(&self, req: TokenExchangeRequest) -> ProviderFuture<'_, OAuthTokenSet>;

    /// Trade a refresh token for a new token set.
    fn refresh_access_token(&self, req: TokenRefreshRequest)
        -> ProviderFuture<'_, OAuthTokenSet>;

    /// Look up user info; the raw body is kept so error replies can echo it verbatim.
    fn fetch_user_info(
        &self,
        access_token: String,
        query: FollowerQuery,
    ) -> ProviderFuture<'_, UserInfoResponse>;
}
