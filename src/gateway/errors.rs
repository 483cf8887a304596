//! Usage: Route-level error taxonomy + plain-text error responses.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use super::oauth::provider::ProviderError;

pub(crate) const MISSING_CODE_MESSAGE: &str = "Authorization code is missing.";
pub(crate) const STATE_MISMATCH_MESSAGE: &str = "Authorization state does not match.";
pub(crate) const NOT_AUTHORIZED_MESSAGE: &str = "Not authorized. Visit /authorize first.";
pub(crate) const NO_REFRESH_TOKEN_MESSAGE: &str =
    "No refresh token available. Visit /authorize first.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("{}", MISSING_CODE_MESSAGE)]
    MissingAuthorizationCode,
    #[error("{}", STATE_MISMATCH_MESSAGE)]
    StateMismatch,
    /// Raw provider body from the token endpoint.
    #[error("{0}")]
    TokenExchangeRejected(String),
    #[error("{0}")]
    TokenExchangeTransportError(String),
    #[error("{}", NOT_AUTHORIZED_MESSAGE)]
    NotAuthorized,
    /// Raw provider JSON from the user-info endpoint.
    #[error("{0}")]
    FollowerCountUnavailable(String),
    #[error("{0}")]
    TransportError(String),
    #[error("{}", NO_REFRESH_TOKEN_MESSAGE)]
    NoRefreshToken,
}

impl RouteError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::MissingAuthorizationCode => "OAUTH_MISSING_CODE",
            Self::StateMismatch => "OAUTH_STATE_MISMATCH",
            Self::TokenExchangeRejected(_) => "OAUTH_TOKEN_REJECTED",
            Self::TokenExchangeTransportError(_) => "OAUTH_TOKEN_TRANSPORT",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::FollowerCountUnavailable(_) => "FOLLOWER_COUNT_UNAVAILABLE",
            Self::TransportError(_) => "UPSTREAM_TRANSPORT",
            Self::NoRefreshToken => "NO_REFRESH_TOKEN",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAuthorizationCode | Self::StateMismatch => StatusCode::BAD_REQUEST,
            Self::NotAuthorized | Self::NoRefreshToken => StatusCode::UNAUTHORIZED,
            Self::TokenExchangeRejected(_)
            | Self::TokenExchangeTransportError(_)
            | Self::FollowerCountUnavailable(_)
            | Self::TransportError(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Token endpoint failures (both grants share this mapping).
    pub(crate) fn from_token_endpoint(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { body } => Self::TokenExchangeRejected(body),
            ProviderError::Transport(msg) => Self::TokenExchangeTransportError(msg),
        }
    }

    pub(crate) fn from_user_info(err: ProviderError) -> Self {
        match err {
            ProviderError::Rejected { body } => Self::FollowerCountUnavailable(body),
            ProviderError::Transport(msg) => Self::TransportError(msg),
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();
        if status.is_server_error() {
            tracing::warn!(error_code = code, status = status.as_u16(), "route failed");
        } else {
            tracing::info!(error_code = code, status = status.as_u16(), "route rejected request");
        }

        let mut resp = (status, self.to_string()).into_response();
        resp.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        resp.headers_mut()
            .insert("x-error-code", HeaderValue::from_static(code));
        resp
    }
}
