//! Usage: OAuth route handlers (consent redirect, code exchange, token refresh).

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use super::authorize::build_authorize_url;
use super::provider::TokenExchangeRequest;
use super::refresh::refresh_and_store;
use crate::app::app_state::GatewayAppState;
use crate::gateway::errors::RouteError;
use crate::shared::security::constant_time_eq;

pub(crate) const CALLBACK_SUCCESS_MESSAGE: &str =
    "Authorization successful! Tokens have been stored.";
pub(crate) const REFRESH_SUCCESS_MESSAGE: &str = "Access token refreshed successfully.";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

pub(crate) async fn authorize(State(state): State<GatewayAppState>) -> Response {
    match build_authorize_url(&state.settings) {
        Ok(url) => {
            tracing::debug!("redirecting to provider consent page");
            // axum's Redirect helpers only emit 303/307/308.
            (StatusCode::FOUND, [(header::LOCATION, url.to_string())]).into_response()
        }
        Err(err) => {
            tracing::error!("authorize url construction failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}

pub(crate) async fn callback(
    State(state): State<GatewayAppState>,
    Query(params): Query<CallbackParams>,
) -> Result<&'static str, RouteError> {
    let Some(code) = params
        .code
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        if let Some(error) = params.error.as_deref() {
            tracing::warn!(
                provider_error = error,
                description = params.error_description.as_deref().unwrap_or("-"),
                "provider redirected back without an authorization code"
            );
        }
        return Err(RouteError::MissingAuthorizationCode);
    };

    if let Some(returned) = params.state.as_deref() {
        if !constant_time_eq(returned.as_bytes(), state.settings.oauth_state.as_bytes()) {
            return Err(RouteError::StateMismatch);
        }
    }

    let creds = &state.settings.credentials;
    let request = TokenExchangeRequest {
        client_key: creds.client_key.clone(),
        client_secret: creds.client_secret.clone(),
        code: code.to_string(),
        redirect_uri: creds.redirect_uri.clone(),
    };

    let token_set = state
        .provider
        .exchange_code(request)
        .await
        .map_err(RouteError::from_token_endpoint)?;
    state.tokens.replace(&token_set);

    tracing::info!(
        open_id = token_set.open_id.as_deref().unwrap_or("-"),
        "authorization code exchanged"
    );
    Ok(CALLBACK_SUCCESS_MESSAGE)
}

pub(crate) async fn refresh_token(
    State(state): State<GatewayAppState>,
) -> Result<&'static str, RouteError> {
    let refresh_token = state.tokens.refresh_token().ok_or(RouteError::NoRefreshToken)?;

    refresh_and_store(
        state.provider.as_ref(),
        &state.settings,
        &state.tokens,
        refresh_token,
    )
    .await
    .map_err(RouteError::from_token_endpoint)?;

    tracing::info!("access token refreshed");
    Ok(REFRESH_SUCCESS_MESSAGE)
}
