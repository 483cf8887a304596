//! Usage: `/follower_count` handler (bearer-authenticated user-info lookup).

use axum::extract::State;
use serde_json::Value;

use super::errors::RouteError;
use super::oauth::provider::FollowerQuery;
use super::oauth::refresh::{refresh_and_store, should_refresh_now};
use super::oauth::token_exchange::parse_i64_lossy;
use crate::app::app_state::GatewayAppState;
use crate::shared::time::now_unix_seconds;

pub(crate) fn follower_count_message(username: &str, count: i64) -> String {
    format!("{username} has {count} followers!")
}

/// `data.follower_count` as an integer; zero is a valid count.
pub(crate) fn extract_follower_count(payload: &Value) -> Option<i64> {
    payload
        .get("data")
        .and_then(|data| data.get("follower_count"))
        .and_then(parse_i64_lossy)
        .filter(|count| *count >= 0)
}

pub(crate) async fn follower_count(
    State(state): State<GatewayAppState>,
) -> Result<String, RouteError> {
    if !state.tokens.is_authorized() {
        return Err(RouteError::NotAuthorized);
    }

    if let Some(lead) = state.settings.refresh_lead_seconds {
        maybe_refresh_before_lookup(&state, lead).await;
    }

    let access_token = state.tokens.access_token().ok_or(RouteError::NotAuthorized)?;
    let query = FollowerQuery::follower_count(&state.settings.username);

    let response = state
        .provider
        .fetch_user_info(access_token, query)
        .await
        .map_err(RouteError::from_user_info)?;

    match extract_follower_count(&response.payload) {
        Some(count) => {
            tracing::info!(username = %state.settings.username, count, "follower count fetched");
            Ok(follower_count_message(&state.settings.username, count))
        }
        None => Err(RouteError::FollowerCountUnavailable(response.body)),
    }
}

async fn maybe_refresh_before_lookup(state: &GatewayAppState, lead: i64) {
    let snapshot = state.tokens.snapshot();
    if !should_refresh_now(snapshot.expires_at, lead, now_unix_seconds()) {
        return;
    }
    if snapshot.refresh_token.is_empty() {
        tracing::debug!("access token near expiry but no refresh token stored");
        return;
    }

    tracing::info!(expires_at = snapshot.expires_at, "refreshing access token ahead of expiry");
    if let Err(err) = refresh_and_store(
        state.provider.as_ref(),
        &state.settings,
        &state.tokens,
        snapshot.refresh_token,
    )
    .await
    {
        tracing::warn!("proactive refresh failed; using stored access token: {}", err);
    }
}
