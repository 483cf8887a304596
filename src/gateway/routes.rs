use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use super::follower_count::follower_count;
use super::oauth::flow::{authorize, callback, refresh_token};
use super::pages::{home, privacy_policy, terms_of_service};
use crate::app::app_state::GatewayAppState;
use crate::shared::time::now_unix_seconds;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app: &'static str,
    version: &'static str,
    authorized: bool,
    ts: i64,
}

async fn health(State(state): State<GatewayAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        app: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        authorized: state.tokens.is_authorized(),
        ts: now_unix_seconds(),
    })
}

pub fn build_router(state: GatewayAppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/authorize", get(authorize))
        .route("/callback", get(callback))
        .route("/follower_count", get(follower_count))
        .route("/refresh_token", get(refresh_token))
        .route("/TOS", get(terms_of_service))
        .route("/privacy", get(privacy_policy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
