use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use super::listen::{format_host_port, is_wildcard_host, parse_listen_address};
use super::oauth::tiktok::TikTokClient;
use super::routes::build_router;
use crate::app::app_state::GatewayAppState;
use crate::infra::settings::Settings;
use crate::shared::error::{AppError, AppResult};

/// Resolve `HOST`/`PORT` into a bind string such as `0.0.0.0:3000`.
pub(crate) fn resolve_bind_address(settings: &Settings) -> AppResult<String> {
    let parsed = parse_listen_address(&settings.host)
        .map_err(|e| AppError::new("CONFIG_INVALID", format!("HOST: {e}")))?;
    let port = parsed.port.unwrap_or(settings.port);
    Ok(format_host_port(&parsed.host, port))
}

pub(crate) async fn bind_listener(bind: &str) -> AppResult<(TcpListener, SocketAddr)> {
    let listener = TcpListener::bind(bind).await.map_err(|e| {
        AppError::with_source("PORT_IN_USE", format!("failed to bind {bind}: {e}"), e)
    })?;
    let local_addr = listener.local_addr()?;
    Ok((listener, local_addr))
}

/// Build production state, bind, and serve until Ctrl-C / SIGTERM.
pub async fn serve(settings: Settings) -> AppResult<()> {
    let provider = TikTokClient::new(settings.endpoints.clone(), settings.upstream_timeout())?;
    let bind = resolve_bind_address(&settings)?;
    let wildcard = parse_listen_address(&settings.host)
        .map(|p| is_wildcard_host(&p.host))
        .unwrap_or(false);

    let state = GatewayAppState::new(settings, Arc::new(provider));
    let app = build_router(state);

    let (listener, local_addr) = bind_listener(&bind).await?;
    tracing::info!(
        addr = %local_addr,
        all_interfaces = wildcard,
        "follower gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("follower gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!("ctrl-c handler install failed: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                tracing::warn!("SIGTERM handler install failed: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
