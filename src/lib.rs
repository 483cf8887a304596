mod app;
pub mod gateway;
mod infra;
mod shared;

pub use app::app_state::GatewayAppState;
pub use gateway::errors::RouteError;
pub use gateway::oauth::provider::{
    FollowerQuery, OAuthTokenSet, ProviderApi, ProviderError, ProviderFuture, ProviderResult,
    TokenExchangeRequest, TokenRefreshRequest, UserInfoResponse,
};
pub use gateway::oauth::tiktok::TikTokClient;
pub use gateway::oauth::token_store::{TokenPair, TokenStore};
pub use gateway::routes::build_router;
pub use infra::settings::{ClientCredentials, ProviderEndpoints, Settings};
pub use shared::error::{AppError, AppResult};

/// Load configuration, install logging, and serve until shutdown.
pub async fn run() -> AppResult<()> {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("warning: could not load .env file: {err}");
        }
    }

    let settings = Settings::from_env()?;
    let _log_guard = app::logging::init(settings.log_dir.as_deref());

    std::panic::set_hook(Box::new(|panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        tracing::error!(location = %location, "PANIC: handler panicked at {location}");
    }));

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        username = %settings.username,
        client_key = %settings.credentials.client_key,
        proactive_refresh = settings.refresh_lead_seconds.is_some(),
        "follower gateway starting"
    );

    gateway::manager::serve(settings).await
}
