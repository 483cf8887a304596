//! Usage: Environment-driven settings (schema, defaults, validation).

use crate::shared::error::{AppError, AppResult};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_USERNAME: &str = "XStarWake";
pub const DEFAULT_OAUTH_STATE: &str = "follower-count";
pub const DEFAULT_AUTH_URL: &str = "https://www.tiktok.com/auth/authorize/";
pub const DEFAULT_TOKEN_URL: &str = "https://open.tiktokapis.com/v2/oauth/token/";
pub const DEFAULT_USER_INFO_URL: &str = "https://open.tiktokapis.com/v2/user/info/";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECONDS: u64 = 0;
const MAX_UPSTREAM_TIMEOUT_SECONDS: u64 = 10 * 60;
const MAX_REFRESH_LEAD_SECONDS: i64 = 24 * 60 * 60;

/// OAuth client credentials registered with the provider.
#[derive(Clone)]
pub struct ClientCredentials {
    pub client_key: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl std::fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_key", &self.client_key)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderEndpoints {
    pub auth_url: String,
    pub token_url: String,
    pub user_info_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            user_info_url: DEFAULT_USER_INFO_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: ClientCredentials,
    pub endpoints: ProviderEndpoints,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub oauth_state: String,
    /// 0 disables the client-side timeout.
    pub upstream_timeout_seconds: u64,
    /// `None` disables proactive refresh before follower-count lookups.
    pub refresh_lead_seconds: Option<i64>,
    pub log_dir: Option<PathBuf>,
}

impl Settings {
    /// Settings with the given credentials and every optional value at its default.
    pub fn with_credentials(credentials: ClientCredentials) -> Self {
        Self {
            credentials,
            endpoints: ProviderEndpoints::default(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            username: DEFAULT_USERNAME.to_string(),
            oauth_state: DEFAULT_OAUTH_STATE.to_string(),
            upstream_timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECONDS,
            refresh_lead_seconds: None,
            log_dir: None,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| {
                AppError::new("CONFIG_INVALID", format!("{key} is not set"))
            })
        };

        let credentials = ClientCredentials {
            client_key: required("CLIENT_KEY")?,
            client_secret: required("CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI")?,
        };
        validate_url("REDIRECT_URI", &credentials.redirect_uri)?;

        let mut settings = Self::with_credentials(credentials);

        if let Some(port) = get("PORT") {
            settings.port = port.parse::<u16>().map_err(|_| {
                AppError::new("CONFIG_INVALID", format!("PORT is not a valid port: {port}"))
            })?;
        }
        if let Some(host) = get("HOST") {
            settings.host = host;
        }
        if let Some(username) = get("TIKTOK_USERNAME") {
            settings.username = username;
        }
        if let Some(state) = get("OAUTH_STATE") {
            settings.oauth_state = state;
        }
        if let Some(url) = get("TIKTOK_AUTH_URL") {
            settings.endpoints.auth_url = url;
        }
        if let Some(url) = get("TIKTOK_TOKEN_URL") {
            settings.endpoints.token_url = url;
        }
        if let Some(url) = get("TIKTOK_USER_INFO_URL") {
            settings.endpoints.user_info_url = url;
        }
        validate_url("TIKTOK_AUTH_URL", &settings.endpoints.auth_url)?;
        validate_url("TIKTOK_TOKEN_URL", &settings.endpoints.token_url)?;
        validate_url("TIKTOK_USER_INFO_URL", &settings.endpoints.user_info_url)?;

        if let Some(raw) = get("UPSTREAM_TIMEOUT_SECONDS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::new(
                    "CONFIG_INVALID",
                    format!("UPSTREAM_TIMEOUT_SECONDS is not a number: {raw}"),
                )
            })?;
            settings.upstream_timeout_seconds = secs.min(MAX_UPSTREAM_TIMEOUT_SECONDS);
        }
        if let Some(raw) = get("REFRESH_LEAD_SECONDS") {
            let secs = raw.parse::<i64>().map_err(|_| {
                AppError::new(
                    "CONFIG_INVALID",
                    format!("REFRESH_LEAD_SECONDS is not a number: {raw}"),
                )
            })?;
            settings.refresh_lead_seconds = Some(secs.clamp(0, MAX_REFRESH_LEAD_SECONDS));
        }
        settings.log_dir = get("LOG_DIR").map(PathBuf::from);

        Ok(settings)
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        match self.upstream_timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn validate_url(key: &str, raw: &str) -> AppResult<()> {
    let url = Url::parse(raw).map_err(|e| {
        AppError::new("CONFIG_INVALID", format!("{key} is not a valid URL: {e}"))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::new(
            "CONFIG_INVALID",
            format!("{key} must use http or https"),
        ));
    }
    Ok(())
}
