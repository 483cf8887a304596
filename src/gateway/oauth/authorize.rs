//! Usage: Provider consent URL construction.

use crate::infra::settings::Settings;
use crate::shared::error::{AppError, AppResult};
use reqwest::Url;

/// Scopes needed to read the account's follower count.
pub(crate) const SCOPES: &str = "user.info.basic,user.info.stats";

/// Deterministic for a given `Settings`: the state value is static.
pub(crate) fn build_authorize_url(settings: &Settings) -> AppResult<Url> {
    let creds = &settings.credentials;
    Url::parse_with_params(
        &settings.endpoints.auth_url,
        &[
            ("client_key", creds.client_key.as_str()),
            ("scope", SCOPES),
            ("response_type", "code"),
            ("redirect_uri", creds.redirect_uri.as_str()),
            ("state", settings.oauth_state.as_str()),
        ],
    )
    .map_err(|e| AppError::new("CONFIG_INVALID", format!("invalid provider auth url: {e}")))
}
