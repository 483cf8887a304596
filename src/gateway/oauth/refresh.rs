//! Usage: Refresh decision and execution helpers.

use super::provider::{OAuthTokenSet, ProviderApi, ProviderResult, TokenRefreshRequest};
use super::token_store::TokenStore;
use crate::infra::settings::Settings;

pub(crate) fn should_refresh_now(
    expires_at: Option<i64>,
    refresh_lead_s: i64,
    now_unix: i64,
) -> bool {
    let Some(expiry) = expires_at else {
        return false;
    };
    let lead = refresh_lead_s.max(0);
    expiry.saturating_sub(lead) <= now_unix
}

/// Run the refresh_token grant and overwrite the store on success.
/// A failed refresh leaves the store untouched.
pub(crate) async fn refresh_and_store(
    provider: &dyn ProviderApi,
    settings: &Settings,
    tokens: &TokenStore,
    refresh_token: String,
) -> ProviderResult<OAuthTokenSet> {
    let request = TokenRefreshRequest {
        client_key: settings.credentials.client_key.clone(),
        client_secret: settings.credentials.client_secret.clone(),
        refresh_token,
    };

    let token_set = provider.refresh_access_token(request).await?;
    tokens.replace(&token_set);
    Ok(token_set)
}
