//! Usage: Production `ProviderApi` backed by reqwest against the TikTok Open API.

use super::provider::{
    FollowerQuery, OAuthTokenSet, ProviderApi, ProviderError, ProviderFuture, ProviderResult,
    TokenExchangeRequest, TokenRefreshRequest, UserInfoResponse,
};
use super::token_exchange::{authorization_code_form, parse_token_response, refresh_token_form};
use crate::infra::settings::ProviderEndpoints;
use crate::shared::error::{AppError, AppResult};
use crate::shared::time::now_unix_seconds;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;

pub struct TikTokClient {
    client: reqwest::Client,
    endpoints: ProviderEndpoints,
}

impl TikTokClient {
    pub fn new(endpoints: ProviderEndpoints, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("follower-gateway/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::with_source("HTTP_CLIENT_INIT", format!("failed to build http client: {e}"), e)
        })?;
        Ok(Self { client, endpoints })
    }

    async fn post_token_form(
        &self,
        grant: &'static str,
        form: Vec<(&'static str, String)>,
    ) -> ProviderResult<OAuthTokenSet> {
        let response = self
            .client
            .post(&self.endpoints.token_url)
            .header(CACHE_CONTROL, "no-cache")
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("{grant} request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("{grant} response read failed: {e}")))?;
        tracing::debug!(grant, status = status.as_u16(), "token endpoint responded");

        parse_token_response(&body, now_unix_seconds())
    }
}

impl ProviderApi for TikTokClient {
    fn exchange_code(&self, req: TokenExchangeRequest) -> ProviderFuture<'_, OAuthTokenSet> {
        Box::pin(async move {
            self.post_token_form("authorization_code", authorization_code_form(&req))
                .await
        })
    }

    fn refresh_access_token(
        &self,
        req: TokenRefreshRequest,
    ) -> ProviderFuture<'_, OAuthTokenSet> {
        Box::pin(async move {
            self.post_token_form("refresh_token", refresh_token_form(&req))
                .await
        })
    }

    fn fetch_user_info(
        &self,
        access_token: String,
        query: FollowerQuery,
    ) -> ProviderFuture<'_, UserInfoResponse> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoints.user_info_url)
                .bearer_auth(access_token.trim())
                .header(CONTENT_TYPE, "application/json")
                .json(&query)
                .send()
                .await
                .map_err(|e| ProviderError::Transport(format!("user info request failed: {e}")))?;

            let status = response.status();
            let body = response.text().await.map_err(|e| {
                ProviderError::Transport(format!("user info response read failed: {e}"))
            })?;
            tracing::debug!(status = status.as_u16(), "user info endpoint responded");

            UserInfoResponse::parse(body)
        })
    }
}
