#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use follower_gateway::{
    build_router, ClientCredentials, FollowerQuery, GatewayAppState, OAuthTokenSet, ProviderApi,
    ProviderError, ProviderFuture, ProviderResult, Settings, TokenExchangeRequest,
    TokenRefreshRequest, UserInfoResponse,
};
use tower::ServiceExt;

pub const CLIENT_KEY: &str = "aw-test-client";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const REDIRECT_URI: &str = "https://example.com/callback";

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderCall {
    Exchange(TokenExchangeRequest),
    Refresh(TokenRefreshRequest),
    UserInfo {
        access_token: String,
        query: FollowerQuery,
    },
}

/// Scripted provider: each endpoint pops its next queued response and every call is recorded.
#[derive(Default)]
pub struct StubProvider {
    exchange: Mutex<VecDeque<ProviderResult<OAuthTokenSet>>>,
    refresh: Mutex<VecDeque<ProviderResult<OAuthTokenSet>>>,
    user_info: Mutex<VecDeque<ProviderResult<UserInfoResponse>>>,
    calls: Mutex<Vec<ProviderCall>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().expect("stub provider lock")
}

fn unscripted<T>(endpoint: &str) -> ProviderResult<T> {
    Err(ProviderError::Transport(format!(
        "stub provider has no scripted {endpoint} response"
    )))
}

impl StubProvider {
    pub fn push_exchange(&self, result: ProviderResult<OAuthTokenSet>) {
        lock(&self.exchange).push_back(result);
    }

    pub fn push_refresh(&self, result: ProviderResult<OAuthTokenSet>) {
        lock(&self.refresh).push_back(result);
    }

    pub fn push_user_info(&self, result: ProviderResult<serde_json::Value>) {
        let response = result.map(|payload| UserInfoResponse {
            body: payload.to_string(),
            payload,
        });
        lock(&self.user_info).push_back(response);
    }

    /// Queue a user-info reply given as the exact body text.
    pub fn push_user_info_body(&self, body: &str) {
        lock(&self.user_info).push_back(UserInfoResponse::parse(body.to_string()));
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        lock(&self.calls).clone()
    }

    pub fn user_info_tokens(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::UserInfo { access_token, .. } => Some(access_token),
                _ => None,
            })
            .collect()
    }
}

impl ProviderApi for StubProvider {
    fn exchange_code(&self, req: TokenExchangeRequest) -> ProviderFuture<'_, OAuthTokenSet> {
        lock(&self.calls).push(ProviderCall::Exchange(req));
        let next = lock(&self.exchange)
            .pop_front()
            .unwrap_or_else(|| unscripted("exchange"));
        Box::pin(async move { next })
    }

    fn refresh_access_token(
        &self,
        req: TokenRefreshRequest,
    ) -> ProviderFuture<'_, OAuthTokenSet> {
        lock(&self.calls).push(ProviderCall::Refresh(req));
        let next = lock(&self.refresh)
            .pop_front()
            .unwrap_or_else(|| unscripted("refresh"));
        Box::pin(async move { next })
    }

    fn fetch_user_info(
        &self,
        access_token: String,
        query: FollowerQuery,
    ) -> ProviderFuture<'_, UserInfoResponse> {
        lock(&self.calls).push(ProviderCall::UserInfo {
            access_token,
            query,
        });
        let next = lock(&self.user_info)
            .pop_front()
            .unwrap_or_else(|| unscripted("user info"));
        Box::pin(async move { next })
    }
}

pub fn token_set(access: &str, refresh: &str) -> OAuthTokenSet {
    OAuthTokenSet {
        access_token: access.to_string(),
        refresh_token: Some(refresh.to_string()),
        expires_at: None,
        refresh_expires_at: None,
        open_id: Some("open-id-1".to_string()),
        scope: Some("user.info.basic,user.info.stats".to_string()),
    }
}

pub fn test_settings() -> Settings {
    Settings::with_credentials(ClientCredentials {
        client_key: CLIENT_KEY.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        redirect_uri: REDIRECT_URI.to_string(),
    })
}

pub struct TestApp {
    pub state: GatewayAppState,
    pub provider: Arc<StubProvider>,
    router: Router,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let provider = Arc::new(StubProvider::default());
        let state = GatewayAppState::new(settings, provider.clone());
        let router = build_router(state.clone());
        Self {
            state,
            provider,
            router,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    /// Drive a successful `/callback` so the store holds `access`/`refresh`.
    pub async fn authorize_with(&self, access: &str, refresh: &str) {
        self.provider.push_exchange(Ok(token_set(access, refresh)));
        let resp = self.get("/callback?code=auth-code").await;
        assert_eq!(resp.status, StatusCode::OK, "callback failed: {}", resp.body);
    }
}
