//! Usage: Shared state handed to every route handler.

use crate::gateway::oauth::provider::ProviderApi;
use crate::gateway::oauth::token_store::TokenStore;
use crate::infra::settings::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct GatewayAppState {
    pub settings: Arc<Settings>,
    pub tokens: Arc<TokenStore>,
    pub provider: Arc<dyn ProviderApi>,
}

impl GatewayAppState {
    /// Fresh state with an empty token store.
    pub fn new(settings: Settings, provider: Arc<dyn ProviderApi>) -> Self {
        Self {
            settings: Arc::new(settings),
            tokens: Arc::new(TokenStore::new()),
            provider,
        }
    }
}
