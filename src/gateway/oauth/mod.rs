//! Usage: OAuth flow helpers for the TikTok consent redirect, token exchange, and refresh.
//!
//! Route handlers depend on the `ProviderApi` trait; `TikTokClient` is the reqwest-backed
//! implementation used in production.

pub(crate) mod authorize;
pub(crate) mod flow;
pub mod provider;
pub(crate) mod refresh;
pub mod tiktok;
pub(crate) mod token_exchange;
pub mod token_store;
