//! Usage: HTTP surface: router, handlers, listener and the provider OAuth client.

pub mod errors;
pub(crate) mod follower_count;
pub(crate) mod listen;
pub mod manager;
pub mod oauth;
pub(crate) mod pages;
pub mod routes;
