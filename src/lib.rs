//! Client for the NovelAI HTTP API.
//!
//! [`api::ApiClient`] holds a read-only [`config::ClientConfig`] and exposes one
//! async method per remote action, all dispatched through [`api::ApiClient::call`].
//! Tokens are persisted between runs by a [`session::SessionStore`].

pub mod api;
pub mod config;
pub mod session;

pub use api::{ApiClient, ApiError, ApiMethod, RequestBody, UrlParameters};
pub use config::{ClientConfig, ConfigError};
