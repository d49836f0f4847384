//! Access token persistence and the login flow.

pub mod jwt;
mod storage;

pub use storage::{KeyringStore, MemoryStore, SessionStore, DEFAULT_ACCOUNT, KEYRING_SERVICE};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("credential storage error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("unreadable access token: {0}")]
    Token(String),

    #[error("session store lock poisoned")]
    Poisoned,

    /// The service answered the login request without a token.
    #[error("login rejected: {0}")]
    LoginRejected(Value),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Reads the stored access token, or an empty string when there is none.
///
/// A stored JWT that has already expired is removed from the store and
/// treated as absent.
pub fn load_access_token(store: &dyn SessionStore) -> Result<String, SessionError> {
    let Some(access_token) = store.access_token()? else {
        debug!("no stored access token");
        return Ok(String::new());
    };

    if jwt::is_expired(&access_token) {
        info!("stored access token has expired, discarding it");
        store.clear()?;
        return Ok(String::new());
    }

    Ok(access_token)
}

/// Like [`load_access_token`], but a failing store yields an empty token.
///
/// For requests that work without a session, an unreachable credential
/// store should not stop them from being sent.
pub fn load_access_token_or_empty(store: &dyn SessionStore) -> String {
    match load_access_token(store) {
        Ok(access_token) => access_token,
        Err(err) => {
            warn!(error = %err, "unable to read stored access token, continuing without one");
            String::new()
        }
    }
}

/// Logs in with the client's access key and persists the issued token.
///
/// Returns a client carrying the new token; `client` itself is unchanged.
pub async fn login(client: &ApiClient, store: &dyn SessionStore) -> Result<ApiClient, SessionError> {
    let response = client.post_user_login().await?;

    let Some(access_token) = response.get("accessToken").and_then(Value::as_str) else {
        return Err(SessionError::LoginRejected(response));
    };

    store.store_access_token(access_token)?;
    info!("logged in, access token stored");

    Ok(client.with_access_token(access_token))
}

/// Forgets the stored token.
pub fn logout(store: &dyn SessionStore) -> Result<(), SessionError> {
    store.clear()
}
