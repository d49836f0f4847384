use keyring::Entry;
use std::sync::RwLock;

use super::SessionError;

/// The keyring service all entries are filed under.
pub const KEYRING_SERVICE: &str = "novelaictl";

/// The keyring user name used when no account is specified.
pub const DEFAULT_ACCOUNT: &str = "Access Token";

/// Where the access token lives between requests.
pub trait SessionStore: Send + Sync {
    /// The stored token, if any.
    fn access_token(&self) -> Result<Option<String>, SessionError>;

    fn store_access_token(&self, access_token: &str) -> Result<(), SessionError>;

    /// Forgets the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Keeps the token in the platform credential store.
pub struct KeyringStore {
    entry: Entry,
}

impl KeyringStore {
    pub fn new() -> Result<Self, SessionError> {
        Self::for_account(DEFAULT_ACCOUNT)
    }

    /// One entry per account, so several sessions can coexist.
    pub fn for_account(account: &str) -> Result<Self, SessionError> {
        Ok(Self {
            entry: Entry::new(KEYRING_SERVICE, account)?,
        })
    }
}

impl SessionStore for KeyringStore {
    fn access_token(&self) -> Result<Option<String>, SessionError> {
        match self.entry.get_password() {
            Ok(access_token) => Ok(Some(access_token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn store_access_token(&self, access_token: &str) -> Result<(), SessionError> {
        Ok(self.entry.set_password(access_token)?)
    }

    fn clear(&self) -> Result<(), SessionError> {
        match self.entry.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the token in memory only; lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    access_token: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: RwLock::new(Some(access_token.into())),
        }
    }
}

impl SessionStore for MemoryStore {
    fn access_token(&self) -> Result<Option<String>, SessionError> {
        let guard = self.access_token.read().map_err(|_| SessionError::Poisoned)?;
        Ok(guard.clone())
    }

    fn store_access_token(&self, access_token: &str) -> Result<(), SessionError> {
        let mut guard = self
            .access_token
            .write()
            .map_err(|_| SessionError::Poisoned)?;
        *guard = Some(access_token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self
            .access_token
            .write()
            .map_err(|_| SessionError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}
