use std::fmt;

use thiserror::Error;
use url::Url;

/// The API host used when `NOVELAI_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "https://api.novelai.net";

pub const BASE_URL_VARIABLE: &str = "NOVELAI_BASE_URL";
pub const ACCESS_KEY_VARIABLE: &str = "NOVELAI_ACCESS_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Everything a client needs to reach the API on behalf of one session.
///
/// A snapshot: nothing here changes once a client holds it. Refreshing the
/// token means building a new client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub access_key: String,
    pub access_token: String,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        access_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            access_key: access_key.into(),
            access_token: access_token.into(),
        }
    }

    /// Reads the base URL and access key from the process environment.
    /// The access token starts out empty; see [`crate::session::load_access_token`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(BASE_URL_VARIABLE)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Paths are appended verbatim later on, so only check the URL parses.
        if let Err(source) = Url::parse(&base_url) {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url,
                source,
            });
        }

        Ok(Self {
            base_url,
            access_key: lookup(ACCESS_KEY_VARIABLE).unwrap_or_default(),
            access_token: String::new(),
        })
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("access_key", &redact(&self.access_key))
            .field("access_token", &redact(&self.access_token))
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}
