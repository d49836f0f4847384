use thiserror::Error;

/// Failures surfaced by the dispatcher.
///
/// Error payloads returned by the service itself (bad credentials, validation
/// failures and so on) are not represented here: they decode like any other
/// response and are left for the caller to inspect.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The verb is not one of GET, POST, PUT, PATCH or DELETE. Nothing was sent.
    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),

    /// The request never produced a response (connection, timeout, unreadable body).
    #[error("service unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),

    /// The HTTP client itself could not be set up. Nothing was sent.
    #[error("unable to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("unable to serialize request payload: {0}")]
    Payload(#[from] serde_json::Error),
}
