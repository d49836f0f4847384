use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, instrument, warn, Span};

use super::{ApiError, ApiMethod, QueryForm, RequestBody, UrlParameters};
use crate::config::ClientConfig;

/// Configures an [`ApiClient`] beyond the defaults.
#[derive(Debug)]
pub struct ApiClientBuilder {
    config: ClientConfig,
    timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Bounds every request. Without this the transport's own defaults apply.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ApiClient, ApiError> {
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http = http.timeout(timeout);
        }

        Ok(ApiClient {
            http: http.build().map_err(ApiError::Client)?,
            config: self.config,
        })
    }
}

/// A client bound to one session's configuration.
///
/// Every endpoint method funnels through [`ApiClient::call`], which attaches
/// the bearer token, encodes the payload and decodes the JSON response.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Creates a new API client around the given configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            timeout: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a client carrying a different access token.
    /// The connection pool is shared with `self`, which is left untouched.
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone().with_access_token(access_token),
        }
    }

    /// Like [`ApiClient::call`], but with the verb given by name.
    ///
    /// The name must match exactly; anything else fails before a request is built.
    pub async fn call_raw(
        &self,
        method: &str,
        path: &str,
        body: Option<&RequestBody>,
        url_parameters: Option<&UrlParameters>,
    ) -> Result<Value, ApiError> {
        let Ok(method) = method.parse::<ApiMethod>() else {
            return Err(ApiError::UnsupportedMethod(method.to_string()));
        };
        self.call(method, path, body, url_parameters).await
    }

    /// Sends a single request to `base_url + path` and decodes the response.
    ///
    /// An empty or non-JSON body decodes to `Value::Null`. Error statuses are
    /// not failures here: whatever the service returned is handed back.
    #[instrument(
        name = "api_request",
        skip(self, body, url_parameters),
        fields(
            http.method = %method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
        )
    )]
    pub async fn call(
        &self,
        method: ApiMethod,
        path: &str,
        body: Option<&RequestBody>,
        url_parameters: Option<&UrlParameters>,
    ) -> Result<Value, ApiError> {
        let mut url = format!("{}{}", self.config.base_url, path);
        let mut query = url_parameters.cloned().unwrap_or_default();
        let mut payload = None;
        match body.map(|body| (body, method.allows_body())) {
            Some((body, true)) => payload = Some(body.encode()?),
            Some((body, false)) => match body.to_query() {
                QueryForm::Pairs(pairs) => query.extend(pairs),
                QueryForm::Raw(raw) if !raw.is_empty() => {
                    url.push(if url.contains('?') { '&' } else { '?' });
                    url.push_str(&raw);
                }
                QueryForm::Raw(_) | QueryForm::Empty => {}
            },
            None => {}
        }
        Span::current().record("http.url", url.as_str());

        let mut request = self
            .http
            .request(method.to_reqwest(), &url)
            .bearer_auth(&self.config.access_token);
        if !query.is_empty() {
            request = request.query(query.pairs());
        }
        if let Some(payload) = payload {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(payload);
        }

        debug!("sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => return Err(unavailable(err)),
        };

        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => return Err(unavailable(err)),
        };

        if !status.is_success() {
            warn!(status = status.as_u16(), "service responded with an error status");
        }

        Ok(decode(&text))
    }
}

/// Records a transport failure and wraps it for the caller.
fn unavailable(err: reqwest::Error) -> ApiError {
    error!(error = %err, "request failed, service unavailable");
    ApiError::Unavailable(err)
}

fn decode(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }

    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            debug!(error = %err, "response body is not JSON");
            Value::Null
        }
    }
}
