mod client;
mod endpoints;
mod error;
mod method;
mod request;

pub use client::{ApiClient, ApiClientBuilder};
pub use error::ApiError;
pub use method::ApiMethod;
pub use request::{QueryForm, RequestBody, UrlParameters};
