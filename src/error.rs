//! Client error type.
//!
//! Only failures that stop a request from producing a response live here.
//! A non-success HTTP status is not an error, and neither is a body that
//! fails to parse as JSON: both come back inside
//! [`EndpointCallResult`](crate::client::EndpointCallResult).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured portal URL could not be parsed.
    #[error("Invalid portal URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The API key cannot be carried in an HTTP header.
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[from] http::header::InvalidHeaderValue),

    /// The request body could not be serialized.
    #[error("Failed to serialize request body: {0}")]
    Body(#[from] serde_json::Error),

    /// DNS, connect, timeout or body-read failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
