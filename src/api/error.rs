//! Sentiment API error types

use thiserror::Error;

/// Transport-level failures talking to the sentiment API.
///
/// An API that answers with `success: false` is not an `ApiError`; that body
/// decodes normally and is surfaced as an application error by the caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Server could not be reached
    #[error("Sentiment API unavailable at {0}")]
    Unavailable(String),

    /// Request did not complete within the configured timeout
    #[error("Request timeout")]
    Timeout,

    /// Any other reqwest failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body was not the JSON we expected
    #[error("Malformed response ({status}): {message}")]
    Decode { status: u16, message: String },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_send(err: reqwest::Error, base_url: &str) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_connect() {
            ApiError::Unavailable(base_url.to_string())
        } else {
            ApiError::Request(err)
        }
    }
}
