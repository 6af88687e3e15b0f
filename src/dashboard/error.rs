//! Dashboard error types

use thiserror::Error;

use crate::api::ApiError;

/// Shown when the API cannot be reached or answers with something unreadable
pub const CONNECTION_FAILED: &str =
    "Could not reach the sentiment API. Check that the server is running.";

/// Why a dashboard operation did not produce a result.
///
/// Every variant has already been surfaced through the view by the time the
/// caller sees it.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// The API answered with `success: false`
    #[error("Error: {0}")]
    Application(String),

    /// Network failure or malformed response
    #[error("Could not reach the sentiment API. Check that the server is running.")]
    Transport(#[from] ApiError),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
