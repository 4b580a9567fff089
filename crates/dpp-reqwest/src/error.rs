//! Internal error types for dpp-reqwest.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for dpp-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for dpp-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Endpoint answered with a non-success status.
    #[error("{endpoint} endpoint returned HTTP {status}")]
    Status {
        /// Which endpoint answered.
        endpoint: &'static str,
        /// Status code of the response.
        status: StatusCode,
        /// Response body, for diagnostics.
        body: String,
    },
    /// Response decoded but lacked a required field.
    #[error("{endpoint} response is missing `{field}`")]
    MissingField {
        /// Which endpoint answered.
        endpoint: &'static str,
        /// Dotted path of the missing field.
        field: &'static str,
    },
}

impl From<Error> for dpp_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                let message = if e.is_timeout() {
                    "Request timed out".to_owned()
                } else if e.is_connect() {
                    "Connection failed".to_owned()
                } else {
                    e.to_string()
                };
                dpp_core::Error::auth().with_message(message).with_source(e)
            }
            Error::Serde(e) => dpp_core::Error::auth()
                .with_message(format!("Malformed response: {e}"))
                .with_source(e),
            err @ (Error::Status { .. } | Error::MissingField { .. }) => {
                dpp_core::Error::auth().with_message(err.to_string())
            }
        }
    }
}
