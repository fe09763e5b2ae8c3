//! Client error types

use shared::error::ErrorBody;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// 400 from the server; `details` holds the itemized messages when present
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    /// 404 from the server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Submission blocked before anything was sent
    #[error("Form is incomplete: {}", .0.join("; "))]
    Incomplete(Vec<String>),

    /// Edit mode without a resolvable running number
    #[error("Running number of the record being edited is unknown")]
    MissingRunningNumber,
}

impl ClientError {
    /// Build from a failure status and its body text
    pub(crate) fn from_status(status: reqwest::StatusCode, text: &str) -> Self {
        let body: Option<ErrorBody> = serde_json::from_str(text).ok();
        let message = body
            .as_ref()
            .map(|b| b.error.clone())
            .unwrap_or_else(|| text.to_string());

        match status {
            reqwest::StatusCode::BAD_REQUEST => {
                let details = body
                    .and_then(|b| b.details)
                    .and_then(|d| serde_json::from_value::<Vec<String>>(d).ok())
                    .unwrap_or_default();
                ClientError::Validation { message, details }
            }
            reqwest::StatusCode::NOT_FOUND => ClientError::NotFound(message),
            _ => ClientError::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Record mapper input errors
#[derive(Debug, Error, PartialEq)]
pub enum MapperError {
    /// Row data was not a JSON object
    #[error("expected a JSON object for a sheet row, got {0}")]
    NotAnObject(&'static str),

    /// Form data could not be read
    #[error("invalid form data: {0}")]
    InvalidForm(String),
}
