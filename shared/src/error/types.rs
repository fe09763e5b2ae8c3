//! Error types and the failure response body

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type for the walk-in API, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (itemized validation messages, upstream error text)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    pub details: Option<Value>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Replace the details payload
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Validation failure carrying one message per failed field
    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed).with_details(errors)
    }

    /// Unknown running number on update
    pub fn record_not_found(running_number: u64) -> Self {
        Self::with_message(
            ErrorCode::RecordNotFound,
            format!("Running number {} not found", running_number),
        )
    }

    /// Create an invalid request error
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }
}

/// Failure body returned by every handler
///
/// ```json
/// { "success": false, "code": 2, "error": "Validation failed", "details": ["Grade is required"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    /// Numeric [`ErrorCode`]
    pub code: u16,
    /// Human-readable message
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            code: err.code.code(),
            error: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ErrorBody::from(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::RecordNotFound);
        assert_eq!(err.code, ErrorCode::RecordNotFound);
        assert_eq!(err.message, "Running number not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_message() {
        let err = AppError::with_message(ErrorCode::ValidationFailed, "Invalid email format");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "Invalid email format");
    }

    #[test]
    fn test_validation_errors_are_itemized() {
        let err = AppError::validation_errors(vec![
            "Grade is required".to_string(),
            "Full Name is required".to_string(),
        ]);
        assert_eq!(err.message, "Validation failed");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(details[0], "Grade is required");
        assert_eq!(details[1], "Full Name is required");
    }

    #[test]
    fn test_record_not_found_message() {
        let err = AppError::record_not_found(42);
        assert_eq!(err.message, "Running number 42 not found");
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_serialize() {
        let err = AppError::validation_errors(vec!["Sales Queue is required".into()]);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 2);
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"][0], "Sales Queue is required");
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let err = AppError::new(ErrorCode::PhoneNumberMissing);
        let json = serde_json::to_string(&ErrorBody::from(&err)).unwrap();
        assert!(!json.contains("details"));
    }
}
