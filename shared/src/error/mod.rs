//! Unified error system for the walk-in services
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ErrorBody`]: The `{ success: false, ... }` JSON body sent to clients
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 4xxx: Walk-in record errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::validation_errors(vec!["Grade is required".to_string()]);
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let body = ErrorBody::from(&err);
//! assert!(!body.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
