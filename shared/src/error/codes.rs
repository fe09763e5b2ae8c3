//! Unified error codes for the walk-in services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Walk-in record errors
//! - 9xxx: System / spreadsheet errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the frontend can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 4xxx: Walk-in ====================
    /// No row carries the requested running number
    RecordNotFound = 4001,
    /// Update payload has no numeric running number
    RunningNumberMissing = 4002,
    /// Customer lookup without a phone number
    PhoneNumberMissing = 4003,
    /// Submission could not be stored
    SubmitFailed = 4004,
    /// Draft could not be stored
    DraftSaveFailed = 4005,
    /// Row update could not be stored
    UpdateFailed = 4006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Spreadsheet API unreachable or returned an error
    SheetUnavailable = 9002,
    /// Spreadsheet credentials rejected
    SheetAuthFailed = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Walk-in
            ErrorCode::RecordNotFound => "Running number not found",
            ErrorCode::RunningNumberMissing => "Missing running number (no)",
            ErrorCode::PhoneNumberMissing => "Phone number is required",
            ErrorCode::SubmitFailed => "Failed to submit form",
            ErrorCode::DraftSaveFailed => "Failed to save draft",
            ErrorCode::UpdateFailed => "Failed to update row",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::SheetUnavailable => "Spreadsheet service unavailable",
            ErrorCode::SheetAuthFailed => "Spreadsheet authentication failed",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),

            // Walk-in
            4001 => Ok(ErrorCode::RecordNotFound),
            4002 => Ok(ErrorCode::RunningNumberMissing),
            4003 => Ok(ErrorCode::PhoneNumberMissing),
            4004 => Ok(ErrorCode::SubmitFailed),
            4005 => Ok(ErrorCode::DraftSaveFailed),
            4006 => Ok(ErrorCode::UpdateFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::SheetUnavailable),
            9003 => Ok(ErrorCode::SheetAuthFailed),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}
