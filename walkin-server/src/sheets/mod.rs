//! Spreadsheet backends
//!
//! [`SheetBackend`] is the seam between the walk-in service and storage.
//! [`GoogleSheets`] talks to the Sheets v4 REST API; [`MemorySheet`] keeps the
//! grid in-process for local runs and tests.

mod auth;
mod google;
mod memory;

pub use auth::{ServiceAccountKey, TokenProvider};
pub use google::{DEFAULT_API_BASE, GoogleSheets};
pub use memory::{MemorySheet, standard_headers};

use async_trait::async_trait;
use shared::error::{AppError, ErrorCode};
use shared::sheet::SheetRange;
use thiserror::Error;

/// Spreadsheet access errors
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Sheet unavailable: {0}")]
    Unavailable(String),
}

impl SheetError {
    /// Error code reported to API callers
    pub fn code(&self) -> ErrorCode {
        match self {
            SheetError::Auth(_) => ErrorCode::SheetAuthFailed,
            SheetError::Config(_) => ErrorCode::ConfigError,
            _ => ErrorCode::SheetUnavailable,
        }
    }
}

impl From<SheetError> for AppError {
    fn from(e: SheetError) -> Self {
        AppError::with_message(e.code(), e.to_string())
    }
}

/// Spreadsheet title and worksheet names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetInfo {
    pub title: String,
    pub sheet_titles: Vec<String>,
}

/// Row-oriented access to one worksheet
#[async_trait]
pub trait SheetBackend: Send + Sync {
    /// Cell values of `range`, row-major. Trailing empty cells and rows may be
    /// omitted, so rows can be shorter than the range width.
    async fn read_range(&self, range: SheetRange) -> Result<Vec<Vec<String>>, SheetError>;

    /// Append `row` after the last row of the table in `range`.
    /// Returns the updated range in A1 notation.
    async fn append_row(&self, range: SheetRange, row: Vec<String>) -> Result<String, SheetError>;

    /// Overwrite the cells of `range` with `row`
    async fn update_row(&self, range: SheetRange, row: Vec<String>) -> Result<(), SheetError>;

    async fn spreadsheet_info(&self) -> Result<SpreadsheetInfo, SheetError>;
}
