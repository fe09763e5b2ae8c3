//! Unified service-layer error type for walkin-server
//!
//! `ServiceError` bridges spreadsheet errors (`SheetError`) and the API-layer
//! error (`AppError`), so services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::sheets::SheetError;

/// Service-layer error
///
/// - `Sheet`: spreadsheet I/O failure (logged when converted, reported as a system error)
/// - `App`: business-rule error (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Sheet(SheetError),
    App(AppError),
}

impl From<SheetError> for ServiceError {
    fn from(e: SheetError) -> Self {
        ServiceError::Sheet(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl ServiceError {
    /// Report a sheet failure as `code` with the cause in `details`;
    /// business-rule errors pass through unchanged
    pub fn report(self, code: ErrorCode) -> AppError {
        match self {
            ServiceError::App(app_err) => app_err,
            ServiceError::Sheet(sheet_err) => {
                tracing::error!(error = %sheet_err, code = %code, "Sheet operation failed");
                AppError::new(code).with_details(sheet_err.to_string())
            }
        }
    }

    /// Like [`ServiceError::report`] with a custom message
    pub fn report_as(self, code: ErrorCode, message: &str) -> AppError {
        match self.report(code) {
            err if err.code == code => AppError {
                message: message.to_string(),
                ..err
            },
            err => err,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Sheet(sheet_err) => {
                tracing::error!(error = %sheet_err, "Sheet operation failed");
                sheet_err.into()
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
