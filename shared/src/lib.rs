//! Shared types for the walk-in intake services
//!
//! Wire models, the error system, the worksheet column layout and the
//! date/phone helpers used by both the server and the client.

pub mod date;
pub mod error;
pub mod models;
pub mod sheet;
pub mod util;
pub mod validation;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
