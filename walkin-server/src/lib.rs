//! Walk-in lead intake server
//!
//! JSON API over a spreadsheet of walk-in records: submit, draft, update by
//! running number, duplicate lookup by phone and full listing.

pub mod api;
pub mod config;
pub mod error;
pub mod logger;
pub mod services;
pub mod sheets;
pub mod state;

pub use api::build_app;
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
