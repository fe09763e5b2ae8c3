//! Data models
//!
//! Shared between walkin-server and walkin-client (via API).

mod loose;
pub mod options;
pub mod walkin;

// Re-exports
pub use options::*;
pub use walkin::*;
