//! Business services
//!
//! - [`WalkInService`]: record submit/update/lookup over a sheet backend
//! - [`validate_submission`]: required-field and format checks

pub mod validation;
pub mod walkin;

pub use validation::validate_submission;
pub use walkin::{AppendOutcome, SubmitOutcome, WalkInService};
