//! Client side of the walk-in intake system
//!
//! - [`WalkInClient`]: typed HTTP calls to walkin-server
//! - [`mapper`]: sheet rows to form data and back
//! - [`wizard`]: multi-step form state and final submit
//! - [`list`]: sorting, search and paging of stored records

pub mod config;
pub mod error;
pub mod http;
pub mod list;
pub mod mapper;
pub mod wizard;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, MapperError};
pub use http::WalkInClient;
pub use list::RecordList;
pub use mapper::{form_to_row, row_to_form, value_to_form};
pub use wizard::{Endpoint, Submission, SubmitResult, WizardState, submit_wizard};
