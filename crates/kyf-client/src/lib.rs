//! Remote side of the Know Your Fan intake flow.
//!
//! [`FanApiClient`] speaks to the intake backend; [`SubmissionOrchestrator`]
//! sequences the write and the two best-effort enrichment reads and records
//! their outcomes on a shared [`kyf_core::DisplayBoard`].

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod types;

pub use client::{build_submit_form, FanApiClient};
pub use error::ClientError;
pub use orchestrator::{
    connection_error_message, SubmissionOrchestrator, SubmissionReport, SubmitError,
    DEFAULT_SUCCESS_MESSAGE,
};
pub use types::{ErrorBody, FeedResponse, SubmitResponse, TwitterProfileResponse};
