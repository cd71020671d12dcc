//! Submission endpoint client
//!
//! The only network traffic the portal produces: one JSON POST per
//! completed survey, behind the `SubmissionTransport` trait so the portal can
//! be driven without a live endpoint.

pub mod client;
pub mod constants;
pub mod logging;

pub use client::{SubmissionClient, SubmissionReceipt, SubmissionTransport};
pub use logging::{SubmissionContext, SubmissionLogger};
