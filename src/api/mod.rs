//! Scoring service API: wire types, errors, and the HTTP client.

mod client;
mod error;
mod types;

pub use client::{ScoringApi, ScoringClient};
pub use error::ServiceError;
pub use types::{RequestStatus, StatusReport, SubmitReceipt, TokenResponse};

#[cfg(test)]
pub use client::MockScoringApi;
