//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod dashboard;
pub mod export;
pub mod goals;
pub mod reports;
pub mod transactions;

// Re-export all handlers for use in router
pub use dashboard::*;
pub use export::*;
pub use goals::*;
pub use reports::*;
pub use transactions::*;

use serde::de::DeserializeOwned;

use crate::AppError;

/// Parse a JSON request body, answering 400 on malformed input
pub(crate) fn parse_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}
