//! Service implementations
//!
//! The HTTP client for the evaluation service and the two controllers that
//! drive the dashboard state

pub mod api_client;
pub mod polling;
pub mod selection;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use api_client::HttpEvaluationApi;
pub use polling::{AutoRefreshHandle, PollingController, RefreshOutcome};
pub use selection::{SelectOutcome, SelectionController};
