//! Dashboard library for the contract evaluation service
//!
//! Polls the evaluation service, keeps the evaluation store current, and
//! drives on-demand deep analysis for the selected vendor. Rendering
//! collaborators read `DashboardSnapshot`s and the view models in `core`.

pub mod config;
pub mod core;
pub mod dashboard_impl;
pub mod error;
pub mod render;
pub mod services;
pub mod state;
pub mod traits;

// Re-export main types
pub use config::{DashboardConfig, RefreshOrdering, SampleRegistry};
pub use dashboard_impl::Dashboard;
pub use error::{DashboardError, DashboardResult};
pub use state::{DashboardSnapshot, DashboardState, SharedState};

// Re-export trait definitions
pub use traits::{EvaluationApi, MockEvaluationApi};

// Re-export service implementations
pub use services::{
    AutoRefreshHandle, HttpEvaluationApi, PollingController, RefreshOutcome, SelectOutcome, SelectionController,
};
