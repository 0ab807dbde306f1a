//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod analytics;
pub mod sorting;
pub mod store;

// Re-export commonly used types
pub use analytics::{EvaluationSummary, ReasoningView, RiskSlice, ScorePoint, risk_distribution, score_points};
pub use sorting::{SortDirection, SortField, SortState};
pub use store::EvaluationStore;
