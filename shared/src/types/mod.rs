//! Core types shared between the dashboard library and its front ends

pub mod audit;
pub mod evaluation;

pub use audit::AuditEntry;
pub use evaluation::{
    ConfidenceLevel, ContractEvaluation, ContractId, EvaluationStatus, Grade, Recommendation, RiskLevel,
};

use std::fmt;

/// Dashboard component emitting a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Evaluation store mutations
    Store,
    /// Polling controller and its timer
    Poller,
    /// Selection and deep-analysis flow
    Analysis,
    /// HTTP client for the evaluation service
    Api,
    /// Terminal front end
    Cli,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Store => write!(f, "store"),
            Component::Poller => write!(f, "poller"),
            Component::Analysis => write!(f, "analysis"),
            Component::Api => write!(f, "api"),
            Component::Cli => write!(f, "cli"),
        }
    }
}
