//! Dashboard-specific error types

use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to fetch evaluations: {reason}")]
    FetchFailure { reason: String },

    #[error("Failed to evaluate vendor: {vendor}: {reason}")]
    AnalysisFailure { vendor: String, reason: String },

    #[error("Contract not found in store: {contract_id}")]
    NotFound { contract_id: String },

    #[error("Contract {contract_id} already present in store")]
    DuplicateContract { contract_id: String },

    #[error("Failed to fetch evaluation for {contract_id}: {reason}")]
    ContractFetchFailure { contract_id: String, reason: String },

    #[error("Failed to fetch audit log: {reason}")]
    AuditLogFailure { reason: String },

    #[error("API health check failed: {reason}")]
    HealthCheckFailure { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        DashboardError::Config(message.into())
    }

    pub fn fetch(reason: impl std::fmt::Display) -> Self {
        DashboardError::FetchFailure {
            reason: reason.to_string(),
        }
    }

    pub fn analysis(vendor: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        DashboardError::AnalysisFailure {
            vendor: vendor.into(),
            reason: reason.to_string(),
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
