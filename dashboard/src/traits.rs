//! Service trait definitions for dependency injection
//!
//! All network I/O is abstracted through these traits for testability

use async_trait::async_trait;
use shared::{AuditEntry, ContractEvaluation};

use crate::error::DashboardResult;

/// Evaluation service REST surface
#[mockall::automock]
#[async_trait]
pub trait EvaluationApi: Send + Sync {
    /// `GET /results`; a response without `results` yields an empty list
    async fn fetch_evaluations(&self) -> DashboardResult<Vec<ContractEvaluation>>;

    /// `POST /evaluate-sample/{sample}`; waits for the updated record
    async fn evaluate_sample(&self, sample_name: &str) -> DashboardResult<ContractEvaluation>;

    /// `GET /results/{contract_id}`
    async fn fetch_evaluation(&self, contract_id: &str) -> DashboardResult<ContractEvaluation>;

    /// `GET /audit-log?limit=N`, most recent first
    async fn fetch_audit_log(&self, limit: u32) -> DashboardResult<Vec<AuditEntry>>;

    /// `GET /health`
    async fn health(&self) -> DashboardResult<serde_json::Value>;
}
