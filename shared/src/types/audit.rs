//! Audit trail entries exposed by the evaluation service

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One immutable audit record written by a backend agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(default)]
    pub timestamp: Option<String>,

    #[serde(default)]
    pub agent: Option<String>,

    #[serde(default)]
    pub action: Option<String>,

    #[serde(default)]
    pub input_hash: Option<String>,

    #[serde(default)]
    pub output_hash: Option<String>,

    #[serde(default)]
    pub confidence: Option<f64>,

    #[serde(default)]
    pub human_override: bool,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
