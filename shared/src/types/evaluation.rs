//! Contract evaluation records as returned by the evaluation service
//!
//! Records are treated as opaque payloads with a set of known fields. Every
//! known field is optional on the wire except `contract_id`; typed accessors
//! apply the display fallbacks used throughout the dashboard. Unknown fields
//! are kept in `extra` so a record can be replaced wholesale without loss.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier of a contract
pub type ContractId = String;

/// One contract evaluation produced by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEvaluation {
    pub contract_id: ContractId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,

    /// Number or numeric string, kept as received
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_chain: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_level: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub justification: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternative_consideration: Option<String>,

    /// Fields this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ContractEvaluation {
    /// Create a bare record with only its identifier set
    pub fn new(contract_id: impl Into<ContractId>) -> Self {
        Self {
            contract_id: contract_id.into(),
            vendor_name: None,
            performance_score: None,
            grade: None,
            risk_level: None,
            recommendation: None,
            status: None,
            reasoning_chain: None,
            confidence_level: None,
            justification: None,
            alternative_consideration: None,
            extra: Map::new(),
        }
    }

    pub fn with_vendor(mut self, vendor_name: impl Into<String>) -> Self {
        self.vendor_name = Some(vendor_name.into());
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.performance_score = serde_json::Number::from_f64(score).map(Value::Number);
        self
    }

    pub fn with_risk(mut self, risk_level: impl Into<String>) -> Self {
        self.risk_level = Some(risk_level.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_recommendation(mut self, recommendation: impl Into<String>) -> Self {
        self.recommendation = Some(recommendation.into());
        self
    }

    /// Vendor name for display, `"Unknown"` when absent
    pub fn display_vendor(&self) -> &str {
        self.vendor_name.as_deref().unwrap_or("Unknown")
    }

    /// Score as a number; absent or unparsable scores count as 0
    pub fn score(&self) -> f64 {
        match &self.performance_score {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => parse_leading_float(s).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    pub fn grade(&self) -> Grade {
        self.grade
            .as_deref()
            .and_then(Grade::parse)
            .unwrap_or(Grade::F)
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk_level
            .as_deref()
            .map(RiskLevel::parse)
            .unwrap_or(RiskLevel::Unknown)
    }

    pub fn recommendation(&self) -> Recommendation {
        self.recommendation
            .as_deref()
            .map(Recommendation::parse)
            .unwrap_or(Recommendation::Review)
    }

    pub fn status(&self) -> EvaluationStatus {
        self.status
            .as_deref()
            .map(EvaluationStatus::parse)
            .unwrap_or(EvaluationStatus::Unknown)
    }

    /// Confidence is only present once deep analysis has run
    pub fn confidence(&self) -> Option<ConfidenceLevel> {
        self.confidence_level.as_deref().and_then(ConfidenceLevel::parse)
    }

    /// True when the record carries a reasoning chain from deep analysis
    pub fn is_analyzed(&self) -> bool {
        self.reasoning_chain.is_some()
    }
}

/// Parse the longest numeric prefix, the way a lenient browser parser does ("72.5%" -> 72.5)
fn parse_leading_float(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
            }
            '-' | '+' if idx == 0 => {}
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Letter grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "A" => Some(Grade::A),
            "B" => Some(Grade::B),
            "C" => Some(Grade::C),
            "D" => Some(Grade::D),
            "F" => Some(Grade::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Risk classification, matched case-insensitively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

impl RiskLevel {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Unknown => "unknown",
        }
    }

    /// Upper-case badge label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Contract action recommended by the evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    Renew,
    Monitor,
    Renegotiate,
    Terminate,
    Review,
}

impl Recommendation {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "RENEW" => Recommendation::Renew,
            "MONITOR" => Recommendation::Monitor,
            "RENEGOTIATE" => Recommendation::Renegotiate,
            "TERMINATE" => Recommendation::Terminate,
            _ => Recommendation::Review,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Renew => "RENEW",
            Recommendation::Monitor => "MONITOR",
            Recommendation::Renegotiate => "RENEGOTIATE",
            Recommendation::Terminate => "TERMINATE",
            Recommendation::Review => "REVIEW",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Processing status of an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvaluationStatus {
    Completed,
    Failed,
    Unknown,
}

impl EvaluationStatus {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "completed" => EvaluationStatus::Completed,
            "failed" => EvaluationStatus::Failed,
            _ => EvaluationStatus::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::Completed => "completed",
            EvaluationStatus::Failed => "failed",
            EvaluationStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Confidence reported by deep analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Some(ConfidenceLevel::High),
            "MEDIUM" => Some(ConfidenceLevel::Medium),
            "LOW" => Some(ConfidenceLevel::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::High => "HIGH",
            ConfidenceLevel::Medium => "MEDIUM",
            ConfidenceLevel::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
