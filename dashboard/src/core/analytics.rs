//! View models derived from the evaluation store
//!
//! Pure functions over a slice of records; rendering collaborators consume
//! these instead of reading raw payload fields.

use serde::Serialize;
use shared::{ContractEvaluation, RiskLevel};

/// Headline counts for the stats cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub total: usize,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    /// Mean score rounded to one decimal, 0.0 for an empty store
    pub average_score: f64,
}

impl EvaluationSummary {
    pub fn from_contracts(contracts: &[ContractEvaluation]) -> Self {
        let total = contracts.len();
        let count = |level: RiskLevel| contracts.iter().filter(|c| c.risk() == level).count();

        let average_score = if total > 0 {
            let sum: f64 = contracts.iter().map(ContractEvaluation::score).sum();
            round_one_decimal(sum / total as f64)
        } else {
            0.0
        };

        Self {
            total,
            low_risk: count(RiskLevel::Low),
            medium_risk: count(RiskLevel::Medium),
            high_risk: count(RiskLevel::High),
            average_score,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One slice of the risk distribution chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSlice {
    pub level: RiskLevel,
    pub name: &'static str,
    pub value: usize,
}

/// Risk slices with at least one contract, ordered low to high
pub fn risk_distribution(contracts: &[ContractEvaluation]) -> Vec<RiskSlice> {
    let summary = EvaluationSummary::from_contracts(contracts);
    [
        (RiskLevel::Low, "Low Risk", summary.low_risk),
        (RiskLevel::Medium, "Medium Risk", summary.medium_risk),
        (RiskLevel::High, "High Risk", summary.high_risk),
    ]
    .into_iter()
    .filter(|(_, _, value)| *value > 0)
    .map(|(level, name, value)| RiskSlice { level, name, value })
    .collect()
}

/// Bar chart point for one vendor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub name: String,
    pub score: f64,
    pub grade: String,
    pub risk: String,
}

pub fn score_points(contracts: &[ContractEvaluation]) -> Vec<ScorePoint> {
    contracts
        .iter()
        .map(|c| ScorePoint {
            name: c.display_vendor().to_string(),
            score: c.score(),
            grade: c.grade().to_string(),
            risk: c.risk().to_string(),
        })
        .collect()
}

/// Explanation chain of an analyzed contract
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReasoningView {
    pub steps: Vec<String>,
    pub confidence: Option<String>,
    pub justification: Option<String>,
    pub alternative_consideration: Option<String>,
}

impl ReasoningView {
    /// `None` until deep analysis has produced a reasoning chain
    pub fn from_contract(contract: &ContractEvaluation) -> Option<Self> {
        let steps = contract.reasoning_chain.clone()?;
        Some(Self {
            steps,
            confidence: contract.confidence_level.clone(),
            justification: contract.justification.clone(),
            alternative_consideration: contract.alternative_consideration.clone(),
        })
    }
}
