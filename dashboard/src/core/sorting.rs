//! Client-side table ordering
//!
//! Sorting produces a view over the store; the store itself always keeps
//! backend order.

use serde::{Deserialize, Serialize};
use shared::ContractEvaluation;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    VendorName,
    ContractId,
    PerformanceScore,
    Grade,
    RiskLevel,
    Recommendation,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::VendorName => "vendor_name",
            SortField::ContractId => "contract_id",
            SortField::PerformanceScore => "performance_score",
            SortField::Grade => "grade",
            SortField::RiskLevel => "risk_level",
            SortField::Recommendation => "recommendation",
        }
    }

    /// Raw string key; `None` when the field is absent from the payload
    fn text_key<'a>(&self, record: &'a ContractEvaluation) -> Option<&'a str> {
        match self {
            SortField::VendorName => record.vendor_name.as_deref(),
            SortField::ContractId => Some(record.contract_id.as_str()),
            SortField::Grade => record.grade.as_deref(),
            SortField::RiskLevel => record.risk_level.as_deref(),
            SortField::Recommendation => record.recommendation.as_deref(),
            SortField::PerformanceScore => None,
        }
    }

    fn compare(&self, a: &ContractEvaluation, b: &ContractEvaluation) -> Ordering {
        match self {
            SortField::PerformanceScore => a.score().total_cmp(&b.score()),
            _ => self.text_key(a).cmp(&self.text_key(b)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "vendor_name" | "vendor" => Ok(SortField::VendorName),
            "contract_id" | "contract" => Ok(SortField::ContractId),
            "performance_score" | "score" => Ok(SortField::PerformanceScore),
            "grade" => Ok(SortField::Grade),
            "risk_level" | "risk" => Ok(SortField::RiskLevel),
            "recommendation" => Ok(SortField::Recommendation),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current table ordering, defaulting to best score first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            field: SortField::PerformanceScore,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: same field flips direction, a new field starts descending
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = self.direction.flipped();
        } else {
            self.field = field;
            self.direction = SortDirection::Desc;
        }
    }

    /// Sorted view; ties keep backend order
    pub fn apply<'a>(&self, contracts: &'a [ContractEvaluation]) -> Vec<&'a ContractEvaluation> {
        let mut view: Vec<&ContractEvaluation> = contracts.iter().collect();
        view.sort_by(|a, b| {
            let ordering = self.field.compare(a, b);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        view
    }
}
