//! Test fixtures and data for dashboard tests
//!
//! Consistent evaluation records and configuration used across all suites.

use dashboard::DashboardConfig;
use shared::ContractEvaluation;
use std::collections::HashMap;

/// Standard test data and fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// Contract ids as issued by the evaluation service
    pub const ABC_CONTRACT: &'static str = "C1";
    pub const XYZ_CONTRACT: &'static str = "C2";
    pub const PROBLEM_CONTRACT: &'static str = "C3";
    pub const UNREGISTERED_CONTRACT: &'static str = "C9";

    /// Vendor display names and their backend samples
    pub const ABC_VENDOR: &'static str = "ABC IT Solutions";
    pub const XYZ_VENDOR: &'static str = "XYZ Tech";
    pub const PROBLEM_VENDOR: &'static str = "Problematic Corp";
    pub const XYZ_SAMPLE: &'static str = "vendor_xyz_tech";
    pub const ABC_SAMPLE: &'static str = "vendor_abc_it_solutions";

    pub const REFRESH_SECS: u64 = 30;

    pub fn abc() -> ContractEvaluation {
        ContractEvaluation::new(Self::ABC_CONTRACT)
            .with_vendor(Self::ABC_VENDOR)
            .with_score(72.0)
            .with_grade("C")
            .with_risk("medium")
    }

    pub fn xyz() -> ContractEvaluation {
        ContractEvaluation::new(Self::XYZ_CONTRACT)
            .with_vendor(Self::XYZ_VENDOR)
            .with_score(88.0)
            .with_grade("B")
            .with_risk("low")
    }

    pub fn problematic() -> ContractEvaluation {
        ContractEvaluation::new(Self::PROBLEM_CONTRACT)
            .with_vendor(Self::PROBLEM_VENDOR)
            .with_score(41.0)
            .with_grade("F")
            .with_risk("high")
            .with_recommendation("terminate")
    }

    pub fn unregistered() -> ContractEvaluation {
        ContractEvaluation::new(Self::UNREGISTERED_CONTRACT)
            .with_vendor("Unregistered Vendor")
            .with_score(55.0)
    }

    /// The three seeded vendors in backend order
    pub fn seeded_contracts() -> Vec<ContractEvaluation> {
        vec![Self::abc(), Self::xyz(), Self::problematic()]
    }

    /// XYZ Tech after deep analysis
    pub fn analyzed_xyz() -> ContractEvaluation {
        let mut record = Self::xyz().with_grade("A").with_recommendation("renew");
        record.reasoning_chain = Some(vec![
            "Delivery metrics exceed SLA in 11 of 12 months".to_string(),
            "No open compliance findings".to_string(),
        ]);
        record.confidence_level = Some("HIGH".to_string());
        record.justification = Some("Consistently strong performance".to_string());
        record
    }

    pub fn config() -> DashboardConfig {
        DashboardConfig {
            refresh_interval_secs: Self::REFRESH_SECS,
            vendor_samples: HashMap::from([
                (Self::ABC_VENDOR.to_string(), Self::ABC_SAMPLE.to_string()),
                (Self::XYZ_VENDOR.to_string(), Self::XYZ_SAMPLE.to_string()),
                (Self::PROBLEM_VENDOR.to_string(), "vendor_problematic_corp".to_string()),
            ]),
            ..DashboardConfig::default()
        }
    }
}
