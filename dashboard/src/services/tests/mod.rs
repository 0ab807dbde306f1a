//! Service-specific tests
//!
//! Each service has its own test file; shared fixtures live in `common`.

#[cfg(test)]
mod polling;

// Common test utilities for services
#[cfg(test)]
pub mod common {
    use shared::ContractEvaluation;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::config::SampleRegistry;
    use crate::traits::MockEvaluationApi;

    pub fn abc() -> ContractEvaluation {
        ContractEvaluation::new("C1")
            .with_vendor("ABC IT Solutions")
            .with_score(72.0)
            .with_risk("medium")
    }

    pub fn xyz() -> ContractEvaluation {
        ContractEvaluation::new("C2")
            .with_vendor("XYZ Tech")
            .with_score(88.0)
            .with_risk("low")
    }

    pub fn unregistered() -> ContractEvaluation {
        ContractEvaluation::new("C9").with_vendor("Unregistered Vendor").with_score(50.0)
    }

    pub fn samples() -> SampleRegistry {
        SampleRegistry::new(HashMap::from([
            ("ABC IT Solutions".to_string(), "vendor_abc_it_solutions".to_string()),
            ("XYZ Tech".to_string(), "vendor_xyz_tech".to_string()),
        ]))
    }

    /// Mock whose `fetch_evaluations` always succeeds and counts its calls
    pub fn counting_fetch_api(contracts: Vec<ContractEvaluation>) -> (MockEvaluationApi, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut api = MockEvaluationApi::new();
        api.expect_fetch_evaluations().returning(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(contracts.clone())
        });

        (api, calls)
    }
}
