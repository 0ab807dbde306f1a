//! Test helpers and builder patterns for dashboard tests
//!
//! `ScriptedApi` holds each backend response until the test releases it,
//! which lets a test interleave overlapping refreshes and analyses.

use async_trait::async_trait;
use dashboard::{Dashboard, DashboardConfig, DashboardError, DashboardResult, DashboardSnapshot, EvaluationApi, RefreshOrdering};
use shared::{AuditEntry, ContractEvaluation};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use super::fixtures::TestFixtures;

type Reply<T> = oneshot::Receiver<DashboardResult<T>>;

/// Releases one held response
pub struct Release<T>(oneshot::Sender<DashboardResult<T>>);

impl<T> Release<T> {
    pub fn ok(self, value: T) {
        let _ = self.0.send(Ok(value));
    }

    pub fn err(self, error: DashboardError) {
        let _ = self.0.send(Err(error));
    }
}

#[derive(Default)]
struct Script {
    fetches: Mutex<VecDeque<Reply<Vec<ContractEvaluation>>>>,
    analyses: Mutex<VecDeque<Reply<ContractEvaluation>>>,
    fallback: Mutex<Vec<ContractEvaluation>>,
    fetch_calls: AtomicUsize,
    analysis_calls: Mutex<Vec<String>>,
}

/// Evaluation API fake driven by the test
///
/// Unscripted fetches answer immediately with the fallback list; unscripted
/// analyses fail.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    script: Arc<Script>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(contracts: Vec<ContractEvaluation>) -> Self {
        let api = Self::new();
        api.set_fallback(contracts);
        api
    }

    pub fn set_fallback(&self, contracts: Vec<ContractEvaluation>) {
        *self.script.fallback.lock().unwrap() = contracts;
    }

    /// Hold the next `fetch_evaluations` call until released
    pub fn hold_fetch(&self) -> Release<Vec<ContractEvaluation>> {
        let (tx, rx) = oneshot::channel();
        self.script.fetches.lock().unwrap().push_back(rx);
        Release(tx)
    }

    /// Hold the next `evaluate_sample` call until released
    pub fn hold_analysis(&self) -> Release<ContractEvaluation> {
        let (tx, rx) = oneshot::channel();
        self.script.analyses.lock().unwrap().push_back(rx);
        Release(tx)
    }

    pub fn fetch_calls(&self) -> usize {
        self.script.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn analysis_calls(&self) -> Vec<String> {
        self.script.analysis_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EvaluationApi for ScriptedApi {
    async fn fetch_evaluations(&self) -> DashboardResult<Vec<ContractEvaluation>> {
        self.script.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let held = self.script.fetches.lock().unwrap().pop_front();
        match held {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(DashboardError::fetch("scripted response dropped"))),
            None => Ok(self.script.fallback.lock().unwrap().clone()),
        }
    }

    async fn evaluate_sample(&self, sample_name: &str) -> DashboardResult<ContractEvaluation> {
        self.script.analysis_calls.lock().unwrap().push(sample_name.to_string());
        let held = self.script.analyses.lock().unwrap().pop_front();
        match held {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(DashboardError::analysis(sample_name, "scripted response dropped"))),
            None => Err(DashboardError::analysis(sample_name, "no scripted analysis")),
        }
    }

    async fn fetch_evaluation(&self, contract_id: &str) -> DashboardResult<ContractEvaluation> {
        self.script
            .fallback
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.contract_id == contract_id)
            .cloned()
            .ok_or_else(|| DashboardError::ContractFetchFailure {
                contract_id: contract_id.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            })
    }

    async fn fetch_audit_log(&self, _limit: u32) -> DashboardResult<Vec<AuditEntry>> {
        Ok(vec![])
    }

    async fn health(&self) -> DashboardResult<serde_json::Value> {
        Ok(serde_json::json!({"status": "healthy"}))
    }
}

/// Builder for test dashboards with sensible defaults
pub struct DashboardBuilder {
    api: ScriptedApi,
    config: DashboardConfig,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            api: ScriptedApi::with_fallback(TestFixtures::seeded_contracts()),
            config: TestFixtures::config(),
        }
    }

    pub fn with_api(mut self, api: ScriptedApi) -> Self {
        self.api = api;
        self
    }

    pub fn with_ordering(mut self, ordering: RefreshOrdering) -> Self {
        self.config.refresh_ordering = ordering;
        self
    }

    /// Returns the dashboard plus a handle for scripting its API
    pub fn build(self) -> (Dashboard<ScriptedApi>, ScriptedApi) {
        let handle = self.api.clone();
        (Dashboard::new(self.api, &self.config), handle)
    }
}

/// Common assertions and waiting helpers
pub struct TestHelpers;

impl TestHelpers {
    pub const TEST_TIMEOUT: Duration = Duration::from_secs(1);

    /// Yield until `condition` holds; panics after `TEST_TIMEOUT`
    pub async fn wait_for(mut condition: impl FnMut() -> bool) {
        tokio::time::timeout(Self::TEST_TIMEOUT, async {
            while !condition() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("Condition not reached before timeout");
    }

    pub fn ids(snapshot: &DashboardSnapshot) -> Vec<String> {
        snapshot.contracts.iter().map(|c| c.contract_id.clone()).collect()
    }

    /// No refresh or analysis outstanding
    pub fn assert_idle(snapshot: &DashboardSnapshot) {
        assert!(!snapshot.loading, "Expected no refresh in flight");
        assert_eq!(snapshot.analyzing_id, None, "Expected no analysis in flight");
        assert!(!snapshot.suppressed);
    }
}
