//! Main dashboard implementation
//!
//! `Dashboard` owns the shared state and wires the polling and selection
//! controllers to one `EvaluationApi`, using dependency injection so tests
//! can swap in a mock API.

use shared::{AuditEntry, Component, ContractEvaluation, component_info, logging};
use std::sync::Arc;
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::services::{AutoRefreshHandle, PollingController, RefreshOutcome, SelectOutcome, SelectionController};
use crate::state::{DashboardSnapshot, SharedState};
use crate::traits::EvaluationApi;

pub struct Dashboard<A: EvaluationApi + 'static> {
    api: Arc<A>,
    state: SharedState,
    poller: PollingController<A>,
    selection: SelectionController<A>,
    refresh_interval: Duration,
    audit_log_limit: u32,
    auto_refresh: Option<AutoRefreshHandle>,
}

impl<A: EvaluationApi + 'static> Dashboard<A> {
    /// Create a dashboard with injected API; nothing runs until `init`
    pub fn new(api: A, config: &DashboardConfig) -> Self {
        let api = Arc::new(api);
        let state = SharedState::new();
        let poller = PollingController::new(Arc::clone(&api), state.clone(), config.refresh_ordering);
        let selection = SelectionController::new(Arc::clone(&api), state.clone(), config.sample_registry());

        Self {
            api,
            state,
            poller,
            selection,
            refresh_interval: config.refresh_interval(),
            audit_log_limit: config.audit_log_limit,
            auto_refresh: None,
        }
    }

    /// Initial load followed by the auto-refresh timer
    pub async fn init(&mut self) -> RefreshOutcome {
        let samples = self.selection.samples().entries();
        logging::log_startup(
            Component::Poller,
            &format!("dashboard with {} analyzable vendors", samples.len()),
        );
        for (vendor, sample) in samples {
            component_info!(Component::Analysis, sample = %sample, "Analyzable vendor: {}", vendor);
        }

        let outcome = self.poller.refresh_now().await;
        self.start_auto_refresh();
        outcome
    }

    /// Start the timer, replacing any timer already running
    pub fn start_auto_refresh(&mut self) {
        let handle = self.poller.start_auto_refresh(self.refresh_interval);
        // Dropping the previous handle cancels its task
        self.auto_refresh = Some(handle);
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.auto_refresh.as_ref().is_some_and(AutoRefreshHandle::is_running)
    }

    pub async fn refresh_now(&self) -> RefreshOutcome {
        self.poller.refresh_now().await
    }

    pub async fn select(&self, contract: ContractEvaluation) -> SelectOutcome {
        self.selection.select(contract).await
    }

    /// Select a contract currently in the store by id
    pub async fn select_by_id(&self, contract_id: &str) -> DashboardResult<SelectOutcome> {
        let contract = self
            .state
            .with(|s| s.store.get(contract_id).cloned())
            .ok_or_else(|| DashboardError::NotFound {
                contract_id: contract_id.to_string(),
            })?;
        Ok(self.select(contract).await)
    }

    pub fn clear_selection(&self) {
        self.selection.clear_selection();
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn poller(&self) -> &PollingController<A> {
        &self.poller
    }

    pub fn selection(&self) -> &SelectionController<A> {
        &self.selection
    }

    /// Single record straight from the backend; does not touch the store
    pub async fn fetch_evaluation(&self, contract_id: &str) -> DashboardResult<ContractEvaluation> {
        self.api.fetch_evaluation(contract_id).await
    }

    pub async fn audit_log(&self) -> DashboardResult<Vec<AuditEntry>> {
        self.api.fetch_audit_log(self.audit_log_limit).await
    }

    pub async fn health(&self) -> DashboardResult<serde_json::Value> {
        self.api.health().await
    }

    /// Stop the timer and detach the state from late responses
    pub async fn teardown(&mut self) {
        if let Some(handle) = self.auto_refresh.take() {
            handle.stop().await;
        }
        self.state.deactivate();
        logging::log_shutdown(Component::Poller, "dashboard torn down");
    }
}
