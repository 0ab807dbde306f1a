//! Central state management for the dashboard
//!
//! One owned `DashboardState` sits behind a mutex shared by the controllers.
//! The lock is only taken for short synchronous check-and-set sections and is
//! never held across an `.await`, so every check-and-set is atomic with
//! respect to the other controllers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::{ContractEvaluation, ContractId};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{EvaluationStore, EvaluationSummary, ReasoningView, SortState};

/// Polling bookkeeping
#[derive(Debug, Clone, Default)]
pub struct PollStatus {
    /// Full refreshes currently awaiting a response
    pub in_flight: usize,
    /// Sequence number handed to the next refresh
    pub next_seq: u64,
    /// Refreshes issued before this sequence number are stale
    ///
    /// Set by each applied refresh and by each applied analysis.
    pub applied_seq: Option<u64>,
}

impl PollStatus {
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Selection and analysis bookkeeping
#[derive(Debug, Clone, Default)]
pub struct SelectionStatus {
    pub selected: Option<ContractEvaluation>,
    pub analyzing_id: Option<ContractId>,
    pub last_analysis: Option<DateTime<Utc>>,
}

/// Everything the dashboard knows, owned in one place
#[derive(Debug)]
pub struct DashboardState {
    pub store: EvaluationStore,
    pub poll: PollStatus,
    pub selection: SelectionStatus,
    /// Transient banner shared by refresh and analysis failures
    pub error: Option<String>,
    /// Cleared on teardown; late responses are dropped once false
    pub active: bool,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            store: EvaluationStore::new(),
            poll: PollStatus::default(),
            selection: SelectionStatus::default(),
            error: None,
            active: true,
        }
    }

    /// Auto-refresh is suppressed while an analysis is in flight
    pub fn suppressed(&self) -> bool {
        self.selection.analyzing_id.is_some()
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle to the dashboard state
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<DashboardState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a synchronous section with exclusive access
    pub fn with<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        // A panic inside a section leaves plain data behind, still usable
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn is_active(&self) -> bool {
        self.with(|s| s.active)
    }

    pub fn deactivate(&self) {
        self.with(|s| s.active = false);
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.with(|s| DashboardSnapshot {
            contracts: s.store.contracts().to_vec(),
            last_update: s.store.last_update(),
            loading: s.poll.loading(),
            error: s.error.clone(),
            selected: s.selection.selected.clone(),
            analyzing_id: s.selection.analyzing_id.clone(),
            last_analysis: s.selection.last_analysis,
            suppressed: s.suppressed(),
        })
    }
}

/// Read-only copy of the state handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub contracts: Vec<ContractEvaluation>,
    pub last_update: Option<DateTime<Utc>>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: Option<ContractEvaluation>,
    pub analyzing_id: Option<ContractId>,
    pub last_analysis: Option<DateTime<Utc>>,
    pub suppressed: bool,
}

impl DashboardSnapshot {
    /// Latest of the last full refresh and the last applied analysis
    pub fn last_activity(&self) -> Option<DateTime<Utc>> {
        match (self.last_update, self.last_analysis) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn summary(&self) -> EvaluationSummary {
        EvaluationSummary::from_contracts(&self.contracts)
    }

    pub fn sorted(&self, sort: &SortState) -> Vec<&ContractEvaluation> {
        sort.apply(&self.contracts)
    }

    pub fn reasoning(&self) -> Option<ReasoningView> {
        self.selected.as_ref().and_then(ReasoningView::from_contract)
    }

    /// Initial load: nothing to show yet and a fetch is outstanding
    pub fn is_initial_load(&self) -> bool {
        self.loading && self.contracts.is_empty()
    }
}
