//! Selection and deep-analysis controller
//!
//! Tracks the single selected contract. Selecting a vendor that has a
//! registered sample triggers a deep analysis on the backend; the returned
//! record replaces the stored one. Only one analysis runs at a time.

use chrono::Utc;
use shared::{Component, ContractEvaluation, ContractId, component_info, component_warn};
use std::sync::Arc;

use crate::config::SampleRegistry;
use crate::error::DashboardError;
use crate::state::SharedState;
use crate::traits::EvaluationApi;

/// Result of one `select` call
#[derive(Debug, Clone, PartialEq)]
pub enum SelectOutcome {
    /// Vendor has no registered sample; selection only
    NoSample,
    /// Another contract is being analyzed; selection only
    Busy { analyzing_id: ContractId },
    /// Analysis succeeded and the record was replaced
    Analyzed(ContractEvaluation),
    /// Analysis failed; the message is now in the error banner
    Failed(String),
    /// Dashboard already torn down
    Inactive,
}

/// Clears `analyzing_id` on every exit path, including a dropped future
struct AnalysisGuard {
    state: SharedState,
    contract_id: ContractId,
}

impl Drop for AnalysisGuard {
    fn drop(&mut self) {
        self.state.with(|s| {
            if s.selection.analyzing_id.as_deref() == Some(self.contract_id.as_str()) {
                s.selection.analyzing_id = None;
            }
        });
    }
}

enum Admission {
    Start(String),
    Done(SelectOutcome),
}

pub struct SelectionController<A: EvaluationApi> {
    api: Arc<A>,
    state: SharedState,
    samples: SampleRegistry,
}

impl<A: EvaluationApi> Clone for SelectionController<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            state: self.state.clone(),
            samples: self.samples.clone(),
        }
    }
}

impl<A: EvaluationApi> SelectionController<A> {
    pub fn new(api: Arc<A>, state: SharedState, samples: SampleRegistry) -> Self {
        Self { api, state, samples }
    }

    pub fn samples(&self) -> &SampleRegistry {
        &self.samples
    }

    /// Select `contract`, running a deep analysis when its vendor is registered
    pub async fn select(&self, contract: ContractEvaluation) -> SelectOutcome {
        let contract_id = contract.contract_id.clone();
        let vendor = contract.display_vendor().to_string();
        let sample = contract
            .vendor_name
            .as_deref()
            .and_then(|name| self.samples.sample_for(name))
            .map(str::to_string);

        let admission = self.state.with(|s| {
            if !s.active {
                return Admission::Done(SelectOutcome::Inactive);
            }
            // Optimistic: the basic record shows before any analysis
            s.selection.selected = Some(contract);

            let Some(sample) = sample else {
                return Admission::Done(SelectOutcome::NoSample);
            };
            if let Some(current) = &s.selection.analyzing_id {
                return Admission::Done(SelectOutcome::Busy {
                    analyzing_id: current.clone(),
                });
            }
            s.selection.analyzing_id = Some(contract_id.clone());
            s.error = None;
            Admission::Start(sample)
        });

        let sample = match admission {
            Admission::Start(sample) => sample,
            Admission::Done(outcome) => {
                if let SelectOutcome::Busy { analyzing_id } = &outcome {
                    component_info!(
                        Component::Analysis,
                        contract_id = %contract_id,
                        "Analysis of {} still running, selection only",
                        analyzing_id
                    );
                }
                return outcome;
            }
        };

        let _guard = AnalysisGuard {
            state: self.state.clone(),
            contract_id: contract_id.clone(),
        };

        component_info!(
            Component::Analysis,
            contract_id = %contract_id,
            sample = %sample,
            "🧠 Requesting deep analysis for {}",
            vendor
        );

        let result = self.api.evaluate_sample(&sample).await;
        let outcome = self.apply(&contract_id, &vendor, result);

        match &outcome {
            SelectOutcome::Analyzed(_) => {
                component_info!(Component::Analysis, contract_id = %contract_id, "✅ Analysis applied for {}", vendor);
            }
            SelectOutcome::Failed(message) => {
                component_warn!(Component::Analysis, contract_id = %contract_id, "{}", message);
            }
            _ => {}
        }

        outcome
    }

    /// Clear the current selection; a running analysis continues
    pub fn clear_selection(&self) {
        self.state.with(|s| s.selection.selected = None);
    }

    fn apply(
        &self,
        contract_id: &str,
        vendor: &str,
        result: Result<ContractEvaluation, DashboardError>,
    ) -> SelectOutcome {
        self.state.with(|s| {
            if !s.active {
                return SelectOutcome::Inactive;
            }

            let updated = match result {
                Ok(updated) => updated,
                Err(e) => {
                    let message = analysis_message(vendor, e);
                    s.error = Some(message.clone());
                    return SelectOutcome::Failed(message);
                }
            };

            match s.store.replace_one(contract_id, updated.clone()) {
                Ok(()) => {
                    // Refreshes issued before this point carry pre-analysis data
                    s.poll.applied_seq = Some(s.poll.next_seq);
                }
                Err(DashboardError::NotFound { .. }) => {
                    component_warn!(
                        Component::Store,
                        contract_id = %contract_id,
                        "Analyzed contract no longer in store, keeping selection only"
                    );
                }
                Err(e) => {
                    let message = analysis_message(vendor, e);
                    s.error = Some(message.clone());
                    return SelectOutcome::Failed(message);
                }
            }

            // A newer selection, or a cleared one, made while this ran takes precedence
            let still_selected = s
                .selection
                .selected
                .as_ref()
                .is_some_and(|selected| selected.contract_id == contract_id);
            if still_selected {
                s.selection.selected = Some(updated.clone());
            }
            s.selection.last_analysis = Some(Utc::now());
            SelectOutcome::Analyzed(updated)
        })
    }
}

/// Banner text naming the vendor and the underlying reason
fn analysis_message(vendor: &str, error: DashboardError) -> String {
    let reason = match error {
        DashboardError::AnalysisFailure { reason, .. } => reason,
        other => other.to_string(),
    };
    DashboardError::analysis(vendor, reason).to_string()
}
