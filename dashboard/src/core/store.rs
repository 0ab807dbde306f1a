//! Evaluation store
//!
//! Pure in-memory collection of evaluation records in backend order, plus the
//! time of the last successful full refresh. No I/O.

use chrono::{DateTime, Utc};
use shared::{Component, ContractEvaluation, component_warn};
use std::collections::HashMap;

use crate::error::{DashboardError, DashboardResult};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationStore {
    contracts: Vec<ContractEvaluation>,
    last_update: Option<DateTime<Utc>>,
}

impl EvaluationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection and stamp `last_update`
    ///
    /// Records missing from `new_list` disappear. The backend appends a new
    /// row per evaluation, so a repeated `contract_id` keeps its latest row
    /// at the position of the first one. Returns the number of records kept.
    pub fn replace_all(&mut self, new_list: Vec<ContractEvaluation>) -> usize {
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(new_list.len());
        let mut contracts: Vec<ContractEvaluation> = Vec::with_capacity(new_list.len());

        for record in new_list {
            match positions.get(&record.contract_id) {
                Some(&position) => {
                    component_warn!(
                        Component::Store,
                        contract_id = %record.contract_id,
                        "Superseding earlier row for contract in refresh response"
                    );
                    contracts[position] = record;
                }
                None => {
                    positions.insert(record.contract_id.clone(), contracts.len());
                    contracts.push(record);
                }
            }
        }

        self.contracts = contracts;
        self.last_update = Some(Utc::now());
        self.contracts.len()
    }

    /// Replace the record stored under `id`, leaving order and `last_update` alone
    pub fn replace_one(&mut self, id: &str, updated: ContractEvaluation) -> DashboardResult<()> {
        let position = self
            .position(id)
            .ok_or_else(|| DashboardError::NotFound {
                contract_id: id.to_string(),
            })?;

        if updated.contract_id != id && self.position(&updated.contract_id).is_some() {
            return Err(DashboardError::DuplicateContract {
                contract_id: updated.contract_id,
            });
        }

        self.contracts[position] = updated;
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ContractEvaluation> {
        self.contracts.iter().find(|c| c.contract_id == id)
    }

    pub fn contracts(&self) -> &[ContractEvaluation] {
        &self.contracts
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.contracts.iter().position(|c| c.contract_id == id)
    }
}
