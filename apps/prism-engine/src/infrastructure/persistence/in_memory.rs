//! In-memory store.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::application::ports::{SIGNAL_RETENTION, StoreError, StorePort};
use crate::domain::live_probability::{ProbabilityUpdate, Signal};
use crate::domain::risk_catalog::Risk;
use crate::domain::shared::{RiskId, Timestamp, UpdateId};

#[derive(Debug, Default)]
struct StoreState {
    risks: Vec<Risk>,
    index: HashMap<RiskId, usize>,
    updates: Vec<ProbabilityUpdate>,
    signals: VecDeque<Signal>,
}

impl StoreState {
    fn upsert(&mut self, risk: &Risk) {
        match self.index.get(risk.id()) {
            Some(&position) => self.risks[position] = risk.clone(),
            None => {
                self.index.insert(risk.id().clone(), self.risks.len());
                self.risks.push(risk.clone());
            }
        }
    }
}

/// In-memory implementation of `StorePort`.
///
/// One lock guards every table, so a risk and its audit record become
/// visible together and readers never see a half-applied update. State is
/// lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorePort for InMemoryStore {
    async fn get_risk(&self, id: &RiskId) -> Result<Risk, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .index
            .get(id)
            .map(|&position| state.risks[position].clone())
            .ok_or_else(|| StoreError::RiskNotFound(id.clone()))
    }

    async fn list_risks(&self) -> Result<Vec<Risk>, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.risks.clone())
    }

    async fn put_risk(&self, risk: &Risk) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.upsert(risk);
        drop(state);
        Ok(())
    }

    async fn record_update(
        &self,
        risk: &Risk,
        update: &ProbabilityUpdate,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if !state.index.contains_key(risk.id()) {
            return Err(StoreError::RiskNotFound(risk.id().clone()));
        }
        state.upsert(risk);
        state.updates.push(update.clone());
        drop(state);
        Ok(())
    }

    async fn append_signals(&self, signals: &[Signal]) -> Result<(), StoreError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.signals.extend(signals.iter().cloned());
        let excess = state.signals.len().saturating_sub(SIGNAL_RETENTION);
        state.signals.drain(..excess);
        drop(state);
        Ok(())
    }

    async fn list_recent_signals(&self, since: Timestamp) -> Result<Vec<Signal>, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state
            .signals
            .iter()
            .filter(|s| s.timestamp() >= since)
            .cloned()
            .collect())
    }

    async fn list_update_history(
        &self,
        risk_id: &RiskId,
        limit: usize,
    ) -> Result<Vec<ProbabilityUpdate>, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        // Reverse insertion order first so equal timestamps stay newest-first.
        let mut history: Vec<ProbabilityUpdate> = state
            .updates
            .iter()
            .rev()
            .filter(|u| u.risk_id() == risk_id)
            .cloned()
            .collect();
        drop(state);
        history.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        history.truncate(limit);
        Ok(history)
    }

    async fn get_update(&self, id: &UpdateId) -> Result<ProbabilityUpdate, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .updates
            .iter()
            .find(|u| u.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::UpdateNotFound(id.clone()))
    }

    async fn count_updates(&self) -> Result<usize, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.updates.len())
    }

    async fn count_signals(&self) -> Result<usize, StoreError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(state.signals.len())
    }
}
