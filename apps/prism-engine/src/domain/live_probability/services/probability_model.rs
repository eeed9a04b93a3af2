//! Multiplicative probability model.
//!
//! The live probability is always recomputed from the baseline, so repeated
//! runs over the same signals land on the same value.

use std::collections::HashMap;

use crate::domain::live_probability::value_objects::Signal;
use crate::domain::risk_catalog::clamp_probability;
use crate::domain::shared::RiskId;

/// Signals that affect one risk, in collection order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSignals {
    /// Affected risk.
    pub risk_id: RiskId,
    /// Contributing signals.
    pub signals: Vec<Signal>,
}

/// Group signals by every risk they name.
///
/// A signal naming several risks lands in each of their groups. Groups are
/// ordered by the first signal that names the risk.
#[must_use]
pub fn group_by_risk(signals: &[Signal]) -> Vec<RiskSignals> {
    let mut groups: Vec<RiskSignals> = Vec::new();
    let mut index: HashMap<RiskId, usize> = HashMap::new();

    for signal in signals {
        for risk_id in signal.risk_ids() {
            let position = *index.entry(risk_id.clone()).or_insert_with(|| {
                groups.push(RiskSignals {
                    risk_id: risk_id.clone(),
                    signals: Vec::new(),
                });
                groups.len() - 1
            });
            groups[position].signals.push(signal.clone());
        }
    }
    groups
}

/// `baseline × Π multipliers`, clamped to `[0, 100]`.
#[must_use]
pub fn recompute_from_baseline(baseline: f64, signals: &[Signal]) -> f64 {
    let raw = signals
        .iter()
        .fold(baseline, |probability, signal| probability * signal.multiplier().value());
    clamp_probability(raw)
}

/// `"Updated based on N signal(s): <source>: <description>; ..."`
#[must_use]
pub fn build_update_reason(signals: &[Signal]) -> String {
    let descriptions: Vec<String> = signals
        .iter()
        .map(|s| format!("{}: {}", s.source(), s.description()))
        .collect();
    format!(
        "Updated based on {} signal(s): {}",
        signals.len(),
        descriptions.join("; ")
    )
}
