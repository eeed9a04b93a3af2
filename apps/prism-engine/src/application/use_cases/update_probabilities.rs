//! Update Probabilities Use Case
//!
//! The probability engine: collects signals, recomputes each affected risk
//! from its baseline and records the change with its audit record.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::application::dto::{RiskUpdateDto, UpdateRunSummaryDto};
use crate::application::ports::{StoreError, StorePort};
use crate::application::services::SignalCollector;
use crate::domain::live_probability::{
    ProbabilityUpdate, Signal, build_update_reason, group_by_risk, recompute_from_baseline,
};
use crate::domain::risk_catalog::Risk;
use crate::domain::shared::{RiskId, Timestamp};
use crate::observability::{record_probability_update, record_update_run};

/// Sole writer of live probabilities.
///
/// Runs are serialized: a second caller waits until the running update has
/// written every risk and audit record.
pub struct ProbabilityEngine<S>
where
    S: StorePort,
{
    store: Arc<S>,
    collector: SignalCollector,
    run_lock: Mutex<()>,
}

impl<S> ProbabilityEngine<S>
where
    S: StorePort,
{
    /// Create a new ProbabilityEngine.
    pub fn new(store: Arc<S>, collector: SignalCollector) -> Self {
        Self {
            store,
            collector,
            run_lock: Mutex::new(()),
        }
    }

    /// Names of the sources consulted on each run.
    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        self.collector.source_names()
    }

    /// Collect signals from every source and update each affected risk.
    ///
    /// Signals naming a risk unknown to the store are kept in the history
    /// but update nothing.
    #[tracing::instrument(skip(self))]
    pub async fn update_all_probabilities(&self) -> Result<UpdateRunSummaryDto, StoreError> {
        let _guard = self.run_lock.lock().await;
        let started = Instant::now();

        let signals = self.collector.collect_all().await;
        self.store.append_signals(&signals).await?;

        let sources_checked = self.collector.source_names();
        let mut updates = Vec::new();

        for group in group_by_risk(&signals) {
            let risk = match self.store.get_risk(&group.risk_id).await {
                Ok(risk) => risk,
                Err(StoreError::RiskNotFound(id)) => {
                    tracing::warn!(risk_id = %id, "Signal names unknown risk, skipping");
                    continue;
                }
                Err(e) => return Err(e),
            };

            let signals_count = group.signals.len();
            let (risk, update) = self
                .apply_signals(risk, group.signals, sources_checked.clone())
                .await?;

            updates.push(RiskUpdateDto {
                risk_id: risk.id().clone(),
                risk_name: risk.name().to_string(),
                probability_before: update.probability_before(),
                probability_after: update.probability_after(),
                change: update.change(),
                signals_count,
            });
        }

        record_update_run(started.elapsed().as_secs_f64());
        tracing::info!(
            signals_collected = signals.len(),
            risks_updated = updates.len(),
            "Probability update run completed"
        );

        Ok(UpdateRunSummaryDto {
            timestamp: Timestamp::now(),
            signals_collected: signals.len(),
            risks_updated: updates.len(),
            sources_checked,
            updates,
        })
    }

    /// Recompute one risk from its baseline and the given signals.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RiskNotFound` for an unknown risk.
    #[tracing::instrument(skip(self, signals), fields(signals = signals.len()))]
    pub async fn update_risk_probability(
        &self,
        risk_id: &RiskId,
        signals: Vec<Signal>,
    ) -> Result<ProbabilityUpdate, StoreError> {
        let _guard = self.run_lock.lock().await;
        let risk = self.store.get_risk(risk_id).await?;
        let (_, update) = self
            .apply_signals(risk, signals, self.collector.source_names())
            .await?;
        Ok(update)
    }

    /// Write the new live probability and its audit record together.
    /// Callers hold the run lock.
    async fn apply_signals(
        &self,
        mut risk: Risk,
        signals: Vec<Signal>,
        sources_checked: Vec<String>,
    ) -> Result<(Risk, ProbabilityUpdate), StoreError> {
        let now = Timestamp::now();
        let target = recompute_from_baseline(risk.probability_baseline(), &signals);
        let reason = build_update_reason(&signals);

        let before = risk.probability_live();
        let after = risk.apply_live_probability(target, now);
        let update = ProbabilityUpdate::record(
            risk.id().clone(),
            now,
            before,
            after,
            reason,
            signals,
            sources_checked,
        );

        self.store.record_update(&risk, &update).await?;
        record_probability_update(risk.domain().as_str());
        tracing::debug!(
            risk_id = %risk.id(),
            before,
            after,
            update_id = %update.id(),
            "Live probability updated"
        );

        Ok((risk, update))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::application::ports::{SignalSource, SignalSourceError};
    use crate::application::services::DEFAULT_SOURCE_TIMEOUT;
    use crate::domain::live_probability::{Multiplier, SignalSeverity, SignalType};
    use crate::domain::risk_catalog::seed_risks;
    use crate::infrastructure::persistence::InMemoryStore;

    struct StaticSource {
        name: &'static str,
        signals: Vec<Signal>,
    }

    #[async_trait]
    impl SignalSource for StaticSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn collect(&self) -> Result<Vec<Signal>, SignalSourceError> {
            Ok(self.signals.clone())
        }
    }

    fn signal(source: &str, multiplier: f64, risks: &[&str]) -> Signal {
        Signal::new(
            source,
            SignalType::Alert,
            SignalSeverity::High,
            Multiplier::new(multiplier).unwrap(),
            format!("{source} says so"),
            risks.iter().map(|r| RiskId::new(*r)).collect(),
        )
    }

    async fn engine(signals: Vec<Signal>) -> (Arc<InMemoryStore>, ProbabilityEngine<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new());
        for risk in seed_risks().unwrap() {
            store.put_risk(&risk).await.unwrap();
        }
        let collector = SignalCollector::new(
            vec![Arc::new(StaticSource {
                name: "Static",
                signals,
            })],
            DEFAULT_SOURCE_TIMEOUT,
        );
        let engine = ProbabilityEngine::new(Arc::clone(&store), collector);
        (store, engine)
    }

    #[tokio::test]
    async fn updates_affected_risks_with_audit_trail() {
        let (store, engine) = engine(vec![signal("CISA", 1.15, &["D1.1"])]).await;

        let summary = engine.update_all_probabilities().await.unwrap();

        assert_eq!(summary.signals_collected, 1);
        assert_eq!(summary.risks_updated, 1);
        assert_eq!(summary.sources_checked, vec!["Static"]);

        let risk = store.get_risk(&RiskId::new("D1.1")).await.unwrap();
        assert!((risk.probability_live() - 63.25).abs() < 1e-9);
        assert_eq!(risk.update_count(), 1);

        let history = store
            .list_update_history(&RiskId::new("D1.1"), 10)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].probability_before(), 55.0);
        assert_eq!(
            history[0].update_reason(),
            "Updated based on 1 signal(s): CISA: CISA says so"
        );
    }

    #[tokio::test]
    async fn repeated_runs_do_not_compound() {
        let (store, engine) = engine(vec![signal("CISA", 1.15, &["D1.1"])]).await;

        engine.update_all_probabilities().await.unwrap();
        let first = store.get_risk(&RiskId::new("D1.1")).await.unwrap();
        engine.update_all_probabilities().await.unwrap();
        let second = store.get_risk(&RiskId::new("D1.1")).await.unwrap();

        assert_eq!(first.probability_live(), second.probability_live());
        assert_eq!(second.update_count(), 2);
    }

    #[tokio::test]
    async fn unknown_risks_in_signals_are_skipped() {
        let (store, engine) = engine(vec![signal("X", 2.0, &["Z9.9", "S1.1"])]).await;

        let summary = engine.update_all_probabilities().await.unwrap();

        assert_eq!(summary.risks_updated, 1);
        assert_eq!(store.count_signals().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn single_risk_update_reports_not_found() {
        let (_, engine) = engine(vec![]).await;

        let err = engine
            .update_risk_probability(&RiskId::new("Z9.9"), vec![])
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::RiskNotFound(_)));
    }

    #[tokio::test]
    async fn single_risk_update_recomputes_from_baseline() {
        let (_, engine) = engine(vec![]).await;
        let signals = vec![
            signal("A", 1.15, &["S1.1"]),
            signal("B", 1.10, &["S1.1"]),
        ];

        let update = engine
            .update_risk_probability(&RiskId::new("S1.1"), signals)
            .await
            .unwrap();

        assert!((update.probability_after() - 50.6).abs() < 1e-9);
        assert_eq!(update.signals().len(), 2);
    }
}
