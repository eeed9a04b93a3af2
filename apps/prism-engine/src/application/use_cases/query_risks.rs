//! Risk Query Use Case
//!
//! Read paths over the store: live risks, history, signals, audit records.

use std::sync::Arc;

use crate::application::dto::{
    DataSourceDto, DataSourcesDto, DomainsDto, HealthDto, LiveRiskDto, RecentSignalsDto,
    RiskHistoryDto, RiskListDto, SourceSignalsDto,
};
use crate::application::ports::{StoreError, StorePort};
use crate::domain::live_probability::{ProbabilityUpdate, Signal};
use crate::domain::risk_catalog::{CatalogError, RiskCatalog};
use crate::domain::shared::{RiskId, Timestamp, UpdateId};

/// Default number of audit records returned by a history query.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Default window of a recent-signals query, in hours.
pub const DEFAULT_SIGNAL_WINDOW_HOURS: u32 = 24;

/// Use case for read-only queries.
pub struct RiskQueryUseCase<S>
where
    S: StorePort,
{
    store: Arc<S>,
    sources: Vec<String>,
}

impl<S> RiskQueryUseCase<S>
where
    S: StorePort,
{
    /// Create a new RiskQueryUseCase. `sources` are the configured signal sources.
    pub fn new(store: Arc<S>, sources: Vec<String>) -> Self {
        Self { store, sources }
    }

    /// All risks, highest live probability first.
    pub async fn list_live_risks(&self) -> Result<RiskListDto, StoreError> {
        let mut risks: Vec<LiveRiskDto> = self
            .store
            .list_risks()
            .await?
            .iter()
            .map(LiveRiskDto::from)
            .collect();
        risks.sort_by(|a, b| b.probability_live.total_cmp(&a.probability_live));

        Ok(RiskListDto {
            total_count: risks.len(),
            risks,
            timestamp: Timestamp::now(),
        })
    }

    /// One risk with its live state.
    pub async fn get_risk(&self, id: &RiskId) -> Result<LiveRiskDto, StoreError> {
        let risk = self.store.get_risk(id).await?;
        Ok(LiveRiskDto::from(&risk))
    }

    /// Audit history of a risk, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RiskNotFound` for an unknown risk.
    pub async fn risk_history(
        &self,
        id: &RiskId,
        limit: usize,
    ) -> Result<RiskHistoryDto, StoreError> {
        let risk = self.store.get_risk(id).await?;
        let updates = self.store.list_update_history(id, limit).await?;

        Ok(RiskHistoryDto {
            risk_id: risk.id().clone(),
            risk_name: risk.name().to_string(),
            total_updates: updates.len(),
            updates,
        })
    }

    /// Signals observed in the last `hours` hours.
    pub async fn recent_signals(&self, hours: u32) -> Result<RecentSignalsDto, StoreError> {
        let signals = self
            .store
            .list_recent_signals(Timestamp::hours_ago(hours))
            .await?;

        Ok(RecentSignalsDto {
            total_count: signals.len(),
            by_source: group_by_source(&signals),
            signals,
            time_range_hours: hours,
        })
    }

    /// One audit record.
    pub async fn audit_record(&self, id: &UpdateId) -> Result<ProbabilityUpdate, StoreError> {
        self.store.get_update(id).await
    }

    /// Per-domain statistics over live probabilities.
    pub async fn domain_statistics(&self) -> Result<DomainsDto, QueryError> {
        let catalog = RiskCatalog::from_risks(self.store.list_risks().await?)?;
        Ok(DomainsDto {
            domains: catalog.domain_statistics(),
        })
    }

    /// Configured sources with their signal counts over the default window.
    pub async fn data_sources(&self) -> Result<DataSourcesDto, StoreError> {
        let recent = self
            .store
            .list_recent_signals(Timestamp::hours_ago(DEFAULT_SIGNAL_WINDOW_HOURS))
            .await?;

        let sources = self
            .sources
            .iter()
            .map(|name| DataSourceDto {
                name: name.clone(),
                status: "ready".to_string(),
                recent_signals: recent.iter().filter(|s| s.source() == name.as_str()).count(),
            })
            .collect();

        Ok(DataSourcesDto { sources })
    }

    /// Store-level health snapshot.
    pub async fn health(&self) -> Result<HealthDto, StoreError> {
        Ok(HealthDto {
            status: "healthy".to_string(),
            timestamp: Timestamp::now(),
            risks_loaded: self.store.list_risks().await?.len(),
            total_updates: self.store.count_updates().await?,
            total_signals: self.store.count_signals().await?,
            version: env!("CARGO_PKG_VERSION").to_string(),
        })
    }
}

/// Failure of a query that rebuilds the catalog.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// Store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored risks do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

fn group_by_source(signals: &[Signal]) -> Vec<SourceSignalsDto> {
    let mut groups: Vec<SourceSignalsDto> = Vec::new();
    for signal in signals {
        match groups.iter_mut().find(|g| g.source == signal.source()) {
            Some(group) => group.signals.push(signal.clone()),
            None => groups.push(SourceSignalsDto {
                source: signal.source().to_string(),
                signals: vec![signal.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::live_probability::{Multiplier, SignalSeverity, SignalType};
    use crate::domain::risk_catalog::seed_risks;
    use crate::infrastructure::persistence::InMemoryStore;

    async fn seeded() -> Arc<InMemoryStore> {
        let store = Arc::new(InMemoryStore::new());
        for risk in seed_risks().unwrap() {
            store.put_risk(&risk).await.unwrap();
        }
        store
    }

    fn signal(source: &str) -> Signal {
        Signal::new(
            source,
            SignalType::Event,
            SignalSeverity::Low,
            Multiplier::new(1.05).unwrap(),
            "event",
            vec![RiskId::new("O1.1")],
        )
    }

    #[tokio::test]
    async fn live_risks_sorted_by_live_probability() {
        let query = RiskQueryUseCase::new(seeded().await, vec![]);

        let listing = query.list_live_risks().await.unwrap();

        assert_eq!(listing.total_count, 13);
        for pair in listing.risks.windows(2) {
            assert!(pair[0].probability_live >= pair[1].probability_live);
        }
    }

    #[tokio::test]
    async fn history_of_unknown_risk_is_not_found() {
        let query = RiskQueryUseCase::new(seeded().await, vec![]);

        let err = query
            .risk_history(&RiskId::new("Z9.9"), DEFAULT_HISTORY_LIMIT)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn recent_signals_grouped_by_source() {
        let store = seeded().await;
        store
            .append_signals(&[signal("GDELT"), signal("CISA"), signal("GDELT")])
            .await
            .unwrap();
        let query = RiskQueryUseCase::new(store, vec!["CISA".into(), "GDELT".into(), "USGS".into()]);

        let recent = query.recent_signals(DEFAULT_SIGNAL_WINDOW_HOURS).await.unwrap();
        assert_eq!(recent.total_count, 3);
        assert_eq!(recent.by_source[0].source, "GDELT");
        assert_eq!(recent.by_source[0].signals.len(), 2);

        let sources = query.data_sources().await.unwrap().sources;
        let counts: Vec<_> = sources.iter().map(|s| s.recent_signals).collect();
        assert_eq!(counts, vec![1, 2, 0]);
    }

    #[tokio::test]
    async fn old_signals_fall_outside_window() {
        let store = seeded().await;
        let old = signal("GDELT").with_timestamp(Timestamp::hours_ago(48));
        store.append_signals(&[old, signal("CISA")]).await.unwrap();
        let query = RiskQueryUseCase::new(store, vec![]);

        let recent = query.recent_signals(24).await.unwrap();

        assert_eq!(recent.total_count, 1);
        assert_eq!(recent.signals[0].source(), "CISA");
    }

    #[tokio::test]
    async fn unknown_audit_record_is_not_found() {
        let query = RiskQueryUseCase::new(seeded().await, vec![]);
        let err = query.audit_record(&UpdateId::new("missing")).await.unwrap_err();
        assert!(matches!(err, StoreError::UpdateNotFound(_)));
    }

    #[tokio::test]
    async fn health_counts_store_contents() {
        let query = RiskQueryUseCase::new(seeded().await, vec![]);
        let health = query.health().await.unwrap();
        assert_eq!(health.risks_loaded, 13);
        assert_eq!(health.total_updates, 0);
    }
}
