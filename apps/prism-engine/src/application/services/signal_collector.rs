//! Signal Collector Service
//!
//! Fans out to every configured signal source concurrently. A failing or
//! slow source contributes no signals; it never fails the whole collection.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use crate::application::ports::{SignalSource, SignalSourceError};
use crate::domain::live_probability::Signal;
use crate::observability::{record_signal_source_failure, record_signals_collected};

/// Default per-source timeout.
pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_secs(10);

/// Collects signals from the configured sources.
#[derive(Clone)]
pub struct SignalCollector {
    sources: Vec<Arc<dyn SignalSource>>,
    timeout: Duration,
}

impl std::fmt::Debug for SignalCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalCollector")
            .field("sources", &self.source_names())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SignalCollector {
    /// Create a collector. Source order is the collection order.
    #[must_use]
    pub fn new(sources: Vec<Arc<dyn SignalSource>>, timeout: Duration) -> Self {
        Self { sources, timeout }
    }

    /// Names of the configured sources, in order.
    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Collect from one source by name.
    ///
    /// Unknown names and failures yield an empty list.
    pub async fn collect(&self, source_name: &str) -> Vec<Signal> {
        match self.sources.iter().find(|s| s.name() == source_name) {
            Some(source) => self.collect_from(source.as_ref()).await,
            None => {
                tracing::warn!(source = source_name, "Unknown signal source");
                Vec::new()
            }
        }
    }

    /// Collect from every source concurrently.
    ///
    /// The result is the concatenation in source configuration order.
    pub async fn collect_all(&self) -> Vec<Signal> {
        let batches = join_all(
            self.sources
                .iter()
                .map(|source| self.collect_from(source.as_ref())),
        )
        .await;
        batches.into_iter().flatten().collect()
    }

    async fn collect_from(&self, source: &dyn SignalSource) -> Vec<Signal> {
        let name = source.name();
        let outcome = match tokio::time::timeout(self.timeout, source.collect()).await {
            Ok(result) => result,
            Err(_) => Err(SignalSourceError::Timeout {
                source_name: name.to_string(),
                timeout: self.timeout,
            }),
        };

        match outcome {
            Ok(signals) => {
                tracing::debug!(source = name, count = signals.len(), "Collected signals");
                record_signals_collected(name, signals.len());
                signals
            }
            Err(e) => {
                tracing::warn!(source = name, error = %e, "Signal source failed, skipping");
                record_signal_source_failure(name, e.kind());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;
    use crate::domain::live_probability::{Multiplier, SignalSeverity, SignalType};
    use crate::domain::shared::RiskId;

    mock! {
        Source {}

        #[async_trait]
        impl SignalSource for Source {
            fn name(&self) -> &str;
            async fn collect(&self) -> Result<Vec<Signal>, SignalSourceError>;
        }
    }

    fn signal(source: &str) -> Signal {
        Signal::new(
            source,
            SignalType::Alert,
            SignalSeverity::High,
            Multiplier::new(1.1).unwrap(),
            "test",
            vec![RiskId::new("D1.1")],
        )
    }

    fn healthy(name: &'static str) -> Arc<dyn SignalSource> {
        let mut source = MockSource::new();
        source.expect_name().return_const(name.to_string());
        source
            .expect_collect()
            .returning(move || Ok(vec![signal(name)]));
        Arc::new(source)
    }

    fn failing(name: &'static str) -> Arc<dyn SignalSource> {
        let mut source = MockSource::new();
        source.expect_name().return_const(name.to_string());
        source.expect_collect().returning(move || {
            Err(SignalSourceError::Unavailable {
                source_name: name.to_string(),
                message: "connection refused".to_string(),
            })
        });
        Arc::new(source)
    }

    struct SlowSource;

    #[async_trait]
    impl SignalSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn collect(&self) -> Result<Vec<Signal>, SignalSourceError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![signal("slow")])
        }
    }

    #[tokio::test]
    async fn collect_all_keeps_source_order() {
        let collector = SignalCollector::new(
            vec![healthy("CISA"), healthy("GDELT"), healthy("USGS")],
            DEFAULT_SOURCE_TIMEOUT,
        );

        let sources: Vec<String> = collector
            .collect_all()
            .await
            .iter()
            .map(|s| s.source().to_string())
            .collect();

        assert_eq!(sources, vec!["CISA", "GDELT", "USGS"]);
    }

    #[tokio::test]
    async fn failing_source_is_isolated() {
        let collector = SignalCollector::new(
            vec![healthy("CISA"), failing("GDELT"), healthy("USGS")],
            DEFAULT_SOURCE_TIMEOUT,
        );

        let signals = collector.collect_all().await;

        assert_eq!(signals.len(), 2);
        assert!(collector.collect("GDELT").await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out() {
        let collector = SignalCollector::new(
            vec![healthy("CISA"), Arc::new(SlowSource)],
            Duration::from_secs(1),
        );

        let signals = collector.collect_all().await;

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].source(), "CISA");
    }

    #[tokio::test]
    async fn unknown_source_yields_nothing() {
        let collector = SignalCollector::new(vec![healthy("CISA")], DEFAULT_SOURCE_TIMEOUT);
        assert!(collector.collect("nope").await.is_empty());
        assert_eq!(collector.collect("CISA").await.len(), 1);
        assert_eq!(collector.source_names(), vec!["CISA"]);
    }
}
