//! Simulated signal feeds.
//!
//! Each feed emits a fixed observation stamped with the collection time.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{SignalSource, SignalSourceError};
use crate::domain::live_probability::{Multiplier, Signal, SignalSeverity, SignalType};
use crate::domain::shared::RiskId;

/// Names of every simulated feed, in default polling order.
pub const SIMULATED_SOURCE_NAMES: [&str; 5] =
    ["CISA", "Google News", "OpenWeatherMap", "GDELT", "USGS"];

/// Which provider a simulated feed stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatedFeed {
    /// Cybersecurity advisories.
    Cisa,
    /// News mentions.
    GoogleNews,
    /// Extreme weather.
    OpenWeatherMap,
    /// Geopolitical events.
    Gdelt,
    /// Seismic activity.
    Usgs,
}

impl SimulatedFeed {
    /// Look up a feed by its source name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "CISA" => Some(Self::Cisa),
            "Google News" => Some(Self::GoogleNews),
            "OpenWeatherMap" => Some(Self::OpenWeatherMap),
            "GDELT" => Some(Self::Gdelt),
            "USGS" => Some(Self::Usgs),
            _ => None,
        }
    }

    /// Source name recorded on signals and audit records.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cisa => "CISA",
            Self::GoogleNews => "Google News",
            Self::OpenWeatherMap => "OpenWeatherMap",
            Self::Gdelt => "GDELT",
            Self::Usgs => "USGS",
        }
    }
}

/// A signal source that replays one canned observation per poll.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    feed: SimulatedFeed,
    geography: String,
}

impl SimulatedSource {
    /// Create a simulated source. `geography` only shapes news descriptions.
    #[must_use]
    pub fn new(feed: SimulatedFeed, geography: impl Into<String>) -> Self {
        Self {
            feed,
            geography: geography.into(),
        }
    }

    fn signal(
        &self,
        signal_type: SignalType,
        severity: SignalSeverity,
        multiplier: f64,
        description: String,
        risk_ids: &[&str],
    ) -> Result<Signal, SignalSourceError> {
        let multiplier =
            Multiplier::new(multiplier).map_err(|e| SignalSourceError::InvalidPayload {
                source_name: self.feed.name().to_string(),
                message: e.to_string(),
            })?;
        Ok(Signal::new(
            self.feed.name(),
            signal_type,
            severity,
            multiplier,
            description,
            risk_ids.iter().map(|id| RiskId::new(*id)).collect(),
        ))
    }
}

#[async_trait]
impl SignalSource for SimulatedSource {
    fn name(&self) -> &str {
        self.feed.name()
    }

    async fn collect(&self) -> Result<Vec<Signal>, SignalSourceError> {
        let signals = match self.feed {
            SimulatedFeed::Cisa => vec![
                self.signal(
                    SignalType::Alert,
                    SignalSeverity::High,
                    1.15,
                    "New ransomware campaign targeting industrial control systems".to_string(),
                    &["D1.1", "D1.2"],
                )?
                .with_url("https://www.cisa.gov/alerts"),
            ],
            SimulatedFeed::GoogleNews => vec![self.signal(
                SignalType::Mention,
                SignalSeverity::Medium,
                1.10,
                format!("Increased news coverage of trade tensions ({})", self.geography),
                &["S1.1"],
            )?],
            SimulatedFeed::OpenWeatherMap => vec![self.signal(
                SignalType::Event,
                SignalSeverity::Medium,
                1.08,
                "Extended heat wave forecast for Southern Europe".to_string(),
                &["P3.1"],
            )?],
            SimulatedFeed::Gdelt => vec![self.signal(
                SignalType::Event,
                SignalSeverity::Low,
                1.05,
                "Increased mentions of supply chain disruptions in global news".to_string(),
                &["O1.1", "O3.1"],
            )?],
            SimulatedFeed::Usgs => Vec::new(),
        };
        Ok(signals)
    }
}

/// A configured source name with no matching feed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown signal source: {0}")]
pub struct UnknownSourceError(pub String);

/// Build the configured sources in configuration order.
///
/// # Errors
///
/// Returns `UnknownSourceError` for the first name with no simulated feed.
pub fn build_sources<N: AsRef<str>>(
    names: &[N],
    geography: &str,
) -> Result<Vec<Arc<dyn SignalSource>>, UnknownSourceError> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            SimulatedFeed::from_name(name)
                .map(|feed| Arc::new(SimulatedSource::new(feed, geography)) as Arc<dyn SignalSource>)
                .ok_or_else(|| UnknownSourceError(name.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(SimulatedFeed::Cisa, 1, 1.15 ; "cisa alert")]
    #[test_case(SimulatedFeed::GoogleNews, 1, 1.10 ; "news mention")]
    #[test_case(SimulatedFeed::OpenWeatherMap, 1, 1.08 ; "weather event")]
    #[test_case(SimulatedFeed::Gdelt, 1, 1.05 ; "gdelt event")]
    #[tokio::test]
    async fn feed_emits_one_signal(feed: SimulatedFeed, count: usize, multiplier: f64) {
        let signals = SimulatedSource::new(feed, "Global").collect().await.unwrap();

        assert_eq!(signals.len(), count);
        assert_eq!(signals[0].multiplier().value(), multiplier);
        assert_eq!(signals[0].source(), feed.name());
    }

    #[tokio::test]
    async fn usgs_is_quiet() {
        let signals = SimulatedSource::new(SimulatedFeed::Usgs, "Global")
            .collect()
            .await
            .unwrap();
        assert!(signals.is_empty());
    }

    #[tokio::test]
    async fn news_description_names_geography() {
        let signals = SimulatedSource::new(SimulatedFeed::GoogleNews, "Switzerland")
            .collect()
            .await
            .unwrap();
        assert_eq!(
            signals[0].description(),
            "Increased news coverage of trade tensions (Switzerland)"
        );
    }

    #[tokio::test]
    async fn cisa_targets_both_cyber_risks() {
        let signals = SimulatedSource::new(SimulatedFeed::Cisa, "Global")
            .collect()
            .await
            .unwrap();
        let ids: Vec<&str> = signals[0].risk_ids().iter().map(RiskId::as_str).collect();
        assert_eq!(ids, vec!["D1.1", "D1.2"]);
        assert_eq!(signals[0].url(), Some("https://www.cisa.gov/alerts"));
    }

    #[test]
    fn build_sources_keeps_order() {
        let sources = build_sources(&SIMULATED_SOURCE_NAMES, "Global").unwrap();
        let names: Vec<&str> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, SIMULATED_SOURCE_NAMES.to_vec());
    }

    #[test]
    fn build_sources_rejects_unknown_name() {
        let err = build_sources(&["CISA", "Twitter"], "Global").err().unwrap();
        assert_eq!(err, UnknownSourceError("Twitter".to_string()));
    }
}
