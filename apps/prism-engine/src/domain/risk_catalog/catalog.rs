//! Read-only risk catalog snapshot.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::risk_catalog::aggregate::Risk;
use crate::domain::risk_catalog::errors::CatalogError;
use crate::domain::risk_catalog::value_objects::RiskDomain;
use crate::domain::shared::{RiskId, round_dp};

/// Read-only table of risks, keyed by ID, preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct RiskCatalog {
    risks: Vec<Risk>,
    index: HashMap<RiskId, usize>,
}

impl RiskCatalog {
    /// Build a catalog from a list of risks.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateRisk` if two risks share an ID.
    pub fn from_risks(risks: Vec<Risk>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(risks.len());
        for (position, risk) in risks.iter().enumerate() {
            if index.insert(risk.id().clone(), position).is_some() {
                return Err(CatalogError::DuplicateRisk(risk.id().clone()));
            }
        }
        Ok(Self { risks, index })
    }

    /// Look up a risk by ID.
    #[must_use]
    pub fn get(&self, id: &RiskId) -> Option<&Risk> {
        self.index.get(id).map(|&position| &self.risks[position])
    }

    /// Iterate risks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Risk> {
        self.risks.iter()
    }

    /// Number of risks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.risks.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.risks.is_empty()
    }

    /// Per-domain statistics in order of first appearance.
    #[must_use]
    pub fn domain_statistics(&self) -> Vec<DomainStatistics> {
        let mut stats: Vec<DomainStatistics> = Vec::new();
        for risk in &self.risks {
            let entry = match stats.iter().position(|s| s.domain == risk.domain()) {
                Some(position) => &mut stats[position],
                None => {
                    stats.push(DomainStatistics::empty(risk.domain()));
                    let last = stats.len() - 1;
                    &mut stats[last]
                }
            };
            entry.risk_count += 1;
            entry.risks.push(DomainRiskSummary {
                id: risk.id().clone(),
                name: risk.name().to_string(),
                probability_baseline: risk.probability_baseline(),
                probability_live: risk.probability_live(),
            });
        }

        for entry in &mut stats {
            let count = entry.risks.len() as f64;
            let baseline: f64 = entry.risks.iter().map(|r| r.probability_baseline).sum();
            let live: f64 = entry.risks.iter().map(|r| r.probability_live).sum();
            entry.avg_probability_baseline = round_dp(baseline / count, 1);
            entry.avg_probability_live = round_dp(live / count, 1);
        }
        stats
    }
}

/// Aggregate view of one risk domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainStatistics {
    /// Domain.
    pub domain: RiskDomain,
    /// Number of risks in the domain.
    pub risk_count: usize,
    /// Mean baseline probability, 1 dp.
    pub avg_probability_baseline: f64,
    /// Mean live probability, 1 dp.
    pub avg_probability_live: f64,
    /// Member risks.
    pub risks: Vec<DomainRiskSummary>,
}

impl DomainStatistics {
    const fn empty(domain: RiskDomain) -> Self {
        Self {
            domain,
            risk_count: 0,
            avg_probability_baseline: 0.0,
            avg_probability_live: 0.0,
            risks: Vec::new(),
        }
    }
}

/// Risk entry inside [`DomainStatistics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainRiskSummary {
    /// Risk ID.
    pub id: RiskId,
    /// Risk name.
    pub name: String,
    /// Baseline probability.
    pub probability_baseline: f64,
    /// Live probability.
    pub probability_live: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk_catalog::seed::seed_risks;
    use crate::domain::risk_catalog::value_objects::ConfidenceLevel;
    use crate::domain::shared::Timestamp;

    #[test]
    fn seed_catalog_lookup() {
        let catalog = RiskCatalog::from_risks(seed_risks().unwrap()).unwrap();
        assert_eq!(catalog.len(), 13);

        let risk = catalog.get(&RiskId::new("P1.1")).unwrap();
        assert_eq!(risk.probability_baseline(), 12.0);
        assert!(catalog.get(&RiskId::new("Z0.0")).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut risks = seed_risks().unwrap();
        risks.push(risks[0].clone());
        assert!(matches!(
            RiskCatalog::from_risks(risks),
            Err(CatalogError::DuplicateRisk(_))
        ));
    }

    #[test]
    fn domain_statistics_follow_first_appearance() {
        let catalog = RiskCatalog::from_risks(seed_risks().unwrap()).unwrap();
        let stats = catalog.domain_statistics();

        let domains: Vec<_> = stats.iter().map(|s| s.domain).collect();
        assert_eq!(
            domains,
            vec![
                RiskDomain::Physical,
                RiskDomain::Structural,
                RiskDomain::Digital,
                RiskDomain::Operational
            ]
        );

        let physical = &stats[0];
        assert_eq!(physical.risk_count, 4);
        // (12 + 25 + 35 + 45) / 4 = 29.25
        assert_eq!(physical.avg_probability_baseline, 29.2);
    }

    #[test]
    fn domain_statistics_use_live_probability() {
        let mut risk = Risk::new(
            "D1.1",
            "Ransomware",
            RiskDomain::Digital,
            "",
            40.0,
            ConfidenceLevel::High,
            vec![],
        )
        .unwrap();
        risk.apply_live_probability(50.6, Timestamp::now());
        let catalog = RiskCatalog::from_risks(vec![risk]).unwrap();

        let stats = catalog.domain_statistics();
        assert_eq!(stats[0].avg_probability_baseline, 40.0);
        assert_eq!(stats[0].avg_probability_live, 50.6);
    }
}
