//! Seed set of catalog risks.
//!
//! The catalog is created once from this table; afterwards only live
//! probabilities change.

use crate::domain::risk_catalog::aggregate::Risk;
use crate::domain::risk_catalog::errors::CatalogError;
use crate::domain::risk_catalog::value_objects::{ConfidenceLevel, RiskDomain};

struct SeedRisk {
    id: &'static str,
    name: &'static str,
    domain: RiskDomain,
    description: &'static str,
    probability: f64,
    confidence: ConfidenceLevel,
    sources: &'static [&'static str],
}

const SEED_RISKS: [SeedRisk; 13] = [
    SeedRisk {
        id: "P1.1",
        name: "Major power grid failure (>48hr) in Europe",
        domain: RiskDomain::Physical,
        description: "Grid collapse, blackouts affecting industrial regions",
        probability: 12.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["IEA Energy Security", "ENTSO-E"],
    },
    SeedRisk {
        id: "P1.2",
        name: "Natural gas supply disruption (>30% reduction)",
        domain: RiskDomain::Physical,
        description: "Pipeline sabotage, supply cuts, storage depletion",
        probability: 25.0,
        confidence: ConfidenceLevel::High,
        sources: &["IEA Gas Security", "EIA"],
    },
    SeedRisk {
        id: "P2.1",
        name: "Lithium supply shortage (>30% demand unmet)",
        domain: RiskDomain::Physical,
        description: "Mine production delays, export restrictions",
        probability: 35.0,
        confidence: ConfidenceLevel::High,
        sources: &["USGS", "Benchmark Minerals"],
    },
    SeedRisk {
        id: "P3.1",
        name: "Extreme heat events (>40°C, >7 days)",
        domain: RiskDomain::Physical,
        description: "Worker safety, cooling system strain",
        probability: 45.0,
        confidence: ConfidenceLevel::High,
        sources: &["Copernicus C3S", "IPCC AR6"],
    },
    SeedRisk {
        id: "S1.1",
        name: "US-China trade war escalation (tariffs >50%)",
        domain: RiskDomain::Structural,
        description: "Comprehensive tariff increases, tech decoupling",
        probability: 40.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["USTR", "WTO"],
    },
    SeedRisk {
        id: "S2.1",
        name: "EU-wide carbon price spike (>€150/ton)",
        domain: RiskDomain::Structural,
        description: "ETS reforms, border adjustment mechanism",
        probability: 30.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["European Commission", "EEX"],
    },
    SeedRisk {
        id: "D1.1",
        name: "Ransomware targeting ICS/SCADA systems",
        domain: RiskDomain::Digital,
        description: "Manufacturing disruption, safety systems compromise",
        probability: 55.0,
        confidence: ConfidenceLevel::High,
        sources: &["CISA", "Dragos"],
    },
    SeedRisk {
        id: "D1.2",
        name: "Ransomware targeting ERP/MES systems",
        domain: RiskDomain::Digital,
        description: "Business operations disruption, data encryption",
        probability: 48.0,
        confidence: ConfidenceLevel::High,
        sources: &["CISA", "IBM X-Force"],
    },
    SeedRisk {
        id: "D2.1",
        name: "Cloud provider major outage (>24hr)",
        domain: RiskDomain::Digital,
        description: "AWS/Azure/GCP service disruption",
        probability: 15.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["Uptime Institute"],
    },
    SeedRisk {
        id: "D3.1",
        name: "Data breach exposing customer/IP data",
        domain: RiskDomain::Digital,
        description: "Cyberattack, insider threat, regulatory penalties",
        probability: 42.0,
        confidence: ConfidenceLevel::High,
        sources: &["Verizon DBIR", "IBM Cost of Data Breach"],
    },
    SeedRisk {
        id: "O1.1",
        name: "Container shipping cost surge (>3x baseline)",
        domain: RiskDomain::Operational,
        description: "Port congestion, capacity shortage, fuel costs",
        probability: 38.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["Freightos", "Drewry"],
    },
    SeedRisk {
        id: "O2.1",
        name: "Labor strike at key supplier (>2 weeks)",
        domain: RiskDomain::Operational,
        description: "Wage disputes, working conditions",
        probability: 22.0,
        confidence: ConfidenceLevel::Low,
        sources: &["ILO"],
    },
    SeedRisk {
        id: "O3.1",
        name: "Key component supplier bankruptcy",
        domain: RiskDomain::Operational,
        description: "Financial distress, single-source vulnerability",
        probability: 18.0,
        confidence: ConfidenceLevel::Medium,
        sources: &["Dun & Bradstreet"],
    },
];

/// Build the seed risks, live probability equal to baseline.
///
/// # Errors
///
/// Returns `CatalogError::InvalidRisk` if a seed entry violates a risk invariant.
pub fn seed_risks() -> Result<Vec<Risk>, CatalogError> {
    SEED_RISKS
        .iter()
        .map(|seed| {
            Risk::new(
                seed.id,
                seed.name,
                seed.domain,
                seed.description,
                seed.probability,
                seed.confidence,
                seed.sources.iter().map(|s| (*s).to_string()).collect(),
            )
            .map_err(CatalogError::InvalidRisk)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn seed_has_thirteen_unique_risks() {
        let risks = seed_risks().unwrap();
        assert_eq!(risks.len(), 13);

        let ids: HashSet<_> = risks.iter().map(|r| r.id().clone()).collect();
        assert_eq!(ids.len(), 13);
    }

    #[test]
    fn id_prefix_matches_domain() {
        for risk in seed_risks().unwrap() {
            let prefix = risk.id().as_str().chars().next().unwrap();
            let expected = match risk.domain() {
                RiskDomain::Physical => 'P',
                RiskDomain::Structural => 'S',
                RiskDomain::Digital => 'D',
                RiskDomain::Operational => 'O',
            };
            assert_eq!(prefix, expected, "{}", risk.id());
        }
    }
}
