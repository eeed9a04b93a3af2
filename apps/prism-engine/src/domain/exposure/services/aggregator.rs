//! Exposure Aggregator
//!
//! Turns a client submission into sorted exposure records plus totals.
//! Propagation is single-hop per dependency edge, so cyclic dependency
//! graphs terminate.

use std::collections::HashMap;

use crate::domain::exposure::services::calculator::{base_exposure, cascading_exposure};
use crate::domain::exposure::value_objects::{
    Assessment, Dependency, DomainExposure, ExposureBreakdown, ExposureRecord, ExposureSummary,
    Process, ProcessExposure,
};
use crate::domain::risk_catalog::RiskCatalog;
use crate::domain::shared::{ProcessId, RiskId, round_dp, round_eur};

/// Aggregates per-assessment exposures for one submission.
#[derive(Debug, Clone, Copy)]
pub struct ExposureAggregator {
    use_cascading: bool,
}

impl Default for ExposureAggregator {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ExposureAggregator {
    /// Create an aggregator.
    #[must_use]
    pub const fn new(use_cascading: bool) -> Self {
        Self { use_cascading }
    }

    /// Whether dependencies are propagated.
    #[must_use]
    pub const fn use_cascading(&self) -> bool {
        self.use_cascading
    }

    /// Compute the exposure breakdown.
    ///
    /// Assessments whose process or risk is unknown are skipped. Each risk
    /// contributes with its live probability.
    #[must_use]
    pub fn aggregate(
        &self,
        processes: &[Process],
        assessments: &[Assessment],
        dependencies: &[Dependency],
        catalog: &RiskCatalog,
    ) -> ExposureBreakdown {
        // Later duplicates of a process ID replace earlier ones.
        let process_index: HashMap<&ProcessId, &Process> =
            processes.iter().map(|p| (&p.id, p)).collect();

        // First assessment for a (process, risk) pair supplies downstream resilience.
        let mut resilience_index: HashMap<(&ProcessId, &RiskId), f64> = HashMap::new();
        for assessment in assessments {
            resilience_index
                .entry((&assessment.process_id, &assessment.risk_id))
                .or_insert(assessment.resilience);
        }

        let propagate = self.use_cascading && !dependencies.is_empty();
        let mut exposures = Vec::with_capacity(assessments.len());

        for assessment in assessments {
            let Some(process) = process_index.get(&assessment.process_id) else {
                continue;
            };
            let Some(risk) = catalog.get(&assessment.risk_id) else {
                continue;
            };

            let probability = risk.probability_live();
            let base = base_exposure(
                process.criticality_eur_per_day,
                assessment.vulnerability,
                assessment.resilience,
                probability,
            );

            let cascading = if propagate {
                dependencies
                    .iter()
                    .filter(|dep| dep.upstream_process_id == assessment.process_id)
                    .filter_map(|dep| {
                        resilience_index
                            .get(&(&dep.downstream_process_id, &assessment.risk_id))
                            .map(|&downstream| {
                                cascading_exposure(base, dep.dependency_strength, downstream)
                            })
                    })
                    .sum::<f64>()
            } else {
                0.0
            };

            exposures.push(ExposureRecord {
                risk_id: risk.id().clone(),
                risk_name: risk.name().to_string(),
                domain: risk.domain(),
                process_id: process.id.clone(),
                process_name: process.name.clone(),
                criticality: process.criticality_eur_per_day,
                vulnerability: assessment.vulnerability,
                resilience: assessment.resilience,
                probability,
                base_exposure_eur: round_eur(base),
                cascading_exposure_eur: round_eur(cascading),
                total_exposure_eur: round_eur(base + cascading),
                confidence_level: risk.confidence_level(),
            });
        }

        // `sort_by` is stable: ties keep input order.
        exposures.sort_by(|a, b| b.total_exposure_eur.total_cmp(&a.total_exposure_eur));

        ExposureBreakdown {
            summary: summarize(&exposures),
            by_domain: group_by_domain(&exposures),
            by_process: group_by_process(&exposures),
            exposures,
        }
    }
}

fn summarize(exposures: &[ExposureRecord]) -> ExposureSummary {
    let total_base: f64 = exposures.iter().map(|e| e.base_exposure_eur).sum();
    let total_cascading: f64 = exposures.iter().map(|e| e.cascading_exposure_eur).sum();
    let total_overall: f64 = exposures.iter().map(|e| e.total_exposure_eur).sum();

    let cascading_percentage = if total_overall > 0.0 {
        round_dp(total_cascading / total_overall * 100.0, 1)
    } else {
        0.0
    };

    ExposureSummary {
        total_base_exposure: round_eur(total_base),
        total_cascading_exposure: round_eur(total_cascading),
        total_overall_exposure: round_eur(total_overall),
        total_risks_assessed: exposures.len(),
        cascading_percentage,
    }
}

fn group_by_domain(exposures: &[ExposureRecord]) -> Vec<DomainExposure> {
    let mut groups: Vec<DomainExposure> = Vec::new();
    for record in exposures {
        match groups.iter_mut().find(|g| g.domain == record.domain) {
            Some(group) => {
                group.total_exposure += record.total_exposure_eur;
                group.risk_count += 1;
            }
            None => groups.push(DomainExposure {
                domain: record.domain,
                total_exposure: record.total_exposure_eur,
                risk_count: 1,
            }),
        }
    }
    for group in &mut groups {
        group.total_exposure = round_eur(group.total_exposure);
    }
    groups
}

fn group_by_process(exposures: &[ExposureRecord]) -> Vec<ProcessExposure> {
    let mut groups: Vec<ProcessExposure> = Vec::new();
    for record in exposures {
        match groups.iter_mut().find(|g| g.process_id == record.process_id) {
            Some(group) => {
                group.total_exposure += record.total_exposure_eur;
                group.risk_count += 1;
            }
            None => groups.push(ProcessExposure {
                process_id: record.process_id.clone(),
                process_name: record.process_name.clone(),
                total_exposure: record.total_exposure_eur,
                risk_count: 1,
            }),
        }
    }
    for group in &mut groups {
        group.total_exposure = round_eur(group.total_exposure);
    }
    groups
}
