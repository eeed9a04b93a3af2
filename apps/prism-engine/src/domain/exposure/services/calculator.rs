//! Exposure Calculator
//!
//! Pure annual-loss arithmetic. No rounding and no clamping happen here;
//! out-of-range percentages produce out-of-range results.

/// Days per year used to annualize daily exposure.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Annual base exposure in EUR.
///
/// `criticality × vulnerability% × (1 − resilience%) × probability% × 365`
#[must_use]
pub fn base_exposure(
    criticality_eur_per_day: f64,
    vulnerability: f64,
    resilience: f64,
    probability: f64,
) -> f64 {
    let vulnerability = vulnerability / 100.0;
    let resilience = resilience / 100.0;
    let probability = probability / 100.0;

    let daily = criticality_eur_per_day * vulnerability * (1.0 - resilience) * probability;
    daily * DAYS_PER_YEAR
}

/// Share of an upstream exposure that reaches a downstream process.
#[must_use]
pub fn cascading_exposure(
    upstream_exposure: f64,
    dependency_strength: f64,
    downstream_resilience: f64,
) -> f64 {
    upstream_exposure * dependency_strength * (1.0 - downstream_resilience / 100.0)
}
