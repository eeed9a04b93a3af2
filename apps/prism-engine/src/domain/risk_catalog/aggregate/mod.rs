//! Risk Catalog Aggregates

mod risk;

pub use risk::{PROBABILITY_MAX, PROBABILITY_MIN, Risk, clamp_probability};
