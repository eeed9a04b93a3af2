//! Calculate Exposure Use Case

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::application::dto::{CalculationRequestDto, CalculationResponseDto};
use crate::application::ports::{StoreError, StorePort};
use crate::domain::exposure::ExposureAggregator;
use crate::domain::risk_catalog::{CatalogError, RiskCatalog};
use crate::observability::record_exposure_calculation;

/// Failure while calculating exposure. No partial result is returned.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Risk state could not be read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored risks do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Use case for calculating a client's exposure against the live catalog.
pub struct CalculateExposureUseCase<S>
where
    S: StorePort,
{
    store: Arc<S>,
}

impl<S> CalculateExposureUseCase<S>
where
    S: StorePort,
{
    /// Create a new CalculateExposureUseCase.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Execute the use case.
    #[tracing::instrument(skip_all, fields(client = %request.client_data.client_name))]
    pub async fn execute(
        &self,
        request: CalculationRequestDto,
    ) -> Result<CalculationResponseDto, CalculationError> {
        let started = Instant::now();

        // Snapshot of live probabilities for the whole calculation
        let catalog = RiskCatalog::from_risks(self.store.list_risks().await?)?;

        let client = &request.client_data;
        let breakdown = ExposureAggregator::new(request.use_cascading).aggregate(
            &client.processes,
            &client.assessments,
            &client.dependencies,
            &catalog,
        );

        record_exposure_calculation(request.use_cascading, started.elapsed().as_secs_f64());
        tracing::info!(
            records = breakdown.exposures.len(),
            total = breakdown.summary.total_overall_exposure,
            "Exposure calculated"
        );

        Ok(CalculationResponseDto::from_breakdown(breakdown, client))
    }
}
