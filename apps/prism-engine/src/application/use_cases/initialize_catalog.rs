//! Initialize Catalog Use Case
//!
//! Seeds the store with catalog risks it does not hold yet. Risks already
//! present keep their live state.

use crate::application::ports::{StoreError, StorePort};
use crate::domain::risk_catalog::Risk;

/// Insert every risk the store is missing. Returns the number inserted.
pub async fn initialize_catalog<S>(store: &S, risks: &[Risk]) -> Result<usize, StoreError>
where
    S: StorePort + ?Sized,
{
    let mut inserted = 0;
    for risk in risks {
        match store.get_risk(risk.id()).await {
            Ok(_) => {}
            Err(StoreError::RiskNotFound(_)) => {
                store.put_risk(risk).await?;
                inserted += 1;
            }
            Err(e) => return Err(e),
        }
    }
    tracing::info!(inserted, total = risks.len(), "Risk catalog initialized");
    Ok(inserted)
}
