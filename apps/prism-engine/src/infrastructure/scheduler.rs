//! Periodic probability updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::application::ports::StorePort;
use crate::application::use_cases::ProbabilityEngine;

/// Runs `update_all_probabilities` on a fixed interval until cancelled.
pub struct UpdateScheduler<S>
where
    S: StorePort,
{
    engine: Arc<ProbabilityEngine<S>>,
    interval: Duration,
    run_on_startup: bool,
}

impl<S> UpdateScheduler<S>
where
    S: StorePort,
{
    /// Create a scheduler. The first run happens one `interval` after start
    /// unless `run_on_startup` is set.
    pub const fn new(
        engine: Arc<ProbabilityEngine<S>>,
        interval: Duration,
        run_on_startup: bool,
    ) -> Self {
        Self {
            engine,
            interval,
            run_on_startup,
        }
    }

    /// Run the loop until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            run_on_startup = self.run_on_startup,
            "Starting probability update scheduler"
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !self.run_on_startup {
            // First tick completes immediately.
            interval.tick().await;
        }

        loop {
            tokio::select! {
                () = shutdown.cancelled() => {
                    tracing::info!("Probability update scheduler shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match self.engine.update_all_probabilities().await {
                        Ok(summary) => tracing::info!(
                            risks_updated = summary.risks_updated,
                            signals_collected = summary.signals_collected,
                            "Scheduled probability update completed"
                        ),
                        Err(e) => tracing::error!(error = %e, "Scheduled probability update failed"),
                    }
                }
            }
        }
    }
}
