//! Periodic mutation driver.
//!
//! Ticks the shared [`RankingEngine`] at a fixed cadence for the lifetime of
//! the process. The driver owns its random source.

use std::sync::Arc;
use std::time::Duration;

use ladder_core::{LadderError, RandomSource, RankingEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Spawn the driver on the current runtime with an entropy-seeded RNG.
pub fn spawn_driver(
    engine: Arc<RankingEngine>,
    period: Duration,
    batch_size: usize,
) -> JoinHandle<Result<(), LadderError>> {
    tokio::spawn(run_driver(engine, period, batch_size, StdRng::from_entropy()))
}

/// Tick `engine` every `period`, applying `batch_size` mutations each time.
///
/// Only returns if a tick fails, which means the engine was never
/// initialized.
pub async fn run_driver<R: RandomSource>(
    engine: Arc<RankingEngine>,
    period: Duration,
    batch_size: usize,
    mut rng: R,
) -> Result<(), LadderError> {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; the seeding recompute covers it.
    ticker.tick().await;

    info!(
        period_ms = period.as_millis() as u64,
        batch_size, "driver: started"
    );

    loop {
        ticker.tick().await;
        let report = engine.tick(batch_size, &mut rng)?;

        if report.elapsed > period / 2 {
            warn!(
                generation = report.generation,
                elapsed_ms = report.elapsed.as_millis() as u64,
                "driver: tick held the lock for over half the period"
            );
        } else {
            debug!(generation = report.generation, "driver: tick done");
        }
    }
}
