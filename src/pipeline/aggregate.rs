// src/pipeline/aggregate.rs

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::{mpsc, Semaphore};
use tokio::task;
use tracing::{debug, error};

use crate::pipeline::unit::{process_unit, UnitResult};
use crate::scan::{Stage, Unit};

/// Consolidated outcome of one report run across the whole fleet.
///
/// Built fresh each run and never mutated afterwards; the next run's report
/// supersedes it wholesale. `per_unit` is ordered ascending by unit name,
/// projected from a name-keyed map so the ordering is independent of task
/// completion order.
#[derive(Debug, Clone)]
pub struct AggregateReport {
    pub total_units: usize,
    pub per_unit: Vec<UnitResult>,
    pub generated_at: DateTime<Local>,
}

impl AggregateReport {
    /// Number of units that completed `stage`.
    pub fn completed_count(&self, stage: Stage) -> usize {
        self.per_unit
            .iter()
            .filter(|u| u.completed.is_done(stage))
            .count()
    }

    /// Fleet-wide completion percentage for `stage`.
    ///
    /// Defined as 0.0 for an empty fleet — never a division by zero.
    pub fn completed_percent(&self, stage: Stage) -> f64 {
        if self.total_units == 0 {
            return 0.0;
        }
        self.completed_count(stage) as f64 / self.total_units as f64 * 100.0
    }

    /// Names of the units that completed `stage`, in `per_unit` order.
    pub fn completed_units(&self, stage: Stage) -> impl Iterator<Item = &str> {
        self.per_unit
            .iter()
            .filter(move |u| u.completed.is_done(stage))
            .map(|u| u.name.as_str())
    }
}

/// Process all `units` concurrently and collect an [`AggregateReport`].
///
/// Fan-out is bounded by `parallelism`: each unit's filesystem probing runs
/// on the blocking pool behind a semaphore permit, so a large fleet cannot
/// exhaust file descriptors or OS threads. Results fan in over a channel and
/// are keyed by unit name; the channel drain is the barrier — aggregation
/// only proceeds once every dispatched unit has reported.
pub async fn aggregate(units: Vec<Unit>, parallelism: usize) -> AggregateReport {
    let total_units = units.len();
    let semaphore = Arc::new(Semaphore::new(parallelism.max(1)));
    let (tx, mut rx) = mpsc::channel::<UnitResult>(total_units.max(1));

    for unit in units {
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();

        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                // Semaphore is never closed while the run is alive.
                return;
            };

            let name = unit.name.clone();
            match task::spawn_blocking(move || process_unit(&unit)).await {
                Ok(result) => {
                    let _ = tx.send(result).await;
                }
                Err(err) => {
                    error!(unit = %name, error = %err, "unit processing task aborted");
                }
            }
        });
    }
    // The loop's clones keep the channel open; drop the original so `recv`
    // terminates once every worker has reported.
    drop(tx);

    let mut by_name: BTreeMap<String, UnitResult> = BTreeMap::new();
    while let Some(result) = rx.recv().await {
        by_name.insert(result.name.clone(), result);
    }

    debug!(total_units, collected = by_name.len(), "aggregation barrier complete");

    AggregateReport {
        total_units,
        per_unit: by_name.into_values().collect(),
        generated_at: Local::now(),
    }
}
