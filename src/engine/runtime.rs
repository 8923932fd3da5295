// src/engine/runtime.rs

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::engine::schedule::ScheduleState;
use crate::notify::NotificationChannel;
use crate::pipeline::aggregate;
use crate::report::{
    build, ChartRenderer, GLOBAL_PROGRESS_CHART, REPORT_FILE_NAME, UNIT_PROGRESS_CHART,
    UNIT_STORAGE_CHART,
};
use crate::scan::list_units;
use crate::trigger::TriggerSource;

/// Fixed notification subject/body; the interesting content travels as
/// attachments.
const NOTIFY_SUBJECT: &str = "Molecular Dynamics Simulation Monitoring Report";
const NOTIFY_BODY: &str = "Please find the attached monitoring report and generated charts.";

/// Outcome of a single report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Artifacts were written (and a notification attempted, if configured).
    Completed,
    /// No units under the input root; nothing was produced.
    SkippedNoUnits,
}

/// One full report pipeline: locate → aggregate → build → persist → notify.
///
/// Holds no mutable state; the loop (or `--once` mode) drives it.
pub struct ReportPipeline<R: ChartRenderer> {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub parallelism: usize,
    pub renderer: R,
}

impl<R: ChartRenderer> ReportPipeline<R> {
    /// Execute one run.
    ///
    /// A notification failure is logged here and does not fail the run —
    /// the artifacts are already on disk. Everything else (unreadable input
    /// root, artifact write failure) surfaces as `Err` for the caller to
    /// log; it is never fatal to the loop.
    pub async fn run_once<N>(&self, notifier: Option<&N>) -> Result<RunOutcome>
    where
        N: NotificationChannel,
    {
        let units = list_units(&self.input_dir)
            .with_context(|| format!("listing units under {:?}", self.input_dir))?;

        if units.is_empty() {
            warn!(input_dir = ?self.input_dir, "no unit directories found; skipping report");
            return Ok(RunOutcome::SkippedNoUnits);
        }

        let unit_count = units.len();
        let report = aggregate(units, self.parallelism).await;
        let output = build(&report);

        fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("creating output directory {:?}", self.output_dir))?;

        let report_path = self.output_dir.join(REPORT_FILE_NAME);
        fs::write(&report_path, &output.text)
            .with_context(|| format!("writing report to {report_path:?}"))?;

        let global_chart = self.output_dir.join(GLOBAL_PROGRESS_CHART);
        let progress_chart = self.output_dir.join(UNIT_PROGRESS_CHART);
        let storage_chart = self.output_dir.join(UNIT_STORAGE_CHART);

        self.renderer.render(&output.global_progress, &global_chart)?;
        self.renderer.render(&output.unit_progress, &progress_chart)?;
        self.renderer.render(&output.unit_storage, &storage_chart)?;

        info!(
            units = unit_count,
            output_dir = ?self.output_dir,
            "monitoring report and charts written"
        );

        if let Some(notifier) = notifier {
            let attachments = vec![report_path, global_chart, progress_chart, storage_chart];
            if let Err(err) = notifier.send(NOTIFY_SUBJECT, NOTIFY_BODY, &attachments).await {
                error!(error = %err, "error sending report notification");
            }
        }

        Ok(RunOutcome::Completed)
    }
}

/// The process-long control loop.
///
/// Tick-driven: it sleeps between ticks and on each tick evaluates two
/// independent predicates — schedule due, trigger pending. Either (or both)
/// being true starts exactly one report run, awaited inline, so a second
/// run can never start while one is active; a tick arriving mid-run is
/// simply delayed until the loop is back at the ticker.
pub struct MonitorLoop<R, T, N>
where
    R: ChartRenderer,
    T: TriggerSource,
    N: NotificationChannel,
{
    pipeline: ReportPipeline<R>,
    schedule: ScheduleState,
    trigger: T,
    notifier: Option<N>,
    tick: Duration,
}

impl<R, T, N> MonitorLoop<R, T, N>
where
    R: ChartRenderer,
    T: TriggerSource,
    N: NotificationChannel,
{
    pub fn new(
        pipeline: ReportPipeline<R>,
        schedule: ScheduleState,
        trigger: T,
        notifier: Option<N>,
        tick: Duration,
    ) -> Self {
        Self {
            pipeline,
            schedule,
            trigger,
            notifier,
            tick,
        }
    }

    /// Main loop. Runs until the process is terminated or Ctrl-C arrives;
    /// no internal condition ends it.
    pub async fn run(mut self) -> Result<()> {
        info!(tick = ?self.tick, "mdwatch monitor loop started");

        let mut ticker = time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // An interval's first tick completes immediately; consume it so the
        // first evaluation happens one full tick after startup.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                res = tokio::signal::ctrl_c() => {
                    if let Err(err) = res {
                        error!(error = %err, "failed to listen for Ctrl+C");
                    }
                    info!("shutdown requested, stopping monitor loop");
                    break;
                }
            }

            self.on_tick().await;
        }

        info!("mdwatch monitor loop exiting");
        Ok(())
    }

    async fn on_tick(&mut self) {
        let schedule_due = self.schedule.is_due(Instant::now());
        let trigger_pending = self.trigger.has_pending_request();

        // Both firing in the same tick still means exactly one run.
        if !(schedule_due || trigger_pending) {
            return;
        }

        info!(schedule_due, trigger_pending, "starting report run");

        match self.pipeline.run_once(self.notifier.as_ref()).await {
            Ok(RunOutcome::Completed) => info!("report run completed"),
            Ok(RunOutcome::SkippedNoUnits) => {}
            Err(err) => error!(error = ?err, "report run failed"),
        }

        // A trigger-driven run does not reset the cadence; only the
        // schedule firing re-arms it.
        if schedule_due {
            self.schedule.mark_fired(Instant::now());
        }
    }
}
