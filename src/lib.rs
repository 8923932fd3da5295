// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod trigger;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::{MonitorLoop, ReportPipeline, ScheduleState};
use crate::notify::SmtpNotifier;
use crate::report::SvgRenderer;
use crate::scan::{list_units, Unit};
use crate::trigger::RequestFileTrigger;

/// Environment variable holding the SMTP password.
pub const SMTP_PASSWORD_ENV: &str = "MDWATCH_SMTP_PASSWORD";

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the report pipeline (scan / aggregate / report / charts)
/// - the notification channel and trigger source
/// - the monitor loop (or a single run in `--once` mode)
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let mut cfg = load_and_validate(&config_path)?;

    // CLI overrides for the two directories.
    if let Some(dir) = args.input_dir {
        cfg.monitor.input_dir = dir;
    }
    if let Some(dir) = args.output_dir {
        cfg.monitor.output_dir = dir;
    }

    let input_dir = PathBuf::from(&cfg.monitor.input_dir);
    let output_dir = PathBuf::from(&cfg.monitor.output_dir);

    // A fundamentally inaccessible input root is the one fault that may
    // terminate the process, and only here at launch.
    let units = list_units(&input_dir)
        .with_context(|| format!("input directory {input_dir:?} is not accessible"))?;
    info!(input_dir = ?input_dir, units = units.len(), "startup scan complete");

    if args.dry_run {
        print_dry_run(&cfg, &units);
        return Ok(());
    }

    let pipeline = ReportPipeline {
        input_dir,
        output_dir: output_dir.clone(),
        parallelism: cfg.monitor.parallelism,
        renderer: SvgRenderer,
    };

    let notifier = cfg.email.as_ref().map(|email| {
        let password = std::env::var(SMTP_PASSWORD_ENV).ok();
        if password.is_none() {
            warn!(
                "{SMTP_PASSWORD_ENV} not set; connecting to {} without credentials",
                email.smtp_host
            );
        }
        SmtpNotifier::new(email, password)
    });

    if args.once {
        pipeline.run_once(notifier.as_ref()).await?;
        return Ok(());
    }

    let trigger = RequestFileTrigger::new(cfg.trigger.request_path(&output_dir));
    let schedule = ScheduleState::new(cfg.monitor.interval());

    let monitor = MonitorLoop::new(pipeline, schedule, trigger, notifier, cfg.monitor.tick());
    monitor.run().await
}

/// Simple dry-run output: print effective settings and detected units.
fn print_dry_run(cfg: &ConfigFile, units: &[Unit]) {
    println!("mdwatch dry-run");
    println!("  monitor.input_dir = {}", cfg.monitor.input_dir);
    println!("  monitor.output_dir = {}", cfg.monitor.output_dir);
    println!("  monitor.interval_hours = {}", cfg.monitor.interval_hours);
    println!("  monitor.tick_seconds = {}", cfg.monitor.tick_seconds);
    println!("  monitor.parallelism = {}", cfg.monitor.parallelism);
    match &cfg.email {
        Some(email) => println!("  email: {} -> {} via {}", email.from, email.to, email.smtp_host),
        None => println!("  email: disabled"),
    }
    println!("  trigger.request_file = {}", cfg.trigger.request_file);
    println!();

    println!("units ({}):", units.len());
    for unit in units {
        println!("  - {}", unit.name);
    }

    debug!("dry-run complete (no processing)");
}
