use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::tempdir;

use mdwatch::engine::{MonitorLoop, ReportPipeline, ScheduleState};
use mdwatch::notify::SmtpNotifier;
use mdwatch::report::SvgRenderer;
use mdwatch::scan::COMPLETION_MARKER;
use mdwatch::trigger::RequestFileTrigger;

type TestResult = Result<(), Box<dyn Error>>;

const TICK: Duration = Duration::from_millis(50);
const NEVER: Duration = Duration::from_secs(3600);

fn make_unit(root: &Path, name: &str) -> std::io::Result<()> {
    let dir = root.join(name);
    fs::create_dir_all(dir.join("analysis"))?;
    fs::write(dir.join("EM.log"), format!("{COMPLETION_MARKER}\n"))
}

fn pipeline(input: &Path, output: &Path) -> ReportPipeline<SvgRenderer> {
    ReportPipeline {
        input_dir: input.to_path_buf(),
        output_dir: output.to_path_buf(),
        parallelism: 2,
        renderer: SvgRenderer,
    }
}

async fn wait_for(path: &PathBuf) -> bool {
    for _ in 0..100 {
        if path.exists() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    path.exists()
}

#[tokio::test]
async fn trigger_request_produces_a_report_and_is_consumed() -> TestResult {
    let input = tempdir()?;
    let output = tempdir()?;
    make_unit(input.path(), "villin_MDS")?;

    let request = output.path().join("report.request");
    fs::write(&request, "")?;

    let monitor = MonitorLoop::new(
        pipeline(input.path(), output.path()),
        // Schedule far in the future: only the trigger can fire.
        ScheduleState::new(NEVER),
        RequestFileTrigger::new(&request),
        None::<SmtpNotifier>,
        TICK,
    );
    let handle = tokio::spawn(monitor.run());

    let report_path = output.path().join("complete_monitoring_report.txt");
    assert!(wait_for(&report_path).await, "report never appeared");
    assert!(!request.exists(), "request was not consumed");

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn schedule_fires_after_one_interval() -> TestResult {
    let input = tempdir()?;
    let output = tempdir()?;
    make_unit(input.path(), "barnase_MDS")?;

    let monitor = MonitorLoop::new(
        pipeline(input.path(), output.path()),
        ScheduleState::new(Duration::from_millis(200)),
        RequestFileTrigger::new(output.path().join("report.request")),
        None::<SmtpNotifier>,
        TICK,
    );
    let handle = tokio::spawn(monitor.run());

    let report_path = output.path().join("complete_monitoring_report.txt");
    assert!(wait_for(&report_path).await, "scheduled report never appeared");

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn idle_loop_produces_nothing() -> TestResult {
    let input = tempdir()?;
    let output = tempdir()?;
    make_unit(input.path(), "quiet_MDS")?;

    let monitor = MonitorLoop::new(
        pipeline(input.path(), output.path()),
        ScheduleState::new(NEVER),
        RequestFileTrigger::new(output.path().join("report.request")),
        None::<SmtpNotifier>,
        TICK,
    );
    let handle = tokio::spawn(monitor.run());

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!output.path().join("complete_monitoring_report.txt").exists());

    handle.abort();
    Ok(())
}
