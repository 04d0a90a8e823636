pub mod scan;
pub mod watch;

use crate::presentation::ConsoleView;
use anyhow::{Context, Result};
use scantrace_client::{CancelToken, PollConfig, ScanOutcome, ScanSnapshot, watch_scan};
use scantrace_client::transport::ScanTransport;
use scantrace_types::ScanId;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WatchOpts {
    pub json: bool,
    pub ci: bool,
    pub timeout: Option<u64>,
}

/// Drive one watch to its end and translate the outcome into an exit code.
/// Shared by `scan` (freshly launched) and `watch` (re-attached).
pub(crate) async fn run_watch(
    transport: &dyn ScanTransport,
    scan_id: &ScanId,
    opts: &WatchOpts,
) -> Result<i32> {
    let cancel = CancelToken::new();
    {
        let handle = cancel.clone();
        ctrlc::set_handler(move || handle.cancel())
            .context("failed to install interrupt handler")?;
    }

    let config = PollConfig {
        deadline: opts.timeout.map(Duration::from_secs),
        ..PollConfig::default()
    };

    let view = ConsoleView::new(opts.ci);
    let mut last: Option<ScanSnapshot> = None;
    let mut rendered = 0usize;

    let outcome = watch_scan(transport, scan_id, config, cancel, |snapshot| {
        if !opts.json {
            rendered = view.render_actions_from(&snapshot, rendered);
        }
        last = Some(snapshot);
    })
    .await;

    if opts.json {
        let doc = json_document(scan_id, &last, &outcome);
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(exit_code(&outcome));
    }

    if let Some(snapshot) = &last {
        view.render_summary(snapshot);
    }

    match &outcome {
        ScanOutcome::Completed { report } => view.render_report(report.as_ref()),
        ScanOutcome::Failed { error } => view.render_failure(error),
        ScanOutcome::StillRunning => view.render_detached(scan_id, "local timeout reached"),
        ScanOutcome::Cancelled => view.render_detached(scan_id, "interrupted"),
    }

    Ok(exit_code(&outcome))
}

fn exit_code(outcome: &ScanOutcome) -> i32 {
    match outcome {
        ScanOutcome::Completed { report } => {
            let blocking = report
                .as_ref()
                .map(|r| r.has_blocking_findings())
                .unwrap_or(false);
            if blocking { 1 } else { 0 }
        }
        ScanOutcome::Failed { .. } => 2,
        // The scan is still running remotely; nothing is known to be wrong
        ScanOutcome::StillRunning | ScanOutcome::Cancelled => 0,
    }
}

fn json_document(
    scan_id: &ScanId,
    last: &Option<ScanSnapshot>,
    outcome: &ScanOutcome,
) -> serde_json::Value {
    let (outcome_label, report, error) = match outcome {
        ScanOutcome::Completed { report } => ("completed", report.clone(), None),
        ScanOutcome::Failed { error } => ("failed", None, Some(error.clone())),
        ScanOutcome::StillRunning => ("still_running", None, None),
        ScanOutcome::Cancelled => ("cancelled", None, None),
    };

    serde_json::json!({
        "scanId": scan_id,
        "outcome": outcome_label,
        "status": last.as_ref().map(|s| s.status.clone()),
        "turns": last.as_ref().map(|s| &s.turns),
        "stats": last.as_ref().and_then(|s| s.stats.as_ref()),
        "report": report,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scantrace_types::{Finding, Report};

    fn report(severities: &[&str]) -> Report {
        Report {
            summary: None,
            findings: severities
                .iter()
                .map(|s| Finding {
                    severity: Some(s.to_string()),
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn test_clean_completion_exits_zero() {
        let outcome = ScanOutcome::Completed {
            report: Some(report(&["low", "medium"])),
        };
        assert_eq!(exit_code(&outcome), 0);
    }

    #[test]
    fn test_completion_without_report_exits_zero() {
        let outcome = ScanOutcome::Completed { report: None };
        assert_eq!(exit_code(&outcome), 0);
    }

    #[test]
    fn test_blocking_findings_exit_one() {
        let outcome = ScanOutcome::Completed {
            report: Some(report(&["low", "critical"])),
        };
        assert_eq!(exit_code(&outcome), 1);
    }

    #[test]
    fn test_remote_failure_exits_two() {
        let outcome = ScanOutcome::Failed {
            error: "sandbox crashed".to_string(),
        };
        assert_eq!(exit_code(&outcome), 2);
    }

    #[test]
    fn test_detach_outcomes_exit_zero() {
        assert_eq!(exit_code(&ScanOutcome::StillRunning), 0);
        assert_eq!(exit_code(&ScanOutcome::Cancelled), 0);
    }
}
