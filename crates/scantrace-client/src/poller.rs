use crate::cancel::CancelToken;
use crate::transport::{PollResponse, ScanTransport};
use scantrace_engine::{ScanStats, Turn, aggregate_stats, segment_turns};
use scantrace_types::{Action, ActionId, Report, ScanId, ScanStatus};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::Instant;

/// Default interval between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,

    /// Wall-clock budget for the whole watch. When it elapses while the scan
    /// is still active, the loop detaches with [`ScanOutcome::StillRunning`]
    /// and the remote job keeps going.
    pub deadline: Option<Duration>,

    /// Cursor to resume from; 0 replays the scan from the beginning.
    pub resume_after: i64,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            deadline: None,
            resume_after: 0,
        }
    }
}

/// How a watch ended.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Scan finished; report attached when the service produced one
    Completed { report: Option<Report> },

    /// Scan failed remotely; `error` is the service's message
    Failed { error: String },

    /// Local deadline elapsed. Not a failure: the scan is still running
    /// remotely and can be re-attached later.
    StillRunning,

    /// Local cancellation detached the watcher. The job itself is untouched.
    Cancelled,
}

/// Point-in-time view of a scan, delivered to the consumer after each poll.
#[derive(Debug, Clone, Serialize)]
pub struct ScanSnapshot {
    pub actions: Vec<Action>,
    pub turns: Vec<Turn>,
    pub stats: Option<ScanStats>,
    pub status: ScanStatus,
}

/// Client-side accumulation state for one scan: the action buffer, the seen
/// id set, and the cursor watermark.
///
/// Merging is idempotent on action id: a server that re-delivers the cursor
/// boundary inclusively must not duplicate buffer entries. The cursor only
/// ever advances, and only to timestamps that arrived in a batch.
pub struct ScanPoller {
    buffer: Vec<Action>,
    seen: HashSet<ActionId>,
    cursor: i64,
}

impl ScanPoller {
    pub fn new() -> Self {
        Self::resume_from(0)
    }

    pub fn resume_from(cursor: i64) -> Self {
        Self {
            buffer: Vec::new(),
            seen: HashSet::new(),
            cursor,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn actions(&self) -> &[Action] {
        &self.buffer
    }

    /// Append new actions in arrival order, skipping ids already merged.
    /// Returns the number of actions actually added.
    pub fn merge(&mut self, batch: Vec<Action>) -> usize {
        let mut added = 0;
        for action in batch {
            self.cursor = self.cursor.max(action.timestamp);
            if self.seen.insert(action.id.clone()) {
                self.buffer.push(action);
                added += 1;
            }
        }
        added
    }

    /// Re-derive the full presentation view from the current buffer.
    pub fn snapshot(&self, status: ScanStatus) -> ScanSnapshot {
        ScanSnapshot {
            actions: self.buffer.clone(),
            turns: segment_turns(&self.buffer),
            stats: aggregate_stats(&self.buffer),
            status,
        }
    }
}

impl Default for ScanPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// Poll a scan until it reaches a terminal state, the deadline elapses, or
/// the token is cancelled.
///
/// One fetch is in flight at a time. A failed fetch is swallowed and retried
/// on the next tick; it advances nothing and surfaces to the caller only
/// through the deadline. `on_update` receives a fresh snapshot after every
/// successful poll.
pub async fn watch_scan<F>(
    transport: &dyn ScanTransport,
    scan_id: &ScanId,
    config: PollConfig,
    cancel: CancelToken,
    mut on_update: F,
) -> ScanOutcome
where
    F: FnMut(ScanSnapshot),
{
    let started = Instant::now();
    let mut poller = ScanPoller::resume_from(config.resume_after);

    loop {
        if cancel.is_cancelled() {
            return ScanOutcome::Cancelled;
        }

        let response = tokio::select! {
            _ = cancel.cancelled() => return ScanOutcome::Cancelled,
            response = transport.poll(scan_id, poller.cursor()) => response,
        };

        if let Ok(response) = response {
            let PollResponse {
                status,
                error,
                actions,
                report,
            } = response;

            poller.merge(actions);
            on_update(poller.snapshot(status.clone()));

            match status {
                ScanStatus::Completed => {
                    let report = match report {
                        Some(report) => Some(report),
                        None => transport.fetch_report(scan_id).await.ok().flatten(),
                    };
                    return ScanOutcome::Completed { report };
                }
                ScanStatus::Failed => {
                    return ScanOutcome::Failed {
                        error: error.unwrap_or_else(|| "scan failed".to_string()),
                    };
                }
                // queued, running, or a status this client does not know:
                // keep polling
                _ => {}
            }
        }

        if let Some(deadline) = config.deadline
            && started.elapsed() >= deadline
        {
            return ScanOutcome::StillRunning;
        }

        tokio::select! {
            _ = cancel.cancelled() => return ScanOutcome::Cancelled,
            _ = tokio::time::sleep(config.interval) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scantrace_types::{ActionPayload, TextPayload, ToolCallPayload};

    fn tool_call(id: &str, ts: i64) -> Action {
        Action {
            id: ActionId::new(id),
            scan_id: ScanId::new("scan-1"),
            timestamp: ts,
            payload: ActionPayload::ToolCall(ToolCallPayload {
                tool: Some("read_file".to_string()),
                ..Default::default()
            }),
        }
    }

    fn reasoning(id: &str, ts: i64) -> Action {
        Action {
            id: ActionId::new(id),
            scan_id: ScanId::new("scan-1"),
            timestamp: ts,
            payload: ActionPayload::Reasoning(TextPayload::Text("thinking".to_string())),
        }
    }

    #[test]
    fn test_merge_advances_cursor_to_batch_maximum() {
        let mut poller = ScanPoller::new();
        let added = poller.merge(vec![tool_call("a1", 100), tool_call("a2", 250)]);

        assert_eq!(added, 2);
        assert_eq!(poller.cursor(), 250);
        assert_eq!(poller.actions().len(), 2);
    }

    #[test]
    fn test_empty_batch_leaves_cursor_unchanged() {
        let mut poller = ScanPoller::resume_from(500);
        let added = poller.merge(vec![]);

        assert_eq!(added, 0);
        assert_eq!(poller.cursor(), 500);
    }

    #[test]
    fn test_merge_is_idempotent_on_action_id() {
        let mut poller = ScanPoller::new();
        poller.merge(vec![tool_call("a1", 100), reasoning("a2", 200)]);
        // Same batch again, as from an inclusive cursor boundary
        let added = poller.merge(vec![tool_call("a1", 100), reasoning("a2", 200)]);

        assert_eq!(added, 0);
        assert_eq!(poller.actions().len(), 2);
        assert_eq!(poller.cursor(), 200);

        let snapshot = poller.snapshot(ScanStatus::Running);
        assert_eq!(snapshot.turns.len(), 2);
        assert_eq!(snapshot.stats.as_ref().unwrap().turns, 1);
    }

    #[test]
    fn test_cursor_never_regresses() {
        let mut poller = ScanPoller::resume_from(1_000);
        poller.merge(vec![tool_call("a1", 400)]);

        // Late-arriving older timestamp still merges, cursor stays put
        assert_eq!(poller.actions().len(), 1);
        assert_eq!(poller.cursor(), 1_000);
    }

    #[test]
    fn test_snapshot_of_empty_buffer_has_no_stats() {
        let poller = ScanPoller::new();
        let snapshot = poller.snapshot(ScanStatus::Queued);

        assert!(snapshot.actions.is_empty());
        assert!(snapshot.turns.is_empty());
        assert!(snapshot.stats.is_none());
        assert_eq!(snapshot.status, ScanStatus::Queued);
    }
}
