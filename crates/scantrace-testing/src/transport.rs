use async_trait::async_trait;
use scantrace_client::error::{Error, Result};
use scantrace_client::transport::{
    LaunchRequest, LaunchResponse, PollResponse, ScanTransport,
};
use scantrace_types::{Report, ScanId};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A [`ScanTransport`] that replays a script of poll responses.
///
/// Each poll consumes the next entry; `Err` entries simulate transport
/// failures. When the script runs dry the last-resort behavior is a
/// connection-style error, so a runaway loop fails loudly instead of
/// spinning.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<PollResponse>>>,
    poll_calls: AtomicUsize,
    cursors: Mutex<Vec<i64>>,
    report: Mutex<Option<Report>>,
    report_calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<PollResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            poll_calls: AtomicUsize::new(0),
            cursors: Mutex::new(Vec::new()),
            report: Mutex::new(None),
            report_calls: AtomicUsize::new(0),
        }
    }

    /// Script the response to `fetch_report`.
    pub fn with_report(self, report: Report) -> Self {
        *self.report.lock().unwrap() = Some(report);
        self
    }

    /// Number of `poll` calls issued so far.
    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    /// The `after` cursor passed to each poll, in call order.
    pub fn cursors(&self) -> Vec<i64> {
        self.cursors.lock().unwrap().clone()
    }

    /// Number of `fetch_report` calls issued so far.
    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }

    fn network_error() -> Error {
        Error::Api {
            status: 503,
            message: "scripted transport exhausted".to_string(),
        }
    }
}

#[async_trait]
impl ScanTransport for ScriptedTransport {
    async fn launch(&self, _request: &LaunchRequest) -> Result<LaunchResponse> {
        Ok(LaunchResponse {
            scan_id: ScanId::new(crate::fixtures::TEST_SCAN),
            project_id: Some("project-test".to_string()),
        })
    }

    async fn poll(&self, _scan_id: &ScanId, after: i64) -> Result<PollResponse> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(after);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::network_error()))
    }

    async fn fetch_report(&self, _scan_id: &ScanId) -> Result<Option<Report>> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.report.lock().unwrap().clone())
    }
}
