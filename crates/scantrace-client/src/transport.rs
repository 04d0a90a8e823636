use crate::error::Result;
use async_trait::async_trait;
use scantrace_types::{Action, Report, ScanId, ScanStatus};
use serde::Serialize;

/// Request to launch a scan against a repository target.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    pub repo_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LaunchResponse {
    pub scan_id: ScanId,
    pub project_id: Option<String>,
}

/// One poll response: the scan's current status plus every action strictly
/// newer than the requested cursor, ordered by timestamp.
#[derive(Debug, Clone)]
pub struct PollResponse {
    pub status: ScanStatus,
    pub error: Option<String>,
    pub actions: Vec<Action>,
    pub report: Option<Report>,
}

/// The remote job service, as seen by the polling core.
///
/// TODO(server-contract): confirm whether the server's `after` filter is
/// strict (`>`) or inclusive (`>=`). The client dedupes on action id and
/// only ever advances the cursor to timestamps it has received, so either
/// reading is safe here, but the boundary should be pinned down server-side.
#[async_trait]
pub trait ScanTransport: Send + Sync {
    async fn launch(&self, request: &LaunchRequest) -> Result<LaunchResponse>;

    /// Fetch actions newer than `after` along with the scan's status.
    async fn poll(&self, scan_id: &ScanId, after: i64) -> Result<PollResponse>;

    /// Fetch the terminal report, when the poll response did not carry it.
    async fn fetch_report(&self, scan_id: &ScanId) -> Result<Option<Report>>;
}
