//! Raw wire shapes for the job service API.
//!
//! The service speaks camelCase JSON and treats `payload` as a free-form
//! value whose shape depends on `type`. These DTOs capture exactly what
//! arrives on the wire; `normalize` turns them into the typed model. Parsing
//! is deliberately tolerant: a new action type or a reshaped payload must
//! never fail a poll batch.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAction {
    pub id: String,

    pub scan_id: String,

    #[serde(rename = "type")]
    pub action_type: String,

    #[serde(default)]
    pub payload: Value,

    pub timestamp: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponseSchema {
    pub status: String,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub actions: Vec<RawAction>,

    #[serde(default)]
    pub report: Option<scantrace_types::Report>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponseSchema {
    pub scan_id: String,

    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseSchema {
    #[serde(default)]
    pub report: Option<scantrace_types::Report>,
}
