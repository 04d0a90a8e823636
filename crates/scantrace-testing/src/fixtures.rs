use scantrace_client::transport::PollResponse;
use scantrace_types::{
    Action, ActionId, ActionPayload, Finding, Report, ScanId, ScanStatus, TextPayload,
    ToolCallPayload, ToolResultPayload,
};

pub const TEST_SCAN: &str = "scan-test";

pub fn tool_call(id: &str, ts: i64, tool: &str) -> Action {
    Action {
        id: ActionId::new(id),
        scan_id: ScanId::new(TEST_SCAN),
        timestamp: ts,
        payload: ActionPayload::ToolCall(ToolCallPayload {
            tool: Some(tool.to_string()),
            input: None,
            summary: Some(format!("{} target", tool)),
        }),
    }
}

pub fn tool_result(id: &str, ts: i64, summary: &str) -> Action {
    Action {
        id: ActionId::new(id),
        scan_id: ScanId::new(TEST_SCAN),
        timestamp: ts,
        payload: ActionPayload::ToolResult(ToolResultPayload {
            summary: Some(summary.to_string()),
            content: None,
            storage_id: None,
        }),
    }
}

pub fn reasoning(id: &str, ts: i64, text: &str) -> Action {
    Action {
        id: ActionId::new(id),
        scan_id: ScanId::new(TEST_SCAN),
        timestamp: ts,
        payload: ActionPayload::Reasoning(TextPayload::Text(text.to_string())),
    }
}

pub fn observation(id: &str, ts: i64, text: &str) -> Action {
    Action {
        id: ActionId::new(id),
        scan_id: ScanId::new(TEST_SCAN),
        timestamp: ts,
        payload: ActionPayload::Observation(TextPayload::Text(text.to_string())),
    }
}

pub fn running(actions: Vec<Action>) -> PollResponse {
    PollResponse {
        status: ScanStatus::Running,
        error: None,
        actions,
        report: None,
    }
}

pub fn completed(actions: Vec<Action>, report: Option<Report>) -> PollResponse {
    PollResponse {
        status: ScanStatus::Completed,
        error: None,
        actions,
        report,
    }
}

pub fn failed(error: &str) -> PollResponse {
    PollResponse {
        status: ScanStatus::Failed,
        error: Some(error.to_string()),
        actions: Vec::new(),
        report: None,
    }
}

pub fn finding(title: &str, severity: &str) -> Finding {
    Finding {
        title: Some(title.to_string()),
        severity: Some(severity.to_string()),
        description: None,
        extra: serde_json::Map::new(),
    }
}

pub fn report_with(findings: Vec<Finding>) -> Report {
    Report {
        summary: Some("test report".to_string()),
        findings,
    }
}
