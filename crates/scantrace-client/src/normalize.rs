use crate::schema::RawAction;
use scantrace_types::{
    Action, ActionId, ActionPayload, HumanInputPayload, ScanId, TextPayload, ToolCallPayload,
    ToolResultPayload,
};
use serde_json::Value;

/// Convert a wire action into the typed model. Total: unknown types and
/// malformed payloads degrade to the inert `Unknown` variant instead of
/// erroring, because the action log is an external contract that evolves
/// ahead of this client.
pub fn normalize_action(raw: RawAction) -> Action {
    let payload = normalize_payload(&raw.action_type, raw.payload);

    Action {
        id: ActionId::new(raw.id),
        scan_id: ScanId::new(raw.scan_id),
        timestamp: raw.timestamp,
        payload,
    }
}

fn normalize_payload(action_type: &str, payload: Value) -> ActionPayload {
    match action_type {
        "tool_call" => match serde_json::from_value::<ToolCallPayload>(payload.clone()) {
            Ok(call) => ActionPayload::ToolCall(call),
            Err(_) => unknown(action_type, payload),
        },
        "tool_result" => match serde_json::from_value::<ToolResultPayload>(payload.clone()) {
            Ok(result) => ActionPayload::ToolResult(result),
            Err(_) => unknown(action_type, payload),
        },
        "reasoning" => ActionPayload::Reasoning(text_payload(payload)),
        "observation" => ActionPayload::Observation(text_payload(payload)),
        "report" => ActionPayload::Report(text_payload(payload)),
        "human_input_request" => {
            match serde_json::from_value::<HumanInputPayload>(payload.clone()) {
                Ok(request) => ActionPayload::HumanInputRequest(request),
                Err(_) => unknown(action_type, payload),
            }
        }
        _ => unknown(action_type, payload),
    }
}

fn text_payload(payload: Value) -> TextPayload {
    match payload {
        Value::String(s) => TextPayload::Text(s),
        other => TextPayload::Structured(other),
    }
}

fn unknown(action_type: &str, payload: Value) -> ActionPayload {
    ActionPayload::Unknown {
        kind: action_type.to_string(),
        raw: payload,
    }
}
