use serde::{Deserialize, Serialize};
use serde_json::Value;

// NOTE: Schema Design Goals
//
// 1. Closed enumeration with an inert escape hatch: the action log is an
//    external, evolving contract. New `type` values must flow through the
//    client as `Unknown` rather than failing a whole poll batch.
// 2. Payload shapes are type-dependent and only loosely guaranteed by the
//    server. Every structured field is optional; a reasoning/observation
//    payload may be a bare string or an object.
// 3. Actions are immutable once received. The client accumulates them and
//    derives everything else (turns, stats) from the buffer.

/// Opaque server-assigned action identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque server-assigned scan identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(String);

impl ScanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a scan's append-only execution log.
///
/// `timestamp` is assigned by the server at insertion time, in milliseconds,
/// and is non-decreasing within a scan. It doubles as the pagination cursor,
/// so multiple actions may share a value.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub scan_id: ScanId,
    pub timestamp: i64,
    #[serde(flatten)]
    pub payload: ActionPayload,
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match &self.payload {
            ActionPayload::ToolCall(_) => "tool_call",
            ActionPayload::ToolResult(_) => "tool_result",
            ActionPayload::Reasoning(_) => "reasoning",
            ActionPayload::Observation(_) => "observation",
            ActionPayload::Report(_) => "report",
            ActionPayload::HumanInputRequest(_) => "human_input_request",
            ActionPayload::Unknown { .. } => "unknown",
        }
    }

    pub fn is_reasoning(&self) -> bool {
        matches!(self.payload, ActionPayload::Reasoning(_))
    }
}

/// Action type and content
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "payload")]
#[serde(rename_all = "snake_case")]
pub enum ActionPayload {
    /// Agent invoked a tool
    ToolCall(ToolCallPayload),

    /// Output of a prior tool call
    ToolResult(ToolResultPayload),

    /// Agent reasoning step; anchors a turn in the derived trace
    Reasoning(TextPayload),

    /// Free-form progress note from the worker
    Observation(TextPayload),

    /// Terminal report marker emitted when the agent finishes
    Report(TextPayload),

    /// Agent is blocked waiting for an answer from the user
    HumanInputRequest(HumanInputPayload),

    /// Unrecognized `type` value. Carried verbatim, counted nowhere.
    Unknown { kind: String, raw: Value },
}

/// Payload that may arrive as a bare string or a structured object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextPayload {
    Text(String),
    Structured(Value),
}

impl TextPayload {
    /// Render to display text. Bare strings pass through verbatim;
    /// structured payloads serialize to JSON (keys ordered, so the rendered
    /// form is stable across re-derivations).
    pub fn render(&self) -> String {
        match self {
            TextPayload::Text(s) => s.clone(),
            TextPayload::Structured(v) => serde_json::to_string(v).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            TextPayload::Text(s) => s.is_empty(),
            TextPayload::Structured(v) => v.is_null(),
        }
    }
}

impl Default for TextPayload {
    fn default() -> Self {
        TextPayload::Text(String::new())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallPayload {
    /// Tool name, looked up in the classification table for stats
    #[serde(default)]
    pub tool: Option<String>,

    #[serde(default)]
    pub input: Option<Value>,

    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResultPayload {
    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    /// Reference to externally stored bulk output
    #[serde(default)]
    pub storage_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanInputPayload {
    #[serde(default)]
    pub prompt_id: Option<String>,

    #[serde(default)]
    pub question: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_payload_renders_string_verbatim() {
        let payload = TextPayload::Text("checking auth flow".to_string());
        assert_eq!(payload.render(), "checking auth flow");
    }

    #[test]
    fn test_text_payload_renders_structured_as_stable_json() {
        let payload = TextPayload::Structured(serde_json::json!({
            "zeta": 1,
            "alpha": 2,
        }));
        // serde_json orders object keys, so repeated renders agree
        assert_eq!(payload.render(), r#"{"alpha":2,"zeta":1}"#);
        assert_eq!(payload.render(), payload.render());
    }

    #[test]
    fn test_action_serializes_with_type_tag() {
        let action = Action {
            id: ActionId::new("a1"),
            scan_id: ScanId::new("s1"),
            timestamp: 1000,
            payload: ActionPayload::Reasoning(TextPayload::Text("hm".to_string())),
        };
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"], "reasoning");
        assert_eq!(json["payload"], "hm");
    }

    #[test]
    fn test_tool_call_payload_tolerates_missing_fields() {
        let payload: ToolCallPayload = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(payload.tool.is_none());
        assert!(payload.input.is_none());
    }
}
