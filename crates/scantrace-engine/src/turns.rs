use scantrace_types::{Action, ActionPayload};
use serde::Serialize;

/// A reasoning-anchored grouping of consecutive actions.
///
/// Derived client-side, never persisted. Recomputed wholesale from the
/// action buffer after every merge. Callers rely on re-derivation over a
/// longer buffer reproducing earlier turns unchanged, so segmentation must
/// stay a pure forward pass with no lookahead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    /// 1-based, sequential
    pub index: usize,
    /// Anchor reasoning rendered as text; empty for an implicit leading turn
    pub reasoning_text: String,
    /// Timestamp of the anchor (or of the first action, when implicit)
    pub timestamp: i64,
    pub actions: Vec<Action>,
}

/// Partition an ordered action log into turns.
///
/// Each reasoning action closes the current turn and opens the next one.
/// Actions that arrive before any reasoning are collected into an implicit
/// turn 1 with empty reasoning text. Every action lands in exactly one turn.
pub fn segment_turns(actions: &[Action]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();
    let mut current: Option<Turn> = None;

    for action in actions {
        match &action.payload {
            ActionPayload::Reasoning(text) => {
                if let Some(turn) = current.take() {
                    turns.push(turn);
                }
                current = Some(Turn {
                    index: turns.len() + 1,
                    reasoning_text: text.render(),
                    timestamp: action.timestamp,
                    actions: Vec::new(),
                });
            }
            _ => {
                let turn = current.get_or_insert_with(|| Turn {
                    index: turns.len() + 1,
                    reasoning_text: String::new(),
                    timestamp: action.timestamp,
                    actions: Vec::new(),
                });
                turn.actions.push(action.clone());
            }
        }
    }

    if let Some(turn) = current.take() {
        turns.push(turn);
    }

    turns
}
