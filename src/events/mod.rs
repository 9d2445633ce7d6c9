//! Inbound host events
//!
//! The host emits `{ "type": ..., "properties": { ... } }` objects. Only the
//! kinds below are acted on; everything else is ignored explicitly in
//! [`Event::from_raw`].
//!
//! Tool invocations (`{ "tool", "sessionID", "callID" }`) arrive separately,
//! from the host's before-tool-execution hook.

pub mod hook_input;
pub mod stream;

use serde::Deserialize;
use serde_json::Value;

/// Event type names on the wire
pub const SESSION_IDLE: &str = "session.idle";
pub const SESSION_ERROR: &str = "session.error";
pub const PERMISSION_UPDATED: &str = "permission.updated";
pub const QUESTION_ASKED: &str = "question.asked";

/// Tool name that marks a direct question to the user
pub const QUESTION_TOOL: &str = "question";

/// Untyped event as received from the host
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Value,
}

/// Events the engine acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SessionIdle {
        session_id: String,
    },
    SessionError {
        session_id: String,
        error: Option<String>,
    },
    PermissionUpdated,
    QuestionAsked,
}

impl Event {
    /// Map a raw event to a known kind. Unknown kinds, and idle/error events
    /// without a session id, yield `None`.
    pub fn from_raw(raw: &RawEvent) -> Option<Self> {
        match raw.kind.as_str() {
            SESSION_IDLE => Some(Event::SessionIdle {
                session_id: session_id_of(&raw.properties)?,
            }),
            SESSION_ERROR => Some(Event::SessionError {
                session_id: session_id_of(&raw.properties)?,
                error: raw.properties.get("error").and_then(error_to_string),
            }),
            PERMISSION_UPDATED => Some(Event::PermissionUpdated),
            QUESTION_ASKED => Some(Event::QuestionAsked),
            _ => None,
        }
    }

    /// Parse a JSON event payload
    pub fn parse(json: &str) -> Option<Self> {
        let raw: RawEvent = serde_json::from_str(json).ok()?;
        Self::from_raw(&raw)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Event::SessionIdle { .. } => SESSION_IDLE,
            Event::SessionError { .. } => SESSION_ERROR,
            Event::PermissionUpdated => PERMISSION_UPDATED,
            Event::QuestionAsked => QUESTION_ASKED,
        }
    }
}

fn session_id_of(properties: &Value) -> Option<String> {
    properties
        .get("sessionID")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Input to the before-tool-execution hook
#[derive(Debug, Clone, Deserialize)]
pub struct ToolInvocation {
    pub tool: String,
    #[serde(default, rename = "sessionID")]
    pub session_id: Option<String>,
    #[serde(default, rename = "callID")]
    pub call_id: Option<String>,
}

impl ToolInvocation {
    pub fn is_question(&self) -> bool {
        self.tool == QUESTION_TOOL
    }
}

/// Anything the `hook` entry point may receive
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HookPayload {
    Event(RawEvent),
    Tool(ToolInvocation),
}

/// Normalize an error payload to display text.
///
/// Strings pass through; objects yield their `data.message` or `message`
/// when present, otherwise compact JSON. `null` and `false` mean no error.
pub fn error_to_string(error: &Value) -> Option<String> {
    match error {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => {
            let message = obj
                .get("data")
                .and_then(|d| d.get("message"))
                .or_else(|| obj.get("message"))
                .and_then(|m| m.as_str());
            match message {
                Some(m) => Some(m.to_string()),
                None => Some(error.to_string()),
            }
        }
        other => Some(other.to_string()),
    }
}
