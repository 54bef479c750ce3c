//! Lifecycle event kinds and payloads.
//!
//! An incoming assistant callback is parsed once into a [`HookEvent`] and passed
//! by reference through the whole dispatch. The typed accessors (`command()`,
//! `file_path()`) serve the matching rules; the original JSON object is kept
//! verbatim in `raw` and is what hook processes receive on their stdin.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::WireError;

/// Lifecycle event kind - a named moment in the assistant's action cycle
///
/// The set is closed on the dispatcher side; event names outside this set are
/// ignored (the dispatch is a no-op), never an error.
///
/// # Examples
///
/// ```
/// use hookwire::event::EventKind;
///
/// assert_eq!(EventKind::from_name("PreToolUse"), Some(EventKind::PreToolUse));
/// assert_eq!(EventKind::from_name("SomethingElse"), None);
/// ```
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum EventKind {
    /// Before a tool is invoked
    PreToolUse,
    /// After a tool completes
    PostToolUse,
    /// When the session stops
    Stop,
    /// Before a file write
    PreWrite,
    /// After a file write
    PostWrite,
}

impl EventKind {
    /// Parse an event name as sent by the host (`hook_event_name` field)
    ///
    /// Returns `None` for unrecognized names - callers treat those as
    /// "no hooks to run", not as failures.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PreToolUse" => Some(Self::PreToolUse),
            "PostToolUse" => Some(Self::PostToolUse),
            "Stop" => Some(Self::Stop),
            "PreWrite" => Some(Self::PreWrite),
            "PostWrite" => Some(Self::PostWrite),
            _ => None,
        }
    }

    /// The wire name of this event kind (matches `hook_event_name`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreToolUse => "PreToolUse",
            Self::PostToolUse => "PostToolUse",
            Self::Stop => "Stop",
            Self::PreWrite => "PreWrite",
            Self::PostWrite => "PostWrite",
        }
    }

    /// The key under which this event is configured in the hooks file
    pub fn config_key(&self) -> &'static str {
        match self {
            Self::PreToolUse => "preToolUse",
            Self::PostToolUse => "postToolUse",
            Self::Stop => "stop",
            Self::PreWrite => "preWrite",
            Self::PostWrite => "postWrite",
        }
    }

    /// Whether this kind carries a tool name and tool input
    pub fn is_tool_event(&self) -> bool {
        matches!(self, Self::PreToolUse | Self::PostToolUse)
    }

    /// Whether this kind targets a file path
    pub fn is_write_event(&self) -> bool {
        matches!(self, Self::PreWrite | Self::PostWrite)
    }
}

/// A single incoming lifecycle event
///
/// Immutable once constructed. Created once per assistant callback and passed
/// by reference through dispatch; the `raw` field is the original payload and
/// is forwarded to hook processes unmodified.
///
/// # Examples
///
/// ```
/// use hookwire::event::{EventKind, HookEvent};
/// use serde_json::json;
///
/// let event = HookEvent::tool_use(
///     EventKind::PreToolUse,
///     "session-1",
///     "Bash",
///     json!({"command": "npm install left-pad"}),
/// );
///
/// assert_eq!(event.command(), Some("npm install left-pad"));
/// assert_eq!(event.tool_name, "Bash");
/// ```
#[derive(Debug, Clone)]
pub struct HookEvent {
    /// Which lifecycle moment this event represents
    pub kind: EventKind,
    /// Identifier of the assistant session that produced the event
    pub session_id: String,
    /// Name of the tool involved; empty for non-tool events
    pub tool_name: String,
    /// Free-form tool input; conventionally carries `command` and/or `file_path`
    pub tool_input: Value,
    /// Tool response payload, present for post-tool events
    pub tool_response: Option<Value>,
    /// The payload as received, forwarded verbatim to hook processes
    raw: Value,
}

impl HookEvent {
    /// Parse a host payload into an event
    ///
    /// Returns `Ok(None)` when `hook_event_name` names an event kind this
    /// dispatcher does not recognize - the caller should treat that as a
    /// successful no-op dispatch.
    ///
    /// # Errors
    ///
    /// - [`WireError::EventParse`] if the payload is not a JSON object or
    ///   has no `hook_event_name` string
    pub fn from_json(raw: Value) -> Result<Option<Self>, WireError> {
        let obj = raw.as_object().ok_or_else(|| WireError::EventParse {
            reason: "expected a JSON object".to_string(),
        })?;

        let name = obj
            .get("hook_event_name")
            .and_then(Value::as_str)
            .ok_or_else(|| WireError::EventParse {
                reason: "missing 'hook_event_name' string".to_string(),
            })?;

        let Some(kind) = EventKind::from_name(name) else {
            return Ok(None);
        };

        let session_id = obj
            .get("session_id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let tool_name = obj
            .get("tool_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let tool_input = obj
            .get("tool_input")
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let tool_response = obj.get("tool_response").cloned();

        Ok(Some(Self {
            kind,
            session_id,
            tool_name,
            tool_input,
            tool_response,
            raw,
        }))
    }

    /// Create an event for a tool-use lifecycle moment
    pub fn tool_use(
        kind: EventKind,
        session_id: impl Into<String>,
        tool_name: impl Into<String>,
        tool_input: Value,
    ) -> Self {
        let session_id = session_id.into();
        let tool_name = tool_name.into();
        let raw = json!({
            "session_id": session_id.clone(),
            "hook_event_name": kind.as_str(),
            "tool_name": tool_name.clone(),
            "tool_input": tool_input.clone(),
        });
        Self {
            kind,
            session_id,
            tool_name,
            tool_input,
            tool_response: None,
            raw,
        }
    }

    /// Create an event for a file-write lifecycle moment
    pub fn write(
        kind: EventKind,
        session_id: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        let session_id = session_id.into();
        let file_path = file_path.into();
        let tool_input = json!({ "file_path": file_path });
        let raw = json!({
            "session_id": session_id.clone(),
            "hook_event_name": kind.as_str(),
            "tool_name": "",
            "tool_input": tool_input.clone(),
        });
        Self {
            kind,
            session_id,
            tool_name: String::new(),
            tool_input,
            tool_response: None,
            raw,
        }
    }

    /// Create a session-stop event
    pub fn stop(session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        let raw = json!({
            "session_id": session_id.clone(),
            "hook_event_name": EventKind::Stop.as_str(),
        });
        Self {
            kind: EventKind::Stop,
            session_id,
            tool_name: String::new(),
            tool_input: Value::Object(Map::new()),
            tool_response: None,
            raw,
        }
    }

    /// The `command` string inside `tool_input`, if present
    pub fn command(&self) -> Option<&str> {
        self.tool_input.get("command").and_then(Value::as_str)
    }

    /// The `file_path` string inside `tool_input`, if present
    pub fn file_path(&self) -> Option<&str> {
        self.tool_input.get("file_path").and_then(Value::as_str)
    }

    /// The payload exactly as received, for forwarding to hook processes
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_round_trip_names() {
        for kind in [
            EventKind::PreToolUse,
            EventKind::PostToolUse,
            EventKind::Stop,
            EventKind::PreWrite,
            EventKind::PostWrite,
        ] {
            assert_eq!(EventKind::from_name(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_event_kind_unrecognized() {
        assert_eq!(EventKind::from_name("UserPromptSubmit"), None);
        assert_eq!(EventKind::from_name(""), None);
    }

    #[test]
    fn test_from_json_tool_event() {
        let raw = json!({
            "session_id": "s-1",
            "hook_event_name": "PreToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "ls"},
        });
        let event = HookEvent::from_json(raw.clone()).unwrap().unwrap();

        assert_eq!(event.kind, EventKind::PreToolUse);
        assert_eq!(event.session_id, "s-1");
        assert_eq!(event.tool_name, "Bash");
        assert_eq!(event.command(), Some("ls"));
        assert_eq!(event.raw(), &raw);
    }

    #[test]
    fn test_from_json_post_tool_response() {
        let raw = json!({
            "session_id": "s-1",
            "hook_event_name": "PostToolUse",
            "tool_name": "Bash",
            "tool_input": {"command": "ls"},
            "tool_response": {"output": "file.txt"},
        });
        let event = HookEvent::from_json(raw).unwrap().unwrap();

        assert_eq!(event.kind, EventKind::PostToolUse);
        assert!(event.tool_response.is_some());
    }

    #[test]
    fn test_from_json_unrecognized_kind_is_none() {
        let raw = json!({
            "session_id": "s-1",
            "hook_event_name": "Notification",
        });
        assert!(HookEvent::from_json(raw).unwrap().is_none());
    }

    #[test]
    fn test_from_json_not_an_object() {
        let err = HookEvent::from_json(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, WireError::EventParse { .. }));
    }

    #[test]
    fn test_from_json_missing_event_name() {
        let err = HookEvent::from_json(json!({"session_id": "s-1"})).unwrap_err();
        assert!(matches!(err, WireError::EventParse { .. }));
    }

    #[test]
    fn test_write_event_file_path() {
        let event = HookEvent::write(EventKind::PreWrite, "s-1", "src/lib.rs");
        assert_eq!(event.file_path(), Some("src/lib.rs"));
        assert_eq!(event.tool_name, "");
        assert!(event.kind.is_write_event());
    }

    #[test]
    fn test_stop_event_has_no_tool() {
        let event = HookEvent::stop("s-1");
        assert_eq!(event.kind, EventKind::Stop);
        assert_eq!(event.command(), None);
        assert_eq!(event.file_path(), None);
    }

    #[test]
    fn test_raw_is_forwardable() {
        let event = HookEvent::tool_use(
            EventKind::PreToolUse,
            "s-1",
            "Bash",
            json!({"command": "npm install left-pad"}),
        );
        let raw = event.raw();
        assert_eq!(raw["hook_event_name"], "PreToolUse");
        assert_eq!(raw["tool_input"]["command"], "npm install left-pad");
    }

    #[test]
    fn test_config_keys() {
        assert_eq!(EventKind::PreToolUse.config_key(), "preToolUse");
        assert_eq!(EventKind::Stop.config_key(), "stop");
        assert_eq!(EventKind::PostWrite.config_key(), "postWrite");
    }
}
