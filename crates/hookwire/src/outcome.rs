//! Hook output contract and result interpretation.
//!
//! A hook communicates its verdict two ways:
//!
//! - **Structured**: printing a JSON object as the last thing on stdout,
//!   with the fields of [`HookOutput`]. `continue: false` or
//!   `decision: "block"` vetoes the assistant action.
//! - **Plain**: exit code alone. `0` passes, `2` is a deliberate block,
//!   anything else is an execution error that does NOT block.
//!
//! The asymmetry is deliberate: a hook that crashes must not silently halt
//! the session; only explicit block signals do.

use serde::Deserialize;
use tracing::debug;

use crate::runner::HookInvocation;

fn default_true() -> bool {
    true
}

/// Explicit decision field of the structured output contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Let the assistant action proceed
    Approve,
    /// Veto the assistant action
    Block,
}

/// Structured result a hook may print as the last JSON object on its stdout
///
/// All fields are optional on the wire; unknown fields are ignored so the
/// contract can grow without breaking older dispatchers.
///
/// # Examples
///
/// ```
/// use hookwire::outcome::{Decision, HookOutput};
///
/// let output: HookOutput =
///     serde_json::from_str(r#"{"continue": false, "reason": "nope"}"#).unwrap();
/// assert!(!output.should_continue);
/// assert_eq!(output.reason.as_deref(), Some("nope"));
///
/// let output: HookOutput = serde_json::from_str(r#"{"decision": "block"}"#).unwrap();
/// assert_eq!(output.decision, Some(Decision::Block));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookOutput {
    /// Whether the lifecycle event should proceed; defaults to true
    #[serde(rename = "continue", default = "default_true")]
    pub should_continue: bool,
    /// Reason shown when `continue` is false
    #[serde(default)]
    pub stop_reason: Option<String>,
    /// Explicit approve/block decision
    #[serde(default)]
    pub decision: Option<Decision>,
    /// Reason accompanying the decision
    #[serde(default)]
    pub reason: Option<String>,
    /// Suppress the re-printed structured summary (live output already streamed)
    #[serde(default)]
    pub suppress_output: bool,
}

impl HookOutput {
    /// Whether this structured result vetoes the assistant action
    pub fn blocks(&self) -> bool {
        !self.should_continue || self.decision == Some(Decision::Block)
    }

    /// The human-readable block reason, preferring `reason` over `stopReason`
    pub fn block_reason(&self) -> Option<&str> {
        self.reason.as_deref().or(self.stop_reason.as_deref())
    }
}

/// The interpreted outcome of one hook invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// Whether this hook vetoes the lifecycle event
    pub blocked: bool,
    /// Human-readable reason, present when blocked
    pub reason: Option<String>,
    /// Whether a final structured summary should be shown to the user
    pub display: bool,
    /// Whether the invocation failed without deliberately blocking
    /// (timeout, not-found, spawn failure, or a non-zero, non-2 exit)
    pub errored: bool,
}

/// Extract the structured result from captured stdout, if there is one
///
/// Recognition rule: the whole trimmed output parsing as a JSON object wins;
/// failing that, the last non-empty line is tried. Anything else is plain
/// text to be relayed unmodified.
pub fn structured_output(stdout: &str) -> Option<HookOutput> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(output) = serde_json::from_str::<HookOutput>(trimmed) {
        return Some(output);
    }
    trimmed
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .and_then(|line| serde_json::from_str(line.trim()).ok())
}

/// Interpret one invocation record into a block/continue decision
///
/// - No exit code (timeout, not-found, spawn failure): non-blocking error.
/// - Structured stdout: the [`HookOutput`] contract governs.
/// - Plain stdout: exit 0 passes, exit 2 blocks, anything else is a
///   non-blocking error.
pub fn interpret(record: &HookInvocation) -> Interpretation {
    let Some(exit_code) = record.exit_code else {
        debug!(
            "Hook '{}' ended without an exit code ({:?}); not blocking",
            record.hook_name, record.status
        );
        return Interpretation {
            blocked: false,
            reason: None,
            display: true,
            errored: true,
        };
    };

    if let Some(output) = structured_output(&record.stdout) {
        let blocked = output.blocks();
        let reason = if blocked {
            Some(
                output
                    .block_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| generic_block_reason(&record.hook_name)),
            )
        } else {
            None
        };
        return Interpretation {
            blocked,
            reason,
            display: !output.suppress_output,
            errored: false,
        };
    }

    match exit_code {
        0 => Interpretation {
            blocked: false,
            reason: None,
            display: true,
            errored: false,
        },
        2 => Interpretation {
            blocked: true,
            reason: Some(generic_block_reason(&record.hook_name)),
            display: true,
            errored: false,
        },
        code => {
            debug!(
                "Hook '{}' exited with code {}; logged as execution error, not a block",
                record.hook_name, code
            );
            Interpretation {
                blocked: false,
                reason: None,
                display: true,
                errored: true,
            }
        }
    }
}

fn generic_block_reason(hook_name: &str) -> String {
    format!("Hook '{hook_name}' requested block")
}
