//! Per-invocation execution records.

use serde::Serialize;
use uuid::Uuid;

/// Terminal state of one hook invocation
///
/// An invocation moves `Pending → Running` and ends in exactly one of these
/// states. There are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStatus {
    /// The process ran and exited on its own
    Completed,
    /// The process was killed after exceeding its wall-clock timeout
    TimedOut,
    /// No executable with the hook's name exists in any search directory
    NotFound,
    /// The executable exists but could not be launched
    SpawnError,
}

/// Record of a single hook execution
///
/// Created when the runner resolves a hook and finalized when the process
/// exits, times out, or fails to start. Records live only for the current
/// dispatch unless the caller explicitly logs them; they serialize to JSON
/// for the invocation log.
///
/// # Examples
///
/// ```
/// use hookwire::runner::{HookInvocation, InvocationStatus};
///
/// let record = HookInvocation::not_found("lint-check", vec![]);
/// assert_eq!(record.status, InvocationStatus::NotFound);
/// assert_eq!(record.exit_code, None);
/// assert!(!record.ran());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct HookInvocation {
    /// Unique id for this invocation
    pub id: Uuid,
    /// Name of the hook that was invoked
    pub hook_name: String,
    /// How the invocation ended
    pub status: InvocationStatus,
    /// Exit code; `None` until the process exits, and permanently `None`
    /// for timed-out, not-found, and spawn-failed invocations
    pub exit_code: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
    /// Wall-clock duration of the invocation in milliseconds
    pub duration_ms: u64,
}

impl HookInvocation {
    /// Record for a hook whose executable was not found
    ///
    /// The searched directories are listed in the record's stderr so the
    /// failure is explainable from logs alone.
    pub fn not_found(hook_name: impl Into<String>, searched: Vec<String>) -> Self {
        let hook_name = hook_name.into();
        let stderr = if searched.is_empty() {
            format!("hook '{hook_name}' not found: no search directories configured")
        } else {
            format!(
                "hook '{hook_name}' not found in: {}",
                searched.join(", ")
            )
        };
        Self {
            id: Uuid::new_v4(),
            hook_name,
            status: InvocationStatus::NotFound,
            exit_code: None,
            stdout: String::new(),
            stderr,
            duration_ms: 0,
        }
    }

    /// Record for a hook whose process could not be spawned
    pub fn spawn_error(hook_name: impl Into<String>, error: impl std::fmt::Display) -> Self {
        let hook_name = hook_name.into();
        Self {
            id: Uuid::new_v4(),
            hook_name,
            status: InvocationStatus::SpawnError,
            exit_code: None,
            stdout: String::new(),
            stderr: format!("failed to spawn hook: {error}"),
            duration_ms: 0,
        }
    }

    /// Whether the hook's process actually ran to completion
    pub fn ran(&self) -> bool {
        self.status == InvocationStatus::Completed
    }
}
