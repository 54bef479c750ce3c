//! Hook process execution
//!
//! This module runs a single named hook as a child process:
//!
//! - [`HookResolver`] locates the hook's executable by probing an ordered
//!   list of directories.
//! - [`ProcessHookRunner`] spawns the executable, forwards the event payload
//!   on stdin, tees stdout/stderr live while capturing them, and enforces a
//!   wall-clock timeout.
//! - [`HookInvocation`] is the structured completion record.
//!
//! # The Executor Seam
//!
//! The dispatcher depends on the [`HookExecutor`] trait rather than on the
//! process runner directly, so tests can drive dispatch with a stub executor
//! and never touch the filesystem or spawn processes.
//!
//! # Failure Policy
//!
//! A hook that exits non-zero is a normal completion, not an error. Only
//! spawn-time failures are errors internally, and even those are converted
//! into `SpawnError` records so one broken hook never aborts the dispatch
//! of the hooks after it.

use std::time::Duration;

use async_trait::async_trait;

use crate::event::HookEvent;

mod process;
mod record;
mod resolve;

pub use process::ProcessHookRunner;
pub use record::{HookInvocation, InvocationStatus};
pub use resolve::HookResolver;

/// Default wall-clock timeout for a single hook invocation (five minutes)
pub const DEFAULT_HOOK_TIMEOUT: Duration = Duration::from_secs(300);

/// Abstract hook execution.
///
/// The default implementation ([`ProcessHookRunner`]) spawns a child process,
/// but this trait enables substitutes (in-memory stubs for dispatcher tests,
/// remote execution).
///
/// Implementations never fail: every outcome, including "the hook does not
/// exist" and "the process could not be started", is reported through the
/// returned [`HookInvocation`] record.
#[async_trait]
pub trait HookExecutor: Send + Sync {
    /// Run one hook to completion and report what happened
    ///
    /// # Arguments
    ///
    /// * `hook_name` - Name of the hook to resolve and execute
    /// * `event` - The lifecycle event; its raw JSON is the child's stdin
    /// * `timeout` - Wall-clock budget before the process is killed
    async fn run(&self, hook_name: &str, event: &HookEvent, timeout: Duration) -> HookInvocation;
}
