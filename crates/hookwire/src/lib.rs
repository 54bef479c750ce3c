//! Hookwire - lifecycle hook dispatcher for AI coding assistants
//!
//! Hookwire maps assistant lifecycle events (before/after a tool runs,
//! before/after a file write, session stop) to named validation scripts. It
//! loads a small declarative configuration, matches incoming events against
//! tool-name and regex patterns, shells out to the matching scripts with the
//! event payload on their stdin, and interprets exit codes and structured
//! output to decide whether the assistant's action should be blocked.
//!
//! # Overview
//!
//! One dispatch runs like this:
//!
//! 1. The host writes the event JSON to the `hookwire` binary's stdin.
//! 2. The configuration file is re-read (hot reload - no caching).
//! 3. Matching rules resolve an ordered list of hook names.
//! 4. Each hook runs sequentially as a child process with a timeout; its
//!    output streams live while being captured.
//! 5. Each result is interpreted: structured JSON output or the exit code
//!    decides block/continue. The first blocking hook wins and the
//!    remaining hooks are skipped.
//! 6. The binary exits 0 (proceed), 2 (blocked, reason on stderr), or 1
//!    (dispatcher failure).
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//! - `event`: lifecycle event kinds and typed payloads
//! - `matcher`: pure tool-name and regex pattern predicates
//! - `config`: configuration model and hot-reloading loader
//! - `runner`: hook resolution and child-process execution
//! - `outcome`: the hook output contract and result interpretation
//! - `dispatch`: orchestration and the first-block-wins decision
//! - `invocation_log`: optional append-only JSONL record log
//! - `error`: error types and handling
//!
//! # Example
//!
//! ```rust,no_run
//! use hookwire::prelude::*;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let event = HookEvent::tool_use(
//!         EventKind::PreToolUse,
//!         "session-1",
//!         "Bash",
//!         json!({"command": "npm install left-pad"}),
//!     );
//!
//!     let dispatcher = Dispatcher::new();
//!     let result = dispatcher.dispatch(&event).await;
//!
//!     if result.blocked {
//!         eprintln!("{}", result.reason.unwrap_or_default());
//!         std::process::exit(2);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Lifecycle event kinds and payloads
///
/// An incoming assistant callback becomes a `HookEvent`: a typed view for
/// the matching rules plus the original JSON kept verbatim for forwarding
/// to hook processes.
pub mod event;

/// Tool and pattern matching
///
/// Pure predicates: `matches_tool` for `|`-separated tool-name matcher
/// expressions (with the `*` wildcard), `matches_pattern` for regex
/// patterns tested against command strings and file paths.
pub mod matcher;

/// Hook configuration model and loading
///
/// A declarative JSON mapping of event → matcher → pattern → hook names,
/// re-read on every dispatch. Missing or malformed files degrade to the
/// empty configuration.
pub mod config;

/// Hook process execution
///
/// `HookResolver` locates hook executables in ordered search directories;
/// `ProcessHookRunner` spawns them with the event payload on stdin, a
/// wall-clock timeout, and live output tee-ing. The `HookExecutor` trait is
/// the seam for substituting executors in tests.
pub mod runner;

/// Hook output contract and result interpretation
///
/// Structured JSON output (`continue`, `decision`, `reason`,
/// `suppressOutput`) or plain exit codes (0 pass, 2 block, other = error)
/// become an `Interpretation` of block/continue.
pub mod outcome;

/// Event dispatch
///
/// The `Dispatcher` resolves hook names for an event, runs them
/// sequentially, and aggregates the first-block-wins decision.
pub mod dispatch;

/// Append-only invocation logging
///
/// Optional JSONL log of invocation records, safe for interleaved appends
/// from concurrent dispatcher processes.
pub mod invocation_log;

/// Error types and utilities
///
/// This module defines the `WireError` enum covering the fatal and
/// internally-recovered error cases:
///
/// - `EventParse` - the incoming payload is not a usable JSON object
/// - `ConfigParse` - a configuration file exists but does not parse
/// - `Spawn` - a hook executable exists but could not be launched
/// - `JsonDecode` - JSON parsing errors (auto-converts from `serde_json::Error`)
/// - `Io` - filesystem and I/O operations (auto-converts from `std::io::Error`)
pub mod error;

// Prelude module for common imports
pub mod prelude {
    //! Common imports for hookwire users
    //!
    //! Use `use hookwire::prelude::*;` to import commonly used types.

    pub use crate::config::{ConfigLoader, HookConfig};
    pub use crate::dispatch::{DispatchResult, Dispatcher};
    pub use crate::error::WireError;
    pub use crate::event::{EventKind, HookEvent};
    pub use crate::invocation_log::InvocationLog;
    pub use crate::outcome::{interpret, HookOutput, Interpretation};
    pub use crate::runner::{
        HookExecutor, HookInvocation, HookResolver, InvocationStatus, ProcessHookRunner,
        DEFAULT_HOOK_TIMEOUT,
    };
}
