//! Hook configuration model and loading
//!
//! The configuration is a declarative JSON document mapping lifecycle events
//! to hook names. It is parsed with a schema, never evaluated as code. Each
//! event key accepts either a flat ordered list of hook names or a nested
//! shape appropriate to the event:
//!
//! ```json
//! {
//!   "preToolUse": {
//!     "Bash": { "^(npm\\s+install)\\s+": ["check-package-age"] },
//!     "Read|Write|Edit": { "*": ["audit-file-access"] }
//!   },
//!   "postToolUse": { "Bash": ["scan-output"] },
//!   "stop": ["final-report"],
//!   "preWrite": { "\\.rs$": ["check-rust-style"] },
//!   "postWrite": ["reindex"]
//! }
//! ```
//!
//! Map ordering is significant: matchers, patterns, and hook lists run in the
//! order they are written, so the maps are `IndexMap`s that preserve document
//! order through deserialization.
//!
//! Loading is handled by [`ConfigLoader`], which re-reads the file on every
//! dispatch (edits take effect without restarting the host) and degrades to
//! the empty configuration when no file exists or parsing fails.

use indexmap::IndexMap;
use serde::Deserialize;

mod loader;

pub use loader::ConfigLoader;

/// Ordered map from matcher expression to per-pattern hook lists
pub type MatcherRules = IndexMap<String, IndexMap<String, Vec<String>>>;

/// Rules for the pre-tool-use event
///
/// Either a flat list (run unconditionally) or matcher expression →
/// pattern expression → ordered hook names.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PreToolRules {
    /// Hooks run for every pre-tool-use event
    List(Vec<String>),
    /// Matcher expression → pattern expression → hook names
    Matchers(MatcherRules),
}

/// Rules for the post-tool-use event
///
/// Either a flat list or matcher expression → ordered hook names. Post-tool
/// rules have no pattern layer; the tool has already run.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PostToolRules {
    /// Hooks run for every post-tool-use event
    List(Vec<String>),
    /// Matcher expression → hook names
    Matchers(IndexMap<String, Vec<String>>),
}

/// Rules for the file-write events
///
/// Either a flat list or pattern expression → ordered hook names. The
/// patterns are tested against the event's `file_path` and are always
/// compiled as regex - there is no wildcard shorthand in this context.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum WriteRules {
    /// Hooks run for every write event
    List(Vec<String>),
    /// Pattern expression → hook names
    Patterns(IndexMap<String, Vec<String>>),
}

/// The full hook configuration for all lifecycle events
///
/// Every key is optional; an absent key means zero hooks for that event. The
/// empty configuration (all keys absent) is the well-defined degraded state
/// used when no configuration file exists or loading fails.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct HookConfig {
    /// Hooks consulted before a tool runs
    pub pre_tool_use: Option<PreToolRules>,
    /// Hooks consulted after a tool runs
    pub post_tool_use: Option<PostToolRules>,
    /// Hooks consulted on session stop
    pub stop: Option<Vec<String>>,
    /// Hooks consulted before a file write
    pub pre_write: Option<WriteRules>,
    /// Hooks consulted after a file write
    pub post_write: Option<WriteRules>,
}

impl HookConfig {
    /// The configuration with zero hooks for every event
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no event has any hooks configured
    pub fn is_empty(&self) -> bool {
        self.pre_tool_use.is_none()
            && self.post_tool_use.is_none()
            && self.stop.is_none()
            && self.pre_write.is_none()
            && self.post_write.is_none()
    }
}
