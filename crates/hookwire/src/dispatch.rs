//! Event dispatch: from lifecycle event to aggregated decision.
//!
//! The [`Dispatcher`] is the orchestration layer. For each incoming event it
//! re-loads the configuration, resolves the ordered hook-name list through
//! the matching rules, runs each hook sequentially through a
//! [`HookExecutor`], and interprets every record as it completes. The first
//! hook whose interpretation is "block" wins: its reason becomes the
//! dispatch reason and the remaining hooks are not run.
//!
//! Hooks within one dispatch never run concurrently - later hooks may depend
//! on the side effects of earlier ones, and output must stay attributable
//! and ordered.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::{ConfigLoader, HookConfig, PostToolRules, PreToolRules, WriteRules};
use crate::event::{EventKind, HookEvent};
use crate::invocation_log::InvocationLog;
use crate::matcher::{matches_pattern, matches_tool, WILDCARD};
use crate::outcome::interpret;
use crate::runner::{
    HookExecutor, HookInvocation, HookResolver, ProcessHookRunner, DEFAULT_HOOK_TIMEOUT,
};

/// Aggregated outcome of one dispatch
///
/// Exactly one winning decision per dispatched event: the first blocking
/// hook, or pass-through when none block.
#[derive(Debug)]
pub struct DispatchResult {
    /// Whether any hook vetoed the lifecycle event
    pub blocked: bool,
    /// The winning hook's reason, present when blocked
    pub reason: Option<String>,
    /// Records for every hook that was invoked, in execution order
    pub ran_hooks: Vec<HookInvocation>,
}

impl DispatchResult {
    fn pass_through() -> Self {
        Self {
            blocked: false,
            reason: None,
            ran_hooks: Vec::new(),
        }
    }
}

/// Runs the configured hooks for incoming lifecycle events
///
/// # Example
///
/// ```no_run
/// use hookwire::config::ConfigLoader;
/// use hookwire::dispatch::Dispatcher;
/// use hookwire::event::{EventKind, HookEvent};
/// use serde_json::json;
///
/// # async fn example() {
/// let dispatcher = Dispatcher::new();
/// let event = HookEvent::tool_use(
///     EventKind::PreToolUse,
///     "session-1",
///     "Bash",
///     json!({"command": "npm install left-pad"}),
/// );
///
/// let result = dispatcher.dispatch(&event).await;
/// if result.blocked {
///     eprintln!("{}", result.reason.unwrap_or_default());
/// }
/// # }
/// ```
pub struct Dispatcher {
    loader: ConfigLoader,
    executor: Arc<dyn HookExecutor>,
    timeout: Duration,
    invocation_log: Option<InvocationLog>,
}

impl Dispatcher {
    /// Create a dispatcher with default configuration candidates, the
    /// process-based runner, and the default five-minute hook timeout
    pub fn new() -> Self {
        Self {
            loader: ConfigLoader::default(),
            executor: Arc::new(ProcessHookRunner::new(HookResolver::default())),
            timeout: DEFAULT_HOOK_TIMEOUT,
            invocation_log: None,
        }
    }

    /// Use an explicit configuration loader
    pub fn with_loader(mut self, loader: ConfigLoader) -> Self {
        self.loader = loader;
        self
    }

    /// Use an explicit hook executor (e.g. a stub in tests)
    pub fn with_executor(mut self, executor: Arc<dyn HookExecutor>) -> Self {
        self.executor = executor;
        self
    }

    /// Override the per-hook wall-clock timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach an append-only invocation log
    pub fn with_invocation_log(mut self, log: InvocationLog) -> Self {
        self.invocation_log = Some(log);
        self
    }

    /// Run all hooks configured for one lifecycle event
    ///
    /// The configuration is re-read from disk on every call, so edits take
    /// effect without restarting the host process.
    pub async fn dispatch(&self, event: &HookEvent) -> DispatchResult {
        let config = self.loader.load();
        let names = resolve_hook_names(&config, event);

        if names.is_empty() {
            debug!("No hooks configured for {}", event.kind.as_str());
            return DispatchResult::pass_through();
        }

        debug!(
            "Dispatching {} to {} hook(s): {:?}",
            event.kind.as_str(),
            names.len(),
            names
        );

        let mut result = DispatchResult::pass_through();
        for name in names {
            let record = self.executor.run(&name, event, self.timeout).await;
            let interpretation = interpret(&record);

            if let Some(log) = &self.invocation_log {
                if let Err(e) = log.append(&record) {
                    warn!("Failed to append invocation log: {e}");
                }
            }
            if interpretation.errored {
                warn!(
                    "Hook '{}' failed ({:?}, exit {:?}); continuing",
                    record.hook_name, record.status, record.exit_code
                );
            }
            if !interpretation.display {
                debug!("Hook '{}' suppressed its structured summary", record.hook_name);
            }

            result.ran_hooks.push(record);

            if interpretation.blocked {
                result.blocked = true;
                result.reason = interpretation.reason;
                break;
            }
        }

        result
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the ordered hook-name list for an event
///
/// Order is the hard contract here: matcher and pattern keys iterate in
/// declaration order, hook lists in list order, and duplicates are kept - a
/// hook selected by two rules legitimately runs twice.
pub fn resolve_hook_names(config: &HookConfig, event: &HookEvent) -> Vec<String> {
    match event.kind {
        EventKind::PreToolUse => match &config.pre_tool_use {
            None => Vec::new(),
            Some(PreToolRules::List(list)) => list.clone(),
            Some(PreToolRules::Matchers(matchers)) => {
                let mut names = Vec::new();
                for (matcher_expr, patterns) in matchers {
                    if !matches_tool(&event.tool_name, matcher_expr) {
                        continue;
                    }
                    for (pattern_expr, hooks) in patterns {
                        if pre_tool_pattern_applies(event, pattern_expr) {
                            names.extend(hooks.iter().cloned());
                        }
                    }
                }
                names
            }
        },
        EventKind::PostToolUse => match &config.post_tool_use {
            None => Vec::new(),
            Some(PostToolRules::List(list)) => list.clone(),
            Some(PostToolRules::Matchers(matchers)) => matchers
                .iter()
                .filter(|(matcher_expr, _)| matches_tool(&event.tool_name, matcher_expr))
                .flat_map(|(_, hooks)| hooks.iter().cloned())
                .collect(),
        },
        EventKind::Stop => config.stop.clone().unwrap_or_default(),
        EventKind::PreWrite => resolve_write_hooks(&config.pre_write, event),
        EventKind::PostWrite => resolve_write_hooks(&config.post_write, event),
    }
}

/// Pattern rule for pre-tool events
///
/// The wildcard always applies and is never compiled. Other patterns are
/// tested against the `command` field; a tool event that carries no command
/// is selected only by the wildcard.
fn pre_tool_pattern_applies(event: &HookEvent, pattern_expr: &str) -> bool {
    if pattern_expr == WILDCARD {
        return true;
    }
    match event.command() {
        Some(command) => matches_pattern(command, pattern_expr),
        None => false,
    }
}

fn resolve_write_hooks(rules: &Option<WriteRules>, event: &HookEvent) -> Vec<String> {
    match rules {
        None => Vec::new(),
        Some(WriteRules::List(list)) => list.clone(),
        Some(WriteRules::Patterns(patterns)) => {
            let Some(path) = event.file_path() else {
                return Vec::new();
            };
            patterns
                .iter()
                .filter(|(pattern_expr, _)| matches_pattern(path, pattern_expr))
                .flat_map(|(_, hooks)| hooks.iter().cloned())
                .collect()
        }
    }
}
