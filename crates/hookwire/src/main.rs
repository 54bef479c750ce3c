//! The hookwire dispatcher binary
//!
//! Reads one lifecycle-event JSON object from stdin, dispatches it to the
//! configured hooks, and reports the decision through the exit code:
//!
//! - `0` - not blocked (including unrecognized event kinds and the empty
//!   configuration)
//! - `2` - blocked; the winning hook's reason is printed to stderr
//! - `1` - dispatcher failure (stdin unreadable or not a JSON object)
//!
//! Hook stdout/stderr stream through to this process's own streams as the
//! hooks run, so the host sees validator output live.
//!
//! # Environment
//!
//! - `HOOKWIRE_DEBUG=1` - debug-level logging (otherwise `RUST_LOG`, default `warn`)
//! - `HOOKWIRE_HOOK_DIR` - extra hook search directory, probed first
//! - `HOOKWIRE_LOG_FILE` - append invocation records to this JSONL file

use std::io::Read;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use hookwire::dispatch::Dispatcher;
use hookwire::event::HookEvent;
use hookwire::invocation_log::InvocationLog;

fn init_tracing() {
    let debug_requested = std::env::var("HOOKWIRE_DEBUG")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let filter = if debug_requested {
        EnvFilter::new("hookwire=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Stderr only: stdout belongs to relayed hook output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> i32 {
    let mut input = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("hookwire: failed to read event payload: {e}");
        return 1;
    }

    let raw: serde_json::Value = match serde_json::from_str(&input) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("hookwire: event payload is not valid JSON: {e}");
            return 1;
        }
    };

    let event = match HookEvent::from_json(raw) {
        Ok(Some(event)) => event,
        Ok(None) => {
            debug!("Unrecognized event kind; nothing to dispatch");
            return 0;
        }
        Err(e) => {
            eprintln!("hookwire: {e}");
            return 1;
        }
    };

    let mut dispatcher = Dispatcher::new();
    if let Ok(path) = std::env::var("HOOKWIRE_LOG_FILE") {
        if !path.is_empty() {
            dispatcher = dispatcher.with_invocation_log(InvocationLog::new(path));
        }
    }

    let result = dispatcher.dispatch(&event).await;

    if result.blocked {
        if let Some(reason) = &result.reason {
            eprintln!("{reason}");
        }
        return 2;
    }
    0
}

#[tokio::main]
async fn main() {
    init_tracing();
    let code = run().await;
    std::process::exit(code);
}
