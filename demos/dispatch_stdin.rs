//! Dispatch a lifecycle event read from stdin, through the library API.
//!
//! This is the `hookwire` binary's flow with the invocation records made
//! visible. Pipe an event payload in:
//!
//! ```bash
//! echo '{"session_id": "demo", "hook_event_name": "Stop"}' \
//!     | cargo run --example dispatch_stdin
//! ```

use std::io::Read;

use hookwire::prelude::*;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hookwire=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("failed to read stdin");

    let raw: serde_json::Value = serde_json::from_str(&input).expect("stdin is not JSON");
    let event = match HookEvent::from_json(raw).expect("malformed event payload") {
        Some(event) => event,
        None => {
            println!("unrecognized event kind - nothing to dispatch");
            return;
        }
    };

    let dispatcher = Dispatcher::new();
    let result = dispatcher.dispatch(&event).await;

    println!();
    println!("blocked: {}", result.blocked);
    if let Some(reason) = &result.reason {
        println!("reason:  {reason}");
    }
    for record in &result.ran_hooks {
        println!(
            "  {} -> {:?} (exit {:?}, {}ms)",
            record.hook_name, record.status, record.exit_code, record.duration_ms
        );
    }
}
