//! Show which hooks the current configuration selects for sample events,
//! without running anything.
//!
//! ```bash
//! cargo run --example resolve_hooks
//! ```

use hookwire::dispatch::resolve_hook_names;
use hookwire::prelude::*;
use serde_json::json;

fn main() {
    let loader = ConfigLoader::default();
    println!("candidate config files:");
    for candidate in loader.candidates() {
        let marker = if candidate.exists() { "*" } else { " " };
        println!("  [{marker}] {}", candidate.display());
    }

    let config = loader.load();
    if config.is_empty() {
        println!("\nno hooks configured");
        return;
    }

    let samples = [
        HookEvent::tool_use(
            EventKind::PreToolUse,
            "demo",
            "Bash",
            json!({"command": "npm install left-pad"}),
        ),
        HookEvent::tool_use(
            EventKind::PostToolUse,
            "demo",
            "Read",
            json!({"file_path": "src/lib.rs"}),
        ),
        HookEvent::write(EventKind::PreWrite, "demo", "src/lib.rs"),
        HookEvent::stop("demo"),
    ];

    println!();
    for event in &samples {
        let names = resolve_hook_names(&config, event);
        println!("{:<12} -> {:?}", event.kind.as_str(), names);
    }
}
