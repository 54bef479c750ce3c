//! Mock hook binary for integration testing
//!
//! This binary stands in for a real validation hook. It reads the forwarded
//! event JSON from its stdin and obeys an optional `mock` directive object
//! inside `tool_input`, so integration tests can script hook behavior
//! through the event payload itself:
//!
//! ```json
//! {
//!   "session_id": "s-1",
//!   "hook_event_name": "PreToolUse",
//!   "tool_name": "Bash",
//!   "tool_input": {
//!     "command": "ls",
//!     "mock": {
//!       "exit": 2,
//!       "sleepMs": 100,
//!       "stdout": "printed before exiting",
//!       "stderr": "diagnostic text"
//!     }
//!   }
//! }
//! ```
//!
//! All directive fields are optional. With no directive the binary prints
//! `mock_hook ok` and exits 0.
//!
//! # Special Flags
//!
//! - `--version` → print version and exit
//! - `--help` → print help text and exit

use std::io::{self, Read, Write};
use std::process;
use std::thread;
use std::time::Duration;

const VERSION: &str = "0.1.0 (Mock Hookwire Hook)";
const HELP_TEXT: &str = r#"mock_hook - scriptable hook for hookwire integration tests

USAGE:
    mock_hook

Reads the event JSON from stdin. Behavior is controlled by an optional
"mock" object inside tool_input:

    exit     (number)  exit code, default 0
    sleepMs  (number)  milliseconds to sleep before exiting
    stdout   (string)  text to print on stdout
    stderr   (string)  text to print on stderr

OPTIONS:
    --version            Print version and exit
    --help               Print this help text and exit
"#;

fn main() {
    for arg in std::env::args().skip(1) {
        if arg == "--version" {
            println!("{}", VERSION);
            process::exit(0);
        } else if arg == "--help" {
            println!("{}", HELP_TEXT);
            process::exit(0);
        }
    }

    // The dispatcher forwards the event payload on stdin; a hook that
    // cannot read it is broken, so fail loudly.
    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("ERROR: failed to read event payload: {}", err);
        process::exit(1);
    }

    let event: serde_json::Value = match serde_json::from_str(&input) {
        Ok(value) => value,
        Err(err) => {
            eprintln!("ERROR: event payload is not valid JSON: {}", err);
            process::exit(1);
        }
    };

    let directive = event.get("tool_input").and_then(|input| input.get("mock"));

    let Some(directive) = directive else {
        println!("mock_hook ok");
        process::exit(0);
    };

    if let Some(ms) = directive.get("sleepMs").and_then(|v| v.as_u64()) {
        thread::sleep(Duration::from_millis(ms));
    }

    if let Some(text) = directive.get("stdout").and_then(|v| v.as_str()) {
        println!("{}", text);
        let _ = io::stdout().flush();
    }

    if let Some(text) = directive.get("stderr").and_then(|v| v.as_str()) {
        eprintln!("{}", text);
    }

    let exit = directive
        .get("exit")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    process::exit(exit as i32);
}
