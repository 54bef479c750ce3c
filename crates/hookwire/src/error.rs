//! Error types for the hookwire dispatcher
//!
//! This module defines the error hierarchy for the hookwire crate using `thiserror`.
//! All operations that can fail return `Result<T, WireError>`.
//!
//! Most failure conditions in the dispatch path are deliberately *not* errors:
//! a missing configuration file degrades to an empty configuration, an invalid
//! pattern never matches, and a hook that cannot be found or crashes is recorded
//! on its invocation record. `WireError` covers the genuinely fatal cases plus
//! the internal fallible steps that callers recover from locally.
//!
//! # Error Variants
//!
//! - [`WireError::EventParse`]: the incoming event payload is not a usable JSON object
//! - [`WireError::ConfigParse`]: a configuration file exists but does not parse
//! - [`WireError::Spawn`]: a hook executable exists but could not be launched
//! - [`WireError::JsonDecode`]: JSON parsing errors (auto-converts from `serde_json::Error`)
//! - [`WireError::Io`]: filesystem and I/O operations (auto-converts from `std::io::Error`)
//!
//! # Example
//!
//! ```rust
//! use hookwire::error::WireError;
//!
//! fn example() -> Result<(), WireError> {
//!     // Auto-conversion from std::io::Error
//!     let _file = std::fs::read_to_string("/nonexistent")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for all hookwire operations
///
/// Two variants support automatic conversion via the `?` operator:
/// - `JsonDecode` from `serde_json::Error`
/// - `Io` from `std::io::Error`
#[derive(Error, Debug)]
pub enum WireError {
    /// The incoming lifecycle event payload could not be parsed
    ///
    /// This error occurs when the host writes something other than a single
    /// JSON object to the dispatcher's stdin. The dispatcher binary exits
    /// with code 1 in this case; hooks are never consulted.
    #[error("Failed to parse event payload: {reason}")]
    EventParse {
        /// Description of what went wrong during parsing
        reason: String,
    },

    /// A configuration file was found but could not be parsed
    ///
    /// The loader catches this internally and degrades to the empty
    /// configuration, so it never crosses the dispatch boundary. It exists
    /// as a variant so the strict loading path can report *which* file was
    /// rejected.
    #[error("Failed to parse hook configuration {path}: {reason}")]
    ConfigParse {
        /// Path of the offending configuration file
        path: String,
        /// Description of the parse failure
        reason: String,
    },

    /// A hook executable exists but could not be launched
    ///
    /// This covers interpreter-missing, permission, and similar spawn-time
    /// failures. The runner converts it into a `SpawnError` invocation
    /// record rather than aborting the dispatch.
    #[error("Failed to spawn hook '{hook}': {source}")]
    Spawn {
        /// Name of the hook that failed to launch
        hook: String,
        /// The underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON
    ///
    /// This error is automatically converted from `serde_json::Error`.
    #[error("Failed to parse JSON: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// I/O operation failed
    ///
    /// This error is automatically converted from `std::io::Error` for
    /// filesystem operations, process spawning, and stdio communication.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
