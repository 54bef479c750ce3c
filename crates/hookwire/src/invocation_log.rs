//! Append-only invocation logging.
//!
//! One JSON object per line, one line per hook invocation. The file is opened
//! in append mode and each record is written as a single `write_all`, so
//! concurrent dispatcher processes (two assistant sessions sharing a log)
//! interleave whole lines rather than corrupting each other. Nothing here is
//! required for dispatch correctness; the log exists for after-the-fact
//! debugging of hook behavior.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::WireError;
use crate::runner::HookInvocation;

/// Appends serialized invocation records to a JSONL file
///
/// # Example
///
/// ```no_run
/// use hookwire::invocation_log::InvocationLog;
/// use hookwire::runner::HookInvocation;
///
/// let log = InvocationLog::new("/tmp/hookwire.jsonl");
/// let record = HookInvocation::not_found("lint-check", vec![]);
/// log.append(&record).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct InvocationLog {
    path: PathBuf,
}

impl InvocationLog {
    /// Create a logger targeting the given file; the file is created on
    /// first append
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single JSON line
    pub fn append(&self, record: &HookInvocation) -> Result<(), WireError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invocations.jsonl");
        let log = InvocationLog::new(&path);

        log.append(&HookInvocation::not_found("a", vec![])).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_appends_are_line_oriented() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invocations.jsonl");
        let log = InvocationLog::new(&path);

        log.append(&HookInvocation::not_found("first", vec![]))
            .unwrap();
        log.append(&HookInvocation::not_found("second", vec![]))
            .unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(first["hook_name"], "first");
        assert_eq!(second["hook_name"], "second");
    }

    #[test]
    fn test_append_to_unwritable_path_fails() {
        let log = InvocationLog::new("/nonexistent/dir/invocations.jsonl");
        let result = log.append(&HookInvocation::not_found("a", vec![]));
        assert!(matches!(result.unwrap_err(), WireError::Io(_)));
    }
}
