//! Configuration file discovery and loading
//!
//! The loader probes an explicit, ordered list of candidate paths and parses
//! the first file that exists. The list is a plain `Vec<PathBuf>` so tests
//! can substitute temporary directories.
//!
//! # Search Strategy
//!
//! [`ConfigLoader::default_candidates`] produces the default order:
//!
//! 1. `./.hookwire/hooks.json` - project-local hidden directory
//! 2. `./hookwire.json` - project root
//! 3. `$HOME/.hookwire/hooks.json` - per-user fallback
//!
//! # Hot Reload
//!
//! There is no caching: every call to [`ConfigLoader::load`] re-reads from
//! disk, so edits to the configuration take effect on the next dispatch
//! without restarting the host process.
//!
//! # Degradation
//!
//! A missing file, an unreadable file, and a parse failure all degrade to the
//! empty configuration. Parse failures are logged as warnings; "no file
//! found" is only a debug-level note since running without hooks is a normal
//! state.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::HookConfig;
use crate::error::WireError;

/// Loads the hook configuration from an ordered list of candidate files
///
/// # Example
///
/// ```
/// use hookwire::config::ConfigLoader;
/// use std::path::PathBuf;
///
/// // Default candidate order
/// let loader = ConfigLoader::default();
///
/// // Explicit candidates (e.g. for tests)
/// let loader = ConfigLoader::new(vec![PathBuf::from("/tmp/hooks.json")]);
/// let config = loader.load();
/// assert!(config.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Candidate files, probed in order; the first that exists wins
    candidates: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Create a loader with an explicit candidate list
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    /// The default candidate file locations, in probe order
    pub fn default_candidates() -> Vec<PathBuf> {
        let mut candidates = vec![
            PathBuf::from(".hookwire/hooks.json"),
            PathBuf::from("hookwire.json"),
        ];
        if let Ok(home) = std::env::var("HOME") {
            candidates.push(PathBuf::from(home).join(".hookwire/hooks.json"));
        }
        candidates
    }

    /// The candidate files this loader probes, in order
    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Load the configuration from the first candidate file that exists
    ///
    /// Never fails: absence of every candidate, or a file that cannot be
    /// read or parsed, yields [`HookConfig::empty`]. Called on every
    /// dispatch - results are never cached.
    pub fn load(&self) -> HookConfig {
        for candidate in &self.candidates {
            if !candidate.exists() {
                continue;
            }
            match Self::parse_file(candidate) {
                Ok(config) => {
                    debug!("Loaded hook configuration from {}", candidate.display());
                    return config;
                }
                Err(e) => {
                    warn!("{e}; continuing with no hooks configured");
                    return HookConfig::empty();
                }
            }
        }

        debug!("No hook configuration file found; no hooks configured");
        HookConfig::empty()
    }

    /// Parse a single configuration file, reporting which file failed
    fn parse_file(path: &Path) -> Result<HookConfig, WireError> {
        let text = std::fs::read_to_string(path).map_err(|e| WireError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| WireError::ConfigParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(Self::default_candidates())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_missing_file_yields_empty() {
        let loader = ConfigLoader::new(vec![PathBuf::from("/nonexistent/hooks.json")]);
        assert!(loader.load().is_empty());
    }

    #[test]
    fn test_load_no_candidates_yields_empty() {
        let loader = ConfigLoader::new(vec![]);
        assert!(loader.load().is_empty());
    }

    #[test]
    fn test_load_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_config(dir.path(), "first.json", r#"{"stop": ["from-first"]}"#);
        let second = write_config(dir.path(), "second.json", r#"{"stop": ["from-second"]}"#);

        let loader = ConfigLoader::new(vec![first, second]);
        let config = loader.load();
        assert_eq!(config.stop, Some(vec!["from-first".to_string()]));
    }

    #[test]
    fn test_load_skips_missing_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let present = write_config(dir.path(), "hooks.json", r#"{"stop": ["present"]}"#);

        let loader = ConfigLoader::new(vec![dir.path().join("missing.json"), present]);
        let config = loader.load();
        assert_eq!(config.stop, Some(vec!["present".to_string()]));
    }

    #[test]
    fn test_malformed_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write_config(dir.path(), "hooks.json", "{ not json");

        let loader = ConfigLoader::new(vec![bad]);
        assert!(loader.load().is_empty());
    }

    #[test]
    fn test_hot_reload_sees_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "hooks.json", r#"{"stop": ["one"]}"#);
        let loader = ConfigLoader::new(vec![path.clone()]);

        assert_eq!(loader.load().stop, Some(vec!["one".to_string()]));

        fs::write(&path, r#"{"stop": ["one", "two"]}"#).unwrap();
        assert_eq!(
            loader.load().stop,
            Some(vec!["one".to_string(), "two".to_string()])
        );
    }

    #[test]
    fn test_default_candidates_start_project_local() {
        let candidates = ConfigLoader::default_candidates();
        assert!(candidates.len() >= 2);
        assert_eq!(candidates[0], PathBuf::from(".hookwire/hooks.json"));
        assert_eq!(candidates[1], PathBuf::from("hookwire.json"));
    }
}
