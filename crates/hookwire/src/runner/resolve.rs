//! Hook executable resolution
//!
//! This module locates the executable for a named hook by probing an
//! explicit, ordered list of search directories.
//!
//! # Search Strategy
//!
//! [`HookResolver::default_search_dirs`] produces the default order:
//!
//! 1. `$HOOKWIRE_HOOK_DIR` - environment override, when set
//! 2. `./.hookwire/hooks` - project-local hooks
//! 3. `$HOME/.hookwire/hooks` - per-user hooks
//!
//! The first directory containing a file named exactly `<hookName>` wins.
//! The list is a plain `Vec<PathBuf>` so tests can substitute temporary
//! directories, and the environment is read once at construction time.
//!
//! # Example
//!
//! ```
//! use hookwire::runner::HookResolver;
//! use std::path::PathBuf;
//!
//! let resolver = HookResolver::new(vec![PathBuf::from("/opt/hooks")]);
//! assert!(resolver.find("does-not-exist").is_none());
//! ```

use std::path::PathBuf;

use tracing::trace;

/// Resolves hook names to executable paths
#[derive(Debug, Clone)]
pub struct HookResolver {
    /// Directories probed in order; the first containing the hook wins
    search_dirs: Vec<PathBuf>,
}

impl HookResolver {
    /// Create a resolver with an explicit search-directory list
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    /// The default search directories, in probe order
    ///
    /// Reads `HOOKWIRE_HOOK_DIR` and `HOME` once; the resulting list is
    /// fixed for the resolver's lifetime.
    pub fn default_search_dirs() -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Ok(dir) = std::env::var("HOOKWIRE_HOOK_DIR") {
            if !dir.is_empty() {
                dirs.push(PathBuf::from(dir));
            }
        }
        dirs.push(PathBuf::from(".hookwire/hooks"));
        if let Ok(home) = std::env::var("HOME") {
            dirs.push(PathBuf::from(home).join(".hookwire/hooks"));
        }
        dirs
    }

    /// The directories this resolver probes, in order
    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// The search directories as display strings, for diagnostics
    pub fn searched(&self) -> Vec<String> {
        self.search_dirs
            .iter()
            .map(|d| d.display().to_string())
            .collect()
    }

    /// Locate the executable for a hook name
    ///
    /// Returns the first `<dir>/<hook_name>` that exists as a file, or
    /// `None` when no search directory contains the hook.
    pub fn find(&self, hook_name: &str) -> Option<PathBuf> {
        for dir in &self.search_dirs {
            let candidate = dir.join(hook_name);
            trace!("Probing hook candidate {}", candidate.display());
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        None
    }
}

impl Default for HookResolver {
    fn default() -> Self {
        Self::new(Self::default_search_dirs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_missing_hook() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = HookResolver::new(vec![dir.path().to_path_buf()]);
        assert!(resolver.find("no-such-hook").is_none());
    }

    #[test]
    fn test_find_existing_hook() {
        let dir = tempfile::tempdir().unwrap();
        let hook = dir.path().join("check-style");
        fs::write(&hook, "#!/bin/sh\nexit 0\n").unwrap();

        let resolver = HookResolver::new(vec![dir.path().to_path_buf()]);
        assert_eq!(resolver.find("check-style"), Some(hook));
    }

    #[test]
    fn test_first_directory_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let in_first = first.path().join("check-style");
        let in_second = second.path().join("check-style");
        fs::write(&in_first, "first").unwrap();
        fs::write(&in_second, "second").unwrap();

        let resolver = HookResolver::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        assert_eq!(resolver.find("check-style"), Some(in_first));
    }

    #[test]
    fn test_skips_directories_without_the_hook() {
        let empty = tempfile::tempdir().unwrap();
        let full = tempfile::tempdir().unwrap();
        let hook = full.path().join("check-style");
        fs::write(&hook, "hook").unwrap();

        let resolver = HookResolver::new(vec![
            empty.path().to_path_buf(),
            full.path().to_path_buf(),
        ]);
        assert_eq!(resolver.find("check-style"), Some(hook));
    }

    #[test]
    fn test_directory_named_like_hook_is_not_a_match() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("check-style")).unwrap();

        let resolver = HookResolver::new(vec![dir.path().to_path_buf()]);
        assert!(resolver.find("check-style").is_none());
    }

    #[test]
    fn test_searched_lists_all_dirs() {
        let resolver = HookResolver::new(vec![
            PathBuf::from("/a/hooks"),
            PathBuf::from("/b/hooks"),
        ]);
        assert_eq!(resolver.searched(), vec!["/a/hooks", "/b/hooks"]);
    }
}
