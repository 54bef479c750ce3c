//! Tool and pattern matching.
//!
//! Two pure predicates drive hook selection:
//!
//! - [`matches_tool`] tests a tool name against a `|`-separated matcher
//!   expression (`"Read|Write|Edit"`, or the wildcard `"*"`).
//! - [`matches_pattern`] tests a text value (a command string or a file path)
//!   against a regular expression.
//!
//! Both are deterministic: the same inputs always give the same result. An
//! invalid regex never matches and logs a warning; it does not fail the
//! surrounding dispatch.

use regex::Regex;
use tracing::warn;

/// Tool-context wildcard: matches every tool and skips regex compilation.
pub const WILDCARD: &str = "*";

/// Test a tool name against a matcher expression
///
/// The expression is split on `|` and each segment is trimmed; the tool name
/// must equal one of the segments exactly. The expression `"*"` matches any
/// tool. An empty tool name never matches a non-wildcard expression.
///
/// # Examples
///
/// ```
/// use hookwire::matcher::matches_tool;
///
/// assert!(matches_tool("Write", "Read|Write|Edit"));
/// assert!(!matches_tool("Bash", "Read|Write|Edit"));
/// assert!(matches_tool("Bash", "*"));
/// ```
pub fn matches_tool(tool_name: &str, matcher_expr: &str) -> bool {
    if matcher_expr.trim() == WILDCARD {
        return true;
    }
    if tool_name.is_empty() {
        return false;
    }
    matcher_expr
        .split('|')
        .map(str::trim)
        .any(|segment| segment == tool_name)
}

/// Test a text value against a pattern expression
///
/// The pattern is compiled as an unanchored, case-sensitive regular
/// expression and searched anywhere in `text`. The empty pattern is an
/// ordinary regex and matches every string. A pattern that fails to compile
/// matches nothing; the failure is logged as a warning.
///
/// # Examples
///
/// ```
/// use hookwire::matcher::matches_pattern;
///
/// assert!(matches_pattern("npm install left-pad", r"^(npm\s+install)\s+"));
/// assert!(!matches_pattern("npm test", r"^(npm\s+install)\s+"));
/// assert!(!matches_pattern("anything", "("));
/// ```
pub fn matches_pattern(text: &str, pattern_expr: &str) -> bool {
    match Regex::new(pattern_expr) {
        Ok(re) => re.is_match(text),
        Err(e) => {
            warn!("Invalid hook pattern '{}': {}", pattern_expr, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_correctness() {
        assert!(matches_tool("Write", "Read|Write|Edit"));
        assert!(matches_tool("Read", "Read|Write|Edit"));
        assert!(matches_tool("Edit", "Read|Write|Edit"));
        assert!(!matches_tool("Bash", "Read|Write|Edit"));
    }

    #[test]
    fn test_single_tool_matcher() {
        assert!(matches_tool("Bash", "Bash"));
        assert!(!matches_tool("Bash", "Read"));
    }

    #[test]
    fn test_segments_are_trimmed() {
        assert!(matches_tool("Write", "Read | Write | Edit"));
        assert!(matches_tool("Bash", " Bash "));
    }

    #[test]
    fn test_wildcard_totality() {
        for tool in ["Bash", "Read", "Write", "mcp__server__tool"] {
            assert!(matches_tool(tool, "*"));
        }
        assert!(matches_tool("Bash", " * "));
    }

    #[test]
    fn test_empty_tool_never_matches_non_wildcard() {
        assert!(!matches_tool("", "Bash"));
        assert!(!matches_tool("", "Read|Write"));
        assert!(!matches_tool("", ""));
    }

    #[test]
    fn test_no_substring_matching() {
        assert!(!matches_tool("Bash", "BashOutput"));
        assert!(!matches_tool("BashOutput", "Bash"));
    }

    #[test]
    fn test_pattern_unanchored_search() {
        assert!(matches_pattern("run npm install now", r"npm install"));
        assert!(matches_pattern("npm install left-pad", r"^(npm\s+install)\s+"));
        assert!(!matches_pattern("yarn add left-pad", r"^(npm\s+install)\s+"));
    }

    #[test]
    fn test_pattern_case_sensitive() {
        assert!(matches_pattern("NPM install", r"NPM"));
        assert!(!matches_pattern("npm install", r"NPM"));
    }

    #[test]
    fn test_empty_pattern_matches_everything() {
        assert!(matches_pattern("", ""));
        assert!(matches_pattern("anything at all", ""));
    }

    #[test]
    fn test_invalid_pattern_never_matches() {
        assert!(!matches_pattern("anything", "("));
        assert!(!matches_pattern("(", "("));
        assert!(!matches_pattern("anything", "[unclosed"));
    }

    #[test]
    fn test_matching_is_deterministic() {
        for _ in 0..3 {
            assert!(matches_tool("Write", "Read|Write|Edit"));
            assert!(matches_pattern("npm install x", r"^npm\s+install"));
        }
    }
}
