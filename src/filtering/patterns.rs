// src/filtering/patterns.rs

use crate::constants::{DEFAULT_BINARY_EXTENSIONS, DEFAULT_IGNORE_PATTERNS};

/// Decides which names are skipped during traversal and which files are binary.
///
/// Both decisions are pure string checks with no I/O:
///
/// *   **Ignore:** a name is skipped if it contains any ignore pattern as a
///     substring. This is deliberately not glob or segment matching, so
///     `my_node_modules_fork` is skipped just like `node_modules`.
/// *   **Binary:** a path is binary if its lowercased form ends with any of the
///     binary extensions.
///
/// `Default` yields the built-in lists from [`crate::constants`]; both lists can
/// be replaced or extended.
///
/// # Examples
///
/// ```
/// use repoflat::filtering::PatternFilter;
///
/// let filter = PatternFilter::default();
/// assert!(filter.should_ignore("node_modules"));
/// assert!(filter.should_ignore("my_node_modules_fork"));
/// assert!(!filter.should_ignore("src"));
///
/// assert!(filter.is_binary("assets/logo.PNG"));
/// assert!(!filter.is_binary("src/main.rs"));
///
/// let custom = PatternFilter::new(vec!["secret".into()], vec![".rs".into()]);
/// assert!(custom.should_ignore("secrets.txt"));
/// assert!(custom.is_binary("src/main.rs"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternFilter {
    ignore_patterns: Vec<String>,
    binary_extensions: Vec<String>,
}

impl PatternFilter {
    /// Creates a filter from explicit lists. Extensions are lowercased.
    pub fn new(ignore_patterns: Vec<String>, binary_extensions: Vec<String>) -> Self {
        Self {
            ignore_patterns,
            binary_extensions: normalize_extensions(binary_extensions),
        }
    }

    /// Replaces the ignore patterns.
    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// Replaces the binary extensions.
    pub fn with_binary_extensions(mut self, extensions: Vec<String>) -> Self {
        self.binary_extensions = normalize_extensions(extensions);
        self
    }

    /// Appends patterns to the ignore list.
    pub fn extend_ignore_patterns<I: IntoIterator<Item = String>>(&mut self, patterns: I) {
        self.ignore_patterns.extend(patterns);
    }

    /// Appends extensions to the binary list.
    pub fn extend_binary_extensions<I: IntoIterator<Item = String>>(&mut self, extensions: I) {
        self.binary_extensions
            .extend(normalize_extensions(extensions.into_iter().collect()));
    }

    /// The active ignore patterns.
    pub fn ignore_patterns(&self) -> &[String] {
        &self.ignore_patterns
    }

    /// The active binary extensions, lowercase with a leading dot.
    pub fn binary_extensions(&self) -> &[String] {
        &self.binary_extensions
    }

    /// Returns `true` if `name` contains any ignore pattern.
    pub fn should_ignore(&self, name: &str) -> bool {
        self.ignore_patterns
            .iter()
            .any(|pattern| !pattern.is_empty() && name.contains(pattern.as_str()))
    }

    /// Returns `true` if `path` ends with a binary extension (case-insensitive).
    pub fn is_binary(&self, path: &str) -> bool {
        let lower = path.to_lowercase();
        self.binary_extensions
            .iter()
            .any(|ext| lower.ends_with(ext.as_str()))
    }
}

impl Default for PatternFilter {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_BINARY_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

/// Lowercases extensions and adds the leading dot if it was left off,
/// so `PNG` and `.png` are equivalent.
fn normalize_extensions(exts: Vec<String>) -> Vec<String> {
    exts.into_iter()
        .filter(|e| !e.is_empty())
        .map(|e| {
            let e = e.to_lowercase();
            if e.starts_with('.') {
                e
            } else {
                format!(".{}", e)
            }
        })
        .collect()
}
