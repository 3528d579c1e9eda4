//! Defines core data structures used throughout the pipeline.
//!
//! A run produces a [`FlatEntryMap`] from the walker, turns it into a
//! [`crate::tree::FileNode`] tree for the listing, and pairs it with
//! [`FileContent`] values for the contents block.

use std::collections::HashMap;

/// Identifies a repository and, optionally, the ref to read.
///
/// A `branch` of `None` means "use the provider's default branch".
///
/// # Examples
///
/// ```
/// use repoflat::core_types::RepositoryRef;
///
/// let repo = RepositoryRef::new("rust-lang", "cargo").with_branch("master");
/// assert_eq!(repo.slug(), "rust-lang/cargo");
/// assert_eq!(repo.branch.as_deref(), Some("master"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    /// The account or organisation owning the repository.
    pub owner: String,
    /// The repository name, without any `.git` suffix.
    pub repo: String,
    /// The branch, tag, or commit to read. `None` defers to the default branch.
    pub branch: Option<String>,
}

impl RepositoryRef {
    /// Creates a reference to the repository's default branch.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: None,
        }
    }

    /// Returns a copy pinned to `branch`.
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// `owner/repo`, as used in API paths and log lines.
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// A URL used to retrieve a file's raw bytes.
pub type ContentLocator = String;

/// One entry recorded by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file, with the locator used to fetch its content.
    File(ContentLocator),
    /// A directory. Its children may or may not have been enumerated,
    /// depending on the depth bound.
    Directory,
}

impl Entry {
    /// Returns the content locator for files, `None` for directories.
    pub fn locator(&self) -> Option<&str> {
        match self {
            Entry::File(locator) => Some(locator),
            Entry::Directory => None,
        }
    }

    /// `true` for [`Entry::Directory`].
    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory)
    }
}

/// Mapping from repository-relative path to [`Entry`], in traversal order.
///
/// Paths are `/`-separated without a leading slash. Keys are unique: inserting
/// a path that is already present keeps the first entry.
///
/// # Examples
///
/// ```
/// use repoflat::core_types::{Entry, FlatEntryMap};
///
/// let mut flat = FlatEntryMap::new();
/// flat.insert("src", Entry::Directory);
/// flat.insert("src/main.rs", Entry::File("https://example.test/main.rs".into()));
/// assert_eq!(flat.len(), 2);
/// assert!(flat.get("src").unwrap().is_directory());
/// let paths: Vec<&str> = flat.iter().map(|(p, _)| p).collect();
/// assert_eq!(paths, vec!["src", "src/main.rs"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatEntryMap {
    entries: Vec<(String, Entry)>,
    index: HashMap<String, usize>,
}

impl FlatEntryMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `entry` at `path`. Returns `false` if the path was already present,
    /// in which case the existing entry is left untouched.
    pub fn insert(&mut self, path: impl Into<String>, entry: Entry) -> bool {
        let path = path.into();
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, entry));
        true
    }

    /// Looks up the entry recorded for `path`.
    pub fn get(&self, path: &str) -> Option<&Entry> {
        self.index.get(path).map(|&i| &self.entries[i].1)
    }

    /// `true` if `path` has been recorded.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e))
    }

    /// Iterates only the file entries, yielding `(path, locator)`.
    pub fn files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter_map(|(path, entry)| entry.locator().map(|loc| (path, loc)))
    }
}

impl<P: Into<String>> FromIterator<(P, Entry)> for FlatEntryMap {
    fn from_iter<I: IntoIterator<Item = (P, Entry)>>(iter: I) -> Self {
        let mut map = FlatEntryMap::new();
        for (path, entry) in iter {
            map.insert(path, entry);
        }
        map
    }
}

/// The outcome of retrieving one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// The decoded text of the file.
    Text(String),
    /// Retrieval failed. The rest of the run is unaffected.
    Failed {
        /// The error message.
        message: String,
        /// The locator that was requested.
        url: String,
        /// Whether an access token was sent with the request.
        token_supplied: bool,
    },
}

/// File contents keyed by repository-relative path.
pub type ContentMap = HashMap<String, FileContent>;
