//! Rebuilds the directory hierarchy from a [`FlatEntryMap`].

use crate::core_types::{ContentLocator, Entry, FlatEntryMap};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A node in the reconstructed repository tree.
///
/// The root is synthetic: `path` and `name` are empty and it is a directory.
/// Files are always leaves; directories may have no children when the walker
/// stopped at the depth bound or the directory was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// The last path segment.
    pub name: String,
    /// The full repository-relative path.
    pub path: String,
    /// Whether this node is a directory.
    pub is_directory: bool,
    /// The content locator for files, `None` for directories.
    pub locator: Option<ContentLocator>,
    /// Child nodes keyed by name.
    pub children: BTreeMap<String, FileNode>,
}

impl FileNode {
    /// Creates an empty, synthetic root.
    pub fn root() -> Self {
        Self::directory(String::new(), String::new())
    }

    fn directory(name: String, path: String) -> Self {
        Self {
            name,
            path,
            is_directory: true,
            locator: None,
            children: BTreeMap::new(),
        }
    }

    fn file(name: String, path: String, locator: ContentLocator) -> Self {
        Self {
            name,
            path,
            is_directory: false,
            locator: Some(locator),
            children: BTreeMap::new(),
        }
    }

    /// Follows `path` from this node. An empty path returns `self`.
    pub fn find(&self, path: &str) -> Option<&FileNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Children ordered directories first, then by [`compare_names`].
    pub fn sorted_children(&self) -> Vec<&FileNode> {
        let mut children: Vec<&FileNode> = self.children.values().collect();
        children.sort_by(|a, b| {
            b.is_directory
                .cmp(&a.is_directory)
                .then_with(|| compare_names(&a.name, &b.name))
        });
        children
    }
}

/// Case-folding comparison used for all user-visible ordering.
///
/// Names compare by their lowercase form first, so `Readme` sorts next to
/// `readme` rather than before every lowercase name; the raw strings break ties
/// so the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Builds a tree from the flat map.
///
/// Entries are sorted by path with [`compare_names`] first, so the result does
/// not depend on the order the provider enumerated them in. Intermediate
/// directories are created on demand and reused; an existing node is never
/// replaced. A segment becomes a file node only when it is the last segment of
/// an [`Entry::File`].
///
/// # Examples
/// ```
/// use repoflat::core_types::{Entry, FlatEntryMap};
/// use repoflat::tree::build_tree;
///
/// let flat: FlatEntryMap = vec![
///     ("a/b.txt", Entry::File("loc".into())),
///     ("a", Entry::Directory),
/// ].into_iter().collect();
///
/// let root = build_tree(&flat);
/// let a = root.find("a").unwrap();
/// assert!(a.is_directory);
/// let b = root.find("a/b.txt").unwrap();
/// assert!(!b.is_directory);
/// assert_eq!(b.locator.as_deref(), Some("loc"));
/// ```
pub fn build_tree(flat: &FlatEntryMap) -> FileNode {
    let mut entries: Vec<(&str, &Entry)> = flat.iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_names(a, b));

    let mut root = FileNode::root();
    for (path, entry) in entries {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let mut current = &mut root;
        let mut current_path = String::new();

        for (i, segment) in segments.iter().enumerate() {
            if !current_path.is_empty() {
                current_path.push('/');
            }
            current_path.push_str(segment);

            let is_last = i + 1 == segments.len();
            current = current
                .children
                .entry(segment.to_string())
                .or_insert_with(|| match (is_last, entry) {
                    (true, Entry::File(locator)) => {
                        FileNode::file(segment.to_string(), current_path.clone(), locator.clone())
                    }
                    _ => FileNode::directory(segment.to_string(), current_path.clone()),
                });
        }
    }
    root
}
