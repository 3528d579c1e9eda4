// src/output/listing.rs

use crate::constants::{LISTING_INDENT, LISTING_MARKER};
use crate::tree::FileNode;

/// Renders the indented directory listing for `root`.
///
/// The root itself is not printed. At each level directories come before
/// files, then names sort case-insensitively. Direct children of the root have
/// no indent; every deeper level adds four spaces. Each line is `├── name`,
/// with `/` appended to directories.
///
/// # Examples
/// ```
/// use repoflat::core_types::{Entry, FlatEntryMap};
/// use repoflat::output::render_listing;
/// use repoflat::tree::build_tree;
///
/// let flat: FlatEntryMap = vec![
///     ("a/b.txt", Entry::File("loc".into())),
///     ("a", Entry::Directory),
/// ].into_iter().collect();
///
/// assert_eq!(render_listing(&build_tree(&flat)), "├── a/\n    ├── b.txt\n");
/// ```
pub fn render_listing(root: &FileNode) -> String {
    let mut out = String::new();
    render_children(root, 1, &mut out);
    out
}

fn render_children(node: &FileNode, depth: usize, out: &mut String) {
    for child in node.sorted_children() {
        out.push_str(&LISTING_INDENT.repeat(depth - 1));
        out.push_str(LISTING_MARKER);
        out.push_str(&child.name);
        if child.is_directory {
            out.push('/');
        }
        out.push('\n');

        if child.is_directory {
            render_children(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{Entry, FlatEntryMap};
    use crate::tree::build_tree;

    fn tree_of(paths: &[&str]) -> FileNode {
        // Paths ending in '/' are directories.
        let flat: FlatEntryMap = paths
            .iter()
            .map(|p| match p.strip_suffix('/') {
                Some(dir) => (dir.to_string(), Entry::Directory),
                None => (p.to_string(), Entry::File(format!("loc:{}", p))),
            })
            .collect();
        build_tree(&flat)
    }

    #[test]
    fn test_single_directory_with_file() {
        let root = tree_of(&["a/b.txt", "a/"]);
        assert_eq!(render_listing(&root), "├── a/\n    ├── b.txt\n");
    }

    #[test]
    fn test_directories_before_files_at_every_level() {
        let root = tree_of(&[
            "README.md",
            "src/",
            "src/main.rs",
            "src/util/",
            "src/util/mod.rs",
            "Cargo.toml",
            "tests/",
        ]);
        let expected = "\
├── src/
    ├── util/
        ├── mod.rs
    ├── main.rs
├── tests/
├── Cargo.toml
├── README.md
";
        assert_eq!(render_listing(&root), expected);
    }

    #[test]
    fn test_alphabetical_ignores_case() {
        let root = tree_of(&["b.txt", "A.txt", "c.txt"]);
        assert_eq!(render_listing(&root), "├── A.txt\n├── b.txt\n├── c.txt\n");
    }

    #[test]
    fn test_empty_tree_renders_nothing() {
        assert_eq!(render_listing(&FileNode::root()), "");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let root = tree_of(&["z/", "z/1", "a", "m/", "m/x/", "m/x/y"]);
        let first = render_listing(&root);
        let second = render_listing(&root);
        assert_eq!(first, second);
        assert_eq!(first, render_listing(&tree_of(&["m/x/y", "a", "z/1", "m/", "z/", "m/x/"])));
    }
}
