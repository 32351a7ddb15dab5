//! Substring filtering and lookup over a built tree.

use reposcope_core::{DirectoryNode, Node};

/// Produce a pruned copy of the tree retaining only files whose name
/// contains `query` (case-insensitive) and the directories needed to reach
/// them.
///
/// An empty query is the identity. Returns `None` when nothing matches —
/// callers render that as a no-results state. Rollup fields on surviving
/// directories are *not* recomputed; filtered copies are display views, not
/// structural trees.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{build_tree, filter_tree};
///
/// let entries = vec![
///     TreeEntry::blob("src/index.ts", 120),
///     TreeEntry::blob("README.md", 40),
/// ];
/// let root = build_tree(&entries, "repo").unwrap();
///
/// let filtered = filter_tree(&root, "index").unwrap();
/// let dir = filtered.as_directory().unwrap();
/// assert_eq!(dir.children.len(), 1);
/// assert_eq!(dir.children[0].name(), "src");
///
/// assert!(filter_tree(&root, "nothing-here").is_none());
/// ```
pub fn filter_tree(root: &Node, query: &str) -> Option<Node> {
    if query.is_empty() {
        return Some(root.clone());
    }
    filter_inner(root, &query.to_lowercase())
}

fn filter_inner(node: &Node, needle: &str) -> Option<Node> {
    match node {
        Node::File(file) => file
            .name
            .to_lowercase()
            .contains(needle)
            .then(|| node.clone()),
        Node::Directory(dir) => {
            let children: Vec<Node> = dir
                .children
                .iter()
                .filter_map(|child| filter_inner(child, needle))
                .collect();
            if children.is_empty() {
                return None;
            }
            Some(Node::Directory(DirectoryNode {
                children,
                ..dir.clone()
            }))
        }
    }
}

/// Count files whose name contains `query` without building a filtered copy.
///
/// With an empty query this returns the subtree's file count directly,
/// which is equivalent to (but cheaper than) filtering and counting.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{build_tree, count_matches};
///
/// let entries = vec![
///     TreeEntry::blob("src/index.ts", 120),
///     TreeEntry::blob("README.md", 40),
/// ];
/// let root = build_tree(&entries, "repo").unwrap();
/// assert_eq!(count_matches(&root, "index"), 1);
/// assert_eq!(count_matches(&root, ""), 2);
/// ```
pub fn count_matches(root: &Node, query: &str) -> u64 {
    if query.is_empty() {
        return match root {
            Node::File(_) => 1,
            Node::Directory(dir) => dir.file_count,
        };
    }
    count_inner(root, &query.to_lowercase())
}

fn count_inner(node: &Node, needle: &str) -> u64 {
    match node {
        Node::File(file) => u64::from(file.name.to_lowercase().contains(needle)),
        Node::Directory(dir) => dir
            .children
            .iter()
            .map(|child| count_inner(child, needle))
            .sum(),
    }
}

/// Resolve a slash-separated path to a directory node within the tree.
///
/// An empty path resolves to the root. Returns `None` when any segment is
/// missing or names a file.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{build_tree, select_directory};
///
/// let root = build_tree(&[TreeEntry::blob("a/b/c.txt", 1)], "repo").unwrap();
/// let b = select_directory(&root, "a/b").unwrap();
/// assert_eq!(b.path(), "a/b");
/// assert!(select_directory(&root, "a/b/c.txt").is_none());
/// assert!(select_directory(&root, "missing").is_none());
/// ```
pub fn select_directory<'a>(root: &'a Node, path: &str) -> Option<&'a Node> {
    let path = path.trim_matches('/');
    if path.is_empty() {
        return root.is_directory().then_some(root);
    }

    let mut current = root;
    for segment in path.split('/') {
        let dir = current.as_directory()?;
        current = dir
            .children
            .iter()
            .find(|child| child.is_directory() && child.name() == segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree;
    use reposcope_core::TreeEntry;

    fn sample() -> Node {
        build_tree(
            &[
                TreeEntry::blob("src/index.ts", 120),
                TreeEntry::blob("src/app/Index.test.ts", 80),
                TreeEntry::blob("docs/guide.md", 40),
                TreeEntry::blob("README.md", 40),
            ],
            "repo",
        )
        .unwrap()
    }

    #[test]
    fn empty_query_is_identity() {
        let root = sample();
        assert_eq!(filter_tree(&root, "").unwrap(), root);
    }

    #[test]
    fn filtering_is_idempotent() {
        let root = sample();
        let once = filter_tree(&root, "index").unwrap();
        let twice = filter_tree(&once, "index").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn match_is_case_insensitive_on_file_names() {
        let root = sample();
        assert_eq!(count_matches(&root, "INDEX"), 2);

        // Directory names never match on their own.
        assert!(filter_tree(&root, "docs").is_none());
    }

    #[test]
    fn directories_survive_only_with_matching_descendants() {
        let root = sample();
        let filtered = filter_tree(&root, "guide").unwrap();
        let dir = filtered.as_directory().unwrap();
        assert_eq!(dir.children.len(), 1);
        assert_eq!(dir.children[0].name(), "docs");
    }

    #[test]
    fn no_matches_yields_none_and_zero() {
        let root = sample();
        assert!(filter_tree(&root, "zzz").is_none());
        assert_eq!(count_matches(&root, "zzz"), 0);
    }

    #[test]
    fn filtered_counts_are_not_recomputed() {
        let root = sample();
        let filtered = filter_tree(&root, "guide").unwrap();
        // The root copy keeps its original rollups by design.
        assert_eq!(filtered.as_directory().unwrap().file_count, 4);
    }

    #[test]
    fn count_with_empty_query_uses_rollup() {
        let root = sample();
        assert_eq!(count_matches(&root, ""), 4);
    }

    #[test]
    fn select_directory_walks_segments() {
        let root = sample();
        let app = select_directory(&root, "src/app").unwrap();
        assert_eq!(app.as_directory().unwrap().file_count, 1);
        assert!(select_directory(&root, "").is_some());
        assert!(select_directory(&root, "src/missing").is_none());
    }
}
