//! Aggregate statistics derived from a built tree.

use reposcope_core::{FileNode, Node, Stats};

use crate::classify::NO_EXT;

/// Compute global statistics from one full traversal of the tree.
///
/// Files are bucketed by extension (extension-less files under `no-ext`);
/// the root is excluded from the directory count. An empty tree yields
/// all-zero stats with empty maps.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{aggregate, build_tree};
///
/// let entries = vec![
///     TreeEntry::blob("src/index.ts", 120),
///     TreeEntry::blob("README.md", 40),
///     TreeEntry::tree("src"),
/// ];
/// let root = build_tree(&entries, "repo").unwrap();
/// let stats = aggregate(&root);
/// assert_eq!(stats.total_files, 2);
/// assert_eq!(stats.total_directories, 1);
/// assert_eq!(stats.total_size, 160);
/// assert_eq!(stats.extension_counts["ts"], 1);
/// assert_eq!(stats.extension_counts["md"], 1);
/// ```
pub fn aggregate(root: &Node) -> Stats {
    let mut stats = Stats::default();
    walk(root, &mut stats);
    stats
}

fn walk(node: &Node, stats: &mut Stats) {
    match node {
        Node::File(file) => {
            stats.total_files += 1;
            stats.total_size += file.size;
            let ext = file.extension.as_deref().unwrap_or(NO_EXT);
            *stats.extension_counts.entry(ext.to_string()).or_default() += 1;
            *stats.extension_sizes.entry(ext.to_string()).or_default() += file.size;
        }
        Node::Directory(dir) => {
            if !dir.path.is_empty() {
                stats.total_directories += 1;
            }
            for child in &dir.children {
                walk(child, stats);
            }
        }
    }
}

/// The `limit` largest files in the tree, size-descending.
///
/// Ties break on path so the result is deterministic.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{build_tree, top_largest_files};
///
/// let entries = vec![
///     TreeEntry::blob("big.bin", 900),
///     TreeEntry::blob("small.txt", 10),
/// ];
/// let root = build_tree(&entries, "repo").unwrap();
/// let top = top_largest_files(&root, 1);
/// assert_eq!(top[0].path, "big.bin");
/// ```
pub fn top_largest_files(root: &Node, limit: usize) -> Vec<&FileNode> {
    let mut files = Vec::new();
    collect_files(root, &mut files);
    files.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
    files.truncate(limit);
    files
}

fn collect_files<'a>(node: &'a Node, out: &mut Vec<&'a FileNode>) {
    match node {
        Node::File(file) => out.push(file),
        Node::Directory(dir) => {
            for child in &dir.children {
                collect_files(child, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_tree;
    use reposcope_core::TreeEntry;

    #[test]
    fn empty_tree_has_zero_stats() {
        let root = build_tree(&[], "repo").unwrap();
        let stats = aggregate(&root);
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn extensionless_files_bucket_under_no_ext() {
        let root = build_tree(
            &[TreeEntry::blob("Makefile", 25), TreeEntry::blob("LICENSE", 35)],
            "repo",
        )
        .unwrap();
        let stats = aggregate(&root);
        assert_eq!(stats.extension_counts[NO_EXT], 2);
        assert_eq!(stats.extension_sizes[NO_EXT], 60);
    }

    #[test]
    fn directories_counted_recursively_excluding_root() {
        let root = build_tree(
            &[
                TreeEntry::blob("a/b/c/deep.rs", 10),
                TreeEntry::blob("a/top.rs", 5),
            ],
            "repo",
        )
        .unwrap();
        let stats = aggregate(&root);
        assert_eq!(stats.total_directories, 3);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_size, 15);
    }

    #[test]
    fn extension_totals_accumulate() {
        let root = build_tree(
            &[
                TreeEntry::blob("a.rs", 100),
                TreeEntry::blob("b.rs", 50),
                TreeEntry::blob("c.md", 10),
            ],
            "repo",
        )
        .unwrap();
        let stats = aggregate(&root);
        assert_eq!(stats.extension_counts["rs"], 2);
        assert_eq!(stats.extension_sizes["rs"], 150);
        assert_eq!(stats.extension_counts["md"], 1);
    }

    #[test]
    fn largest_files_ordered_and_capped() {
        let root = build_tree(
            &[
                TreeEntry::blob("small.txt", 1),
                TreeEntry::blob("big.bin", 300),
                TreeEntry::blob("mid.rs", 40),
                TreeEntry::blob("also-big.bin", 300),
            ],
            "repo",
        )
        .unwrap();
        let top = top_largest_files(&root, 3);
        let paths: Vec<&str> = top.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["also-big.bin", "big.bin", "mid.rs"]);
    }
}
