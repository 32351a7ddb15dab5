//! Reconstruction of a rooted [`Node`] hierarchy from flat tree entries.
//!
//! The GitHub tree API returns one flat row per blob/tree, in arbitrary
//! order and with no guarantee that a deep path's intermediate directories
//! have rows of their own. Construction synthesizes missing ancestors on
//! demand, so the result is independent of entry order; sorting by path
//! first is only an aid that makes the common case cheap.

use std::cmp::Ordering;
use std::collections::HashMap;

use reposcope_core::{
    DirectoryNode, EntryKind, FileNode, Node, Result, ScopeError, TreeEntry,
};

use crate::classify::{extension_of, path_is_ignored};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    File,
    Directory,
}

/// A node under construction, addressed by full path.
struct Pending {
    name: String,
    kind: PendingKind,
    size: u64,
    /// False for directories synthesized from a descendant's path. A later
    /// explicit `tree` row for the same path confirms the node instead of
    /// counting as a duplicate.
    explicit: bool,
    /// Child paths in attachment order; ordered properly during assembly.
    children: Vec<String>,
}

/// Build a tree from flat entries using the built-in ignore set.
///
/// See [`build_tree_with`].
pub fn build_tree(entries: &[TreeEntry], root_label: &str) -> Result<Node> {
    build_tree_with(entries, root_label, &[])
}

/// Build a rooted tree from flat git-tree entries.
///
/// Entries whose path contains an ignored directory segment (built-in set
/// plus `extra_ignored`) are dropped entirely. Missing ancestor directories
/// are synthesized. The returned root is a directory with an empty path and
/// `root_label` as its name; every directory carries recursive
/// file/directory counts and a cumulative size, and children are ordered
/// directories-first, each group sorted by name.
///
/// # Errors
///
/// - [`ScopeError::EmptyPath`] for an entry with an empty path or segment.
/// - [`ScopeError::DuplicateEntry`] when the same path appears twice.
/// - [`ScopeError::PathCollision`] when a blob and a tree claim the same
///   path, or a file would have to serve as an ancestor directory.
///
/// A consistent git tree produces none of these.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::build_tree;
///
/// let entries = vec![
///     TreeEntry::blob("src/main.rs", 120),
///     TreeEntry::blob("README.md", 40),
/// ];
/// let root = build_tree(&entries, "demo").unwrap();
/// let dir = root.as_directory().unwrap();
/// assert_eq!(dir.file_count, 2);
/// assert_eq!(dir.directory_count, 1);
/// assert_eq!(dir.size, 160);
/// ```
pub fn build_tree_with(
    entries: &[TreeEntry],
    root_label: &str,
    extra_ignored: &[String],
) -> Result<Node> {
    let mut kept: Vec<&TreeEntry> = entries
        .iter()
        .filter(|entry| !path_is_ignored(&entry.path, extra_ignored))
        .collect();
    tracing::debug!(
        total = entries.len(),
        kept = kept.len(),
        "building repository tree"
    );

    // Best-effort ordering so parents usually precede children; correctness
    // does not depend on it.
    kept.sort_by(|a, b| a.path.cmp(&b.path));

    let mut nodes: HashMap<String, Pending> = HashMap::new();
    nodes.insert(
        String::new(),
        Pending {
            name: root_label.to_string(),
            kind: PendingKind::Directory,
            size: 0,
            explicit: true,
            children: Vec::new(),
        },
    );

    for entry in kept {
        if entry.path.is_empty() || entry.path.split('/').any(str::is_empty) {
            return Err(ScopeError::EmptyPath);
        }

        let (parent_path, name) = match entry.path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", entry.path.as_str()),
        };
        ensure_directory_chain(&mut nodes, parent_path)?;

        match entry.kind {
            EntryKind::Tree => {
                if let Some(existing) = nodes.get_mut(&entry.path) {
                    match existing.kind {
                        PendingKind::Directory if existing.explicit => {
                            return Err(ScopeError::DuplicateEntry(entry.path.clone()));
                        }
                        PendingKind::Directory => {
                            // Synthesized earlier from a descendant; the
                            // explicit row confirms it.
                            existing.explicit = true;
                        }
                        PendingKind::File => {
                            return Err(ScopeError::PathCollision(entry.path.clone()));
                        }
                    }
                    continue;
                }
                nodes.insert(
                    entry.path.clone(),
                    Pending {
                        name: name.to_string(),
                        kind: PendingKind::Directory,
                        size: 0,
                        explicit: true,
                        children: Vec::new(),
                    },
                );
                attach_child(&mut nodes, parent_path, &entry.path);
            }
            EntryKind::Blob => {
                if let Some(existing) = nodes.get(&entry.path) {
                    return Err(match existing.kind {
                        PendingKind::File => ScopeError::DuplicateEntry(entry.path.clone()),
                        PendingKind::Directory => ScopeError::PathCollision(entry.path.clone()),
                    });
                }
                nodes.insert(
                    entry.path.clone(),
                    Pending {
                        name: name.to_string(),
                        kind: PendingKind::File,
                        size: entry.size.unwrap_or(0),
                        explicit: true,
                        children: Vec::new(),
                    },
                );
                attach_child(&mut nodes, parent_path, &entry.path);
            }
        }
    }

    Ok(assemble(&mut nodes, ""))
}

/// Synthesize every missing directory from the nearest existing ancestor
/// down to `dir_path`, attaching each as it is created.
fn ensure_directory_chain(nodes: &mut HashMap<String, Pending>, dir_path: &str) -> Result<()> {
    if dir_path.is_empty() {
        return Ok(());
    }
    let mut current = String::new();
    for segment in dir_path.split('/') {
        let parent = current.clone();
        if !current.is_empty() {
            current.push('/');
        }
        current.push_str(segment);

        match nodes.get(&current) {
            Some(existing) if existing.kind == PendingKind::File => {
                return Err(ScopeError::PathCollision(current));
            }
            Some(_) => {}
            None => {
                nodes.insert(
                    current.clone(),
                    Pending {
                        name: segment.to_string(),
                        kind: PendingKind::Directory,
                        size: 0,
                        explicit: false,
                        children: Vec::new(),
                    },
                );
                attach_child(nodes, &parent, &current);
            }
        }
    }
    Ok(())
}

fn attach_child(nodes: &mut HashMap<String, Pending>, parent_path: &str, child_path: &str) {
    if let Some(parent) = nodes.get_mut(parent_path) {
        parent.children.push(child_path.to_string());
    }
}

/// Bottom-up pass: take ownership of each pending node, assemble children
/// first, then compute rollups and order siblings.
fn assemble(nodes: &mut HashMap<String, Pending>, path: &str) -> Node {
    let pending = nodes
        .remove(path)
        .expect("attached child paths always have a pending node");
    match pending.kind {
        PendingKind::File => Node::File(FileNode {
            extension: extension_of(&pending.name),
            name: pending.name,
            path: path.to_string(),
            size: pending.size,
        }),
        PendingKind::Directory => {
            let mut children: Vec<Node> = Vec::with_capacity(pending.children.len());
            for child_path in &pending.children {
                children.push(assemble(nodes, child_path));
            }

            let mut file_count = 0;
            let mut directory_count = 0;
            let mut size = 0;
            for child in &children {
                match child {
                    Node::File(f) => {
                        file_count += 1;
                        size += f.size;
                    }
                    Node::Directory(d) => {
                        file_count += d.file_count;
                        directory_count += d.directory_count + 1;
                        size += d.size;
                    }
                }
            }
            children.sort_by(compare_siblings);

            Node::Directory(DirectoryNode {
                name: pending.name,
                path: path.to_string(),
                size,
                file_count,
                directory_count,
                children,
            })
        }
    }
}

/// Directories before files; within each group, name order.
fn compare_siblings(a: &Node, b: &Node) -> Ordering {
    match (a.is_directory(), b.is_directory()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    }
}

/// Case-insensitive name comparison with a raw tiebreak, approximating
/// locale collation deterministically.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Retain only the entries under `prefix` and strip the prefix, so a
/// subdirectory can be analyzed as its own root.
///
/// The prefix directory's own row (if present) is dropped; it becomes the
/// new root. An empty prefix returns the entries unchanged.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::scope_to_path;
///
/// let entries = vec![
///     TreeEntry::tree("src"),
///     TreeEntry::blob("src/main.rs", 10),
///     TreeEntry::blob("README.md", 5),
/// ];
/// let scoped = scope_to_path(&entries, "src");
/// assert_eq!(scoped.len(), 1);
/// assert_eq!(scoped[0].path, "main.rs");
/// ```
pub fn scope_to_path(entries: &[TreeEntry], prefix: &str) -> Vec<TreeEntry> {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        return entries.to_vec();
    }
    let with_slash = format!("{prefix}/");
    entries
        .iter()
        .filter_map(|entry| {
            entry.path.strip_prefix(&with_slash).map(|rest| TreeEntry {
                path: rest.to_string(),
                kind: entry.kind,
                size: entry.size,
            })
        })
        .collect()
}
