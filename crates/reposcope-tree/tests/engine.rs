//! End-to-end properties of the tree engine: build, aggregate, filter,
//! serialize.

use std::collections::BTreeSet;

use reposcope_core::{Node, TreeEntry};
use reposcope_tree::{
    aggregate, build_tree, count_matches, filter_tree, serialize_tree, TreeFormat,
};

/// Recursively verify that every directory's rollups equal the sums over
/// its own children.
fn assert_rollups(node: &Node) {
    let Node::Directory(dir) = node else {
        return;
    };
    let mut files = 0;
    let mut dirs = 0;
    let mut size = 0;
    for child in &dir.children {
        match child {
            Node::File(f) => {
                files += 1;
                size += f.size;
            }
            Node::Directory(d) => {
                files += d.file_count;
                dirs += d.directory_count + 1;
                size += d.size;
            }
        }
        assert_rollups(child);
    }
    assert_eq!(dir.file_count, files, "file count at {}", dir.path);
    assert_eq!(dir.directory_count, dirs, "directory count at {}", dir.path);
    assert_eq!(dir.size, size, "size at {}", dir.path);
}

/// Recursively verify sibling ordering: directories first, both groups in
/// name order.
fn assert_ordering(node: &Node) {
    let Node::Directory(dir) = node else {
        return;
    };
    let first_file = dir
        .children
        .iter()
        .position(|c| !c.is_directory())
        .unwrap_or(dir.children.len());
    for (idx, child) in dir.children.iter().enumerate() {
        assert_eq!(
            child.is_directory(),
            idx < first_file,
            "directories must precede files at {}",
            dir.path
        );
        assert_ordering(child);
    }
    for group in [&dir.children[..first_file], &dir.children[first_file..]] {
        for pair in group.windows(2) {
            let a = pair[0].name().to_lowercase();
            let b = pair[1].name().to_lowercase();
            assert!(a <= b, "unsorted siblings at {}: {a} > {b}", dir.path);
        }
    }
}

fn collect_file_paths(node: &Node, out: &mut BTreeSet<String>) {
    match node {
        Node::File(f) => {
            out.insert(f.path.clone());
        }
        Node::Directory(d) => {
            for child in &d.children {
                collect_file_paths(child, out);
            }
        }
    }
}

fn sample_entries() -> Vec<TreeEntry> {
    vec![
        TreeEntry::blob("src/index.ts", 120),
        TreeEntry::blob("src/components/App.tsx", 300),
        TreeEntry::blob("src/components/Button.tsx", 150),
        TreeEntry::tree("src"),
        TreeEntry::tree("src/components"),
        TreeEntry::blob("docs/intro.md", 500),
        TreeEntry::blob("README.md", 40),
        TreeEntry::blob("Makefile", 25),
    ]
}

#[test]
fn rollup_and_ordering_invariants_hold() {
    let root = build_tree(&sample_entries(), "repo").unwrap();
    assert_rollups(&root);
    assert_ordering(&root);
}

#[test]
fn invariants_hold_without_explicit_directory_rows() {
    let entries: Vec<TreeEntry> = sample_entries()
        .into_iter()
        .filter(|e| e.size.is_some())
        .collect();
    let root = build_tree(&entries, "repo").unwrap();
    assert_rollups(&root);
    assert_ordering(&root);

    // Synthesized directories are indistinguishable from explicit ones.
    assert_eq!(root, build_tree(&sample_entries(), "repo").unwrap());
}

#[test]
fn ancestor_synthesis_from_a_single_deep_blob() {
    let root = build_tree(&[TreeEntry::blob("a/b/c.txt", 9)], "repo").unwrap();
    let mut paths = BTreeSet::new();
    collect_dir_paths(&root, &mut paths);
    assert!(paths.contains("a"));
    assert!(paths.contains("a/b"));

    let a = root.as_directory().unwrap().children[0].as_directory().unwrap();
    assert_eq!(a.file_count, 1);
}

fn collect_dir_paths(node: &Node, out: &mut BTreeSet<String>) {
    if let Node::Directory(d) = node {
        if !d.path.is_empty() {
            out.insert(d.path.clone());
        }
        for child in &d.children {
            collect_dir_paths(child, out);
        }
    }
}

#[test]
fn ignored_paths_never_reach_the_tree() {
    let mut entries = sample_entries();
    entries.push(TreeEntry::blob("node_modules/pkg/index.js", 5000));
    entries.push(TreeEntry::tree("node_modules"));
    entries.push(TreeEntry::blob("src/.cache/tmp.bin", 10));

    let root = build_tree(&entries, "repo").unwrap();
    let mut files = BTreeSet::new();
    collect_file_paths(&root, &mut files);
    assert!(files.iter().all(|p| !p.contains("node_modules")));
    assert!(files.iter().all(|p| !p.contains(".cache")));
    assert_eq!(root, build_tree(&sample_entries(), "repo").unwrap());
}

#[test]
fn filter_is_identity_on_empty_query_and_idempotent() {
    let root = build_tree(&sample_entries(), "repo").unwrap();
    assert_eq!(filter_tree(&root, "").unwrap(), root);

    let once = filter_tree(&root, "tsx").unwrap();
    let twice = filter_tree(&once, "tsx").unwrap();
    assert_eq!(once, twice);
}

#[test]
fn paths_serialization_round_trips() {
    let root = build_tree(&sample_entries(), "repo").unwrap();
    let mut expected = BTreeSet::new();
    collect_file_paths(&root, &mut expected);

    let rendered: Vec<String> = serialize_tree(&root, TreeFormat::Paths)
        .lines()
        .map(|line| {
            // Each line joins ancestor names from the root label down.
            line.strip_prefix("repo/").unwrap().to_string()
        })
        .collect();

    assert_eq!(rendered.len(), expected.len(), "one line per file");
    let rendered_set: BTreeSet<String> = rendered.into_iter().collect();
    assert_eq!(rendered_set, expected);
}

#[test]
fn documented_scenario_builds_and_aggregates() {
    let entries = vec![
        TreeEntry::blob("src/index.ts", 120),
        TreeEntry::blob("README.md", 40),
        TreeEntry::tree("src"),
    ];
    let root = build_tree(&entries, "repo").unwrap();

    let dir = root.as_directory().unwrap();
    assert_eq!(dir.name, "repo");
    let src = dir.children[0].as_directory().unwrap();
    assert_eq!((src.file_count, src.size), (1, 120));
    let readme = dir.children[1].as_file().unwrap();
    assert_eq!(readme.size, 40);

    let stats = aggregate(&root);
    assert_eq!(stats.total_files, 2);
    assert_eq!(stats.total_directories, 1);
    assert_eq!(stats.total_size, 160);
    assert_eq!(stats.extension_counts["ts"], 1);
    assert_eq!(stats.extension_counts["md"], 1);

    assert_eq!(count_matches(&root, "index"), 1);
}

#[test]
fn node_modules_scenario_keeps_only_src() {
    let entries = vec![
        TreeEntry::blob("node_modules/pkg/index.js", 100),
        TreeEntry::blob("src/app.js", 50),
    ];
    let root = build_tree(&entries, "repo").unwrap();

    let mut files = BTreeSet::new();
    collect_file_paths(&root, &mut files);
    assert_eq!(files.into_iter().collect::<Vec<_>>(), vec!["src/app.js"]);

    let text = serialize_tree(&root, TreeFormat::Ascii);
    assert!(!text.contains("node_modules"));
}
