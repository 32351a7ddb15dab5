//! Textual rendering of a built tree.

use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

use reposcope_core::Node;

/// Textual tree formats.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing; unknown names are rejected at parse time.
///
/// # Examples
///
/// ```
/// use reposcope_tree::TreeFormat;
///
/// let fmt: TreeFormat = "paths".parse().unwrap();
/// assert_eq!(fmt, TreeFormat::Paths);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeFormat {
    /// Box-drawing tree, directories suffixed with `/`.
    #[default]
    Ascii,
    /// Indented bullet list with folder/file glyphs.
    Markdown,
    /// Flat newline-separated file paths, root label included.
    Paths,
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeFormat::Ascii => write!(f, "ascii"),
            TreeFormat::Markdown => write!(f, "markdown"),
            TreeFormat::Paths => write!(f, "paths"),
        }
    }
}

impl FromStr for TreeFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ascii" => Ok(TreeFormat::Ascii),
            "markdown" | "md" => Ok(TreeFormat::Markdown),
            "paths" => Ok(TreeFormat::Paths),
            other => Err(format!("unknown tree format: {other}")),
        }
    }
}

/// Render the tree to text in the requested format.
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
/// use reposcope_tree::{build_tree, serialize_tree, TreeFormat};
///
/// let root = build_tree(&[TreeEntry::blob("src/main.rs", 10)], "demo").unwrap();
/// let text = serialize_tree(&root, TreeFormat::Ascii);
/// assert!(text.starts_with("demo/\n"));
/// assert!(text.contains("main.rs"));
/// ```
pub fn serialize_tree(root: &Node, format: TreeFormat) -> String {
    let mut out = String::new();
    match format {
        TreeFormat::Ascii => {
            let _ = writeln!(out, "{}/", root.name());
            if let Node::Directory(dir) = root {
                let count = dir.children.len();
                for (idx, child) in dir.children.iter().enumerate() {
                    ascii_node(&mut out, child, "", idx == count - 1);
                }
            }
        }
        TreeFormat::Markdown => markdown_node(&mut out, root, 0),
        TreeFormat::Paths => paths_node(&mut out, root, ""),
    }
    out
}

fn ascii_node(out: &mut String, node: &Node, prefix: &str, is_last: bool) {
    let connector = if is_last {
        "\u{2514}\u{2500}\u{2500} "
    } else {
        "\u{251c}\u{2500}\u{2500} "
    };
    if node.is_directory() {
        let _ = writeln!(out, "{prefix}{connector}{}/", node.name());
    } else {
        let _ = writeln!(out, "{prefix}{connector}{}", node.name());
    }

    if let Node::Directory(dir) = node {
        let extension = if is_last { "    " } else { "\u{2502}   " };
        let child_prefix = format!("{prefix}{extension}");
        let count = dir.children.len();
        for (idx, child) in dir.children.iter().enumerate() {
            ascii_node(out, child, &child_prefix, idx == count - 1);
        }
    }
}

fn markdown_node(out: &mut String, node: &Node, depth: usize) {
    let glyph = if node.is_directory() {
        "\u{1f4c1}"
    } else {
        "\u{1f4c4}"
    };
    let _ = writeln!(out, "{}- {glyph} {}", "  ".repeat(depth), node.name());

    if let Node::Directory(dir) = node {
        for child in &dir.children {
            markdown_node(out, child, depth + 1);
        }
    }
}

fn paths_node(out: &mut String, node: &Node, ancestors: &str) {
    let joined = if ancestors.is_empty() {
        node.name().to_string()
    } else {
        format!("{ancestors}/{}", node.name())
    };
    match node {
        Node::File(_) => {
            let _ = writeln!(out, "{joined}");
        }
        Node::Directory(dir) => {
            for child in &dir.children {
                paths_node(out, child, &joined);
            }
        }
    }
}
