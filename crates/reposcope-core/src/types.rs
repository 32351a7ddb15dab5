use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// A repository identified by owner and name.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing. Accepts the short `owner/repo` form as well as full
/// `https://github.com/owner/repo` URLs, stripping a `.git` suffix and
/// trailing slashes.
///
/// # Examples
///
/// ```
/// use reposcope_core::RepoLocator;
///
/// let repo: RepoLocator = "rust-lang/cargo".parse().unwrap();
/// assert_eq!(repo.owner, "rust-lang");
/// assert_eq!(repo.name, "cargo");
///
/// let repo: RepoLocator = "https://github.com/tokio-rs/tokio.git".parse().unwrap();
/// assert_eq!(repo.to_string(), "tokio-rs/tokio");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoLocator {
    /// Account or organization that owns the repository.
    pub owner: String,
    /// Repository name without the owner prefix.
    pub name: String,
}

impl fmt::Display for RepoLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoLocator {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // URL form: anything up to and including "github.com/" is dropped and
        // extra path segments (e.g. /tree/main) are ignored.
        let rest = match trimmed.find("github.com/") {
            Some(idx) => &trimmed[idx + "github.com/".len()..],
            None => trimmed,
        };

        let mut segments = rest.split('/').filter(|part| !part.is_empty());
        let owner = segments.next();
        let name = segments.next();
        let extra = segments.next();

        // The short form must be exactly owner/repo.
        if !trimmed.contains("github.com/") && extra.is_some() {
            return Err(ScopeError::InvalidRepo(trimmed.to_string()));
        }

        match (owner, name) {
            (Some(owner), Some(name)) => {
                let name = name.strip_suffix(".git").unwrap_or(name);
                if name.is_empty() {
                    return Err(ScopeError::InvalidRepo(trimmed.to_string()));
                }
                Ok(RepoLocator {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ScopeError::InvalidRepo(trimmed.to_string())),
        }
    }
}

/// The kind of a raw git-tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file.
    Blob,
    /// A directory.
    Tree,
}

/// One row of a recursive git-tree response, validated at the fetch boundary.
///
/// Entries arrive in arbitrary order and may omit intermediate directories
/// (`a/b/c.txt` can be present without standalone `a` or `a/b` rows).
///
/// # Examples
///
/// ```
/// use reposcope_core::TreeEntry;
///
/// let entry = TreeEntry::blob("src/main.rs", 120);
/// assert_eq!(entry.path, "src/main.rs");
/// assert_eq!(entry.size, Some(120));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root, no leading slash.
    pub path: String,
    /// Whether this entry is a file or a directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Size in bytes; present only for blobs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl TreeEntry {
    /// Create a file entry.
    pub fn blob(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Blob,
            size: Some(size),
        }
    }

    /// Create a directory entry.
    pub fn tree(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: EntryKind::Tree,
            size: None,
        }
    }
}

/// A file in the reconstructed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Last path segment.
    pub name: String,
    /// Full slash-joined path from the repository root.
    pub path: String,
    /// Lower-cased extension, if the name contains a dot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Size in bytes as reported by the tree API.
    pub size: u64,
}

/// A directory in the reconstructed tree, with rollup statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryNode {
    /// Last path segment, or the repository label for the root.
    pub name: String,
    /// Full slash-joined path; empty string for the root.
    pub path: String,
    /// Recursive sum of descendant file sizes.
    pub size: u64,
    /// Recursive count of descendant files.
    pub file_count: u64,
    /// Recursive count of descendant directories.
    pub directory_count: u64,
    /// Ordered children: directories first, then files, each sorted by name.
    pub children: Vec<Node>,
}

/// A node of the reconstructed repository tree.
///
/// Serializes with a `kind` tag (`"file"` / `"directory"`) and camelCase
/// fields, so exported JSON matches the analyzer's external shape.
///
/// # Examples
///
/// ```
/// use reposcope_core::{FileNode, Node};
///
/// let node = Node::File(FileNode {
///     name: "main.rs".into(),
///     path: "src/main.rs".into(),
///     extension: Some("rs".into()),
///     size: 120,
/// });
/// assert!(!node.is_directory());
/// assert_eq!(node.name(), "main.rs");
///
/// let json = serde_json::to_value(&node).unwrap();
/// assert_eq!(json["kind"], "file");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Node {
    /// A file leaf.
    File(FileNode),
    /// A directory with ordered children.
    Directory(DirectoryNode),
}

impl Node {
    /// The node's name (last path segment, or the root label).
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Directory(d) => &d.name,
        }
    }

    /// The node's full path (empty string for the root).
    pub fn path(&self) -> &str {
        match self {
            Node::File(f) => &f.path,
            Node::Directory(d) => &d.path,
        }
    }

    /// Size in bytes: own size for files, recursive rollup for directories.
    pub fn size(&self) -> u64 {
        match self {
            Node::File(f) => f.size,
            Node::Directory(d) => d.size,
        }
    }

    /// Returns `true` for directory nodes.
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }

    /// Borrow the file payload, if this is a file.
    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(f) => Some(f),
            Node::Directory(_) => None,
        }
    }

    /// Borrow the directory payload, if this is a directory.
    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Node::Directory(d) => Some(d),
            Node::File(_) => None,
        }
    }
}

/// Aggregate statistics derived from one full tree traversal.
///
/// The root directory is excluded from `total_directories`. Maps are keyed by
/// lower-cased extension, with extension-less files bucketed under `no-ext`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of files in the tree.
    pub total_files: u64,
    /// Number of directories in the tree, root excluded.
    pub total_directories: u64,
    /// Sum of all file sizes in bytes.
    pub total_size: u64,
    /// File count per extension.
    pub extension_counts: BTreeMap<String, u64>,
    /// Byte total per extension.
    pub extension_sizes: BTreeMap<String, u64>,
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument
/// parsing.
///
/// # Examples
///
/// ```
/// use reposcope_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and summaries.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown-formatted output.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
