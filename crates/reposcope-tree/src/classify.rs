//! Path segment classification: ignored directories and file extensions.

/// Directory names whose entire subtree is excluded from built trees.
pub const IGNORED_DIRS: [&str; 9] = [
    ".git",
    "node_modules",
    ".next",
    "dist",
    "build",
    ".cache",
    "__pycache__",
    ".venv",
    "venv",
];

/// Bucket name for files without an extension.
pub const NO_EXT: &str = "no-ext";

/// Check whether a single path segment names an ignored directory.
///
/// # Examples
///
/// ```
/// use reposcope_tree::classify::is_ignored_segment;
///
/// assert!(is_ignored_segment("node_modules", &[]));
/// assert!(is_ignored_segment("target", &["target".into()]));
/// assert!(!is_ignored_segment("src", &[]));
/// ```
pub fn is_ignored_segment(segment: &str, extra: &[String]) -> bool {
    IGNORED_DIRS.contains(&segment) || extra.iter().any(|e| e == segment)
}

/// Check whether any segment of a slash-separated path is ignored.
///
/// An entry whose path contains an ignored segment anywhere is dropped
/// entirely, including entries nested beneath it.
///
/// # Examples
///
/// ```
/// use reposcope_tree::classify::path_is_ignored;
///
/// assert!(path_is_ignored("node_modules/pkg/index.js", &[]));
/// assert!(path_is_ignored("src/__pycache__/mod.pyc", &[]));
/// assert!(!path_is_ignored("src/app.js", &[]));
/// ```
pub fn path_is_ignored(path: &str, extra: &[String]) -> bool {
    path.split('/').any(|segment| is_ignored_segment(segment, extra))
}

/// Derive a lower-cased extension from a file name.
///
/// Returns `None` when the name contains no dot or ends with one; callers
/// treat `None` as the [`NO_EXT`] bucket.
///
/// # Examples
///
/// ```
/// use reposcope_tree::classify::extension_of;
///
/// assert_eq!(extension_of("main.RS"), Some("rs".into()));
/// assert_eq!(extension_of("archive.tar.gz"), Some("gz".into()));
/// assert_eq!(extension_of(".gitignore"), Some("gitignore".into()));
/// assert_eq!(extension_of("Makefile"), None);
/// ```
pub fn extension_of(name: &str) -> Option<String> {
    let (_, suffix) = name.rsplit_once('.')?;
    if suffix.is_empty() {
        return None;
    }
    Some(suffix.to_lowercase())
}
