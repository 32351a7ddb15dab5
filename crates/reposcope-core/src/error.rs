/// Errors that can occur across the reposcope crates.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette::Result` at the boundary.
///
/// # Examples
///
/// ```
/// use reposcope_core::ScopeError;
///
/// let err = ScopeError::Config("missing token".into());
/// assert!(err.to_string().contains("missing token"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// GitHub API or network failure.
    #[error("GitHub API error: {0}")]
    Api(String),

    /// A repository reference that could not be parsed.
    #[error("invalid repository '{0}', expected owner/repo or a github.com URL")]
    InvalidRepo(String),

    /// A directory path that does not exist in the fetched tree.
    #[error("path not found in repository tree: {0}")]
    PathNotFound(String),

    /// A tree entry with an empty path.
    #[error("tree entry with an empty path")]
    EmptyPath,

    /// The same path appeared twice in the entry list.
    #[error("duplicate tree entry: {0}")]
    DuplicateEntry(String),

    /// A blob and a tree claim the same path, or a file is used as a directory.
    #[error("path collides with an entry of the other kind: {0}")]
    PathCollision(String),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ScopeError = io_err.into();
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn config_error_displays_message() {
        let err = ScopeError::Config("bad value".into());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn duplicate_entry_shows_path() {
        let err = ScopeError::DuplicateEntry("src/main.rs".into());
        assert!(err.to_string().contains("src/main.rs"));
    }

    #[test]
    fn invalid_repo_shows_input() {
        let err = ScopeError::InvalidRepo("not-a-repo".into());
        assert!(err.to_string().contains("not-a-repo"));
    }
}
