use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ScopeError;

/// Top-level configuration loaded from `.reposcope.toml`.
///
/// Resolution order for each setting: CLI flags > environment > config file
/// > defaults.
///
/// # Examples
///
/// ```
/// use reposcope_core::ScopeConfig;
///
/// let config = ScopeConfig::default();
/// assert_eq!(config.cache.ttl_secs, 3600);
/// assert!(config.cache.enabled);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,
    /// Local analysis cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// Tree-construction settings.
    #[serde(default)]
    pub tree: TreeSettings,
}

impl ScopeConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Io`] if the file cannot be read, or
    /// [`ScopeError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use reposcope_core::ScopeConfig;
    ///
    /// let config = ScopeConfig::from_file(Path::new(".reposcope.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, ScopeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use reposcope_core::ScopeConfig;
    ///
    /// let toml = r#"
    /// [cache]
    /// ttl_secs = 600
    /// "#;
    /// let config = ScopeConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.cache.ttl_secs, 600);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, ScopeError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }
}

/// GitHub API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Personal access token; falls back to `GITHUB_TOKEN` / `GH_TOKEN`.
    pub token: Option<String>,
    /// Base URL for API requests (override for GitHub Enterprise).
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_api_base() -> String {
    "https://api.github.com".into()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base: default_api_base(),
        }
    }
}

/// Local analysis cache configuration.
///
/// # Examples
///
/// ```
/// use reposcope_core::CacheConfig;
///
/// let config = CacheConfig::default();
/// assert!(config.enabled);
/// assert_eq!(config.max_recent, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether fetched analyses are cached on disk (default: true).
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Time-to-live for cached analyses in seconds (default: 3600).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Cache directory; defaults to the platform cache dir.
    pub dir: Option<PathBuf>,
    /// How many recently analyzed repositories to remember (default: 10).
    #[serde(default = "default_max_recent")]
    pub max_recent: usize,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_recent() -> usize {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_ttl_secs(),
            dir: None,
            max_recent: default_max_recent(),
        }
    }
}

/// Tree-construction configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreeSettings {
    /// Directory names to exclude in addition to the built-in ignore set.
    #[serde(default)]
    pub extra_ignored_dirs: Vec<String>,
}
