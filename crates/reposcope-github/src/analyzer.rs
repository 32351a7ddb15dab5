//! The fetch-build-aggregate pipeline.
//!
//! Strings the client, cache, and pure tree engine together: resolve the
//! repository and target ref, consult the cache, fetch the recursive tree,
//! reconstruct it, derive statistics, and remember the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reposcope_core::{Node, RepoLocator, Result, ScopeError, Stats};
use reposcope_tree::{aggregate, build_tree_with, scope_to_path};

use crate::cache::AnalysisCache;
use crate::client::GitHubClient;

/// The full outcome of analyzing one repository at one ref.
///
/// This is the record that gets cached, exported as JSON, and consumed by
/// every rendering path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// `owner/repo`.
    pub repo_name: String,
    /// The ref the tree was fetched at (resolved default branch when none
    /// was requested).
    pub ref_name: String,
    /// The reconstructed tree; root label is the repository name (plus the
    /// scoped path, when analysis was scoped to a subdirectory).
    pub tree: Node,
    /// Aggregate statistics over `tree`.
    pub stats: Stats,
    /// True when the API truncated the tree listing (~100k entries); the
    /// analysis covers only what was returned.
    pub truncated: bool,
}

/// An [`AnalysisResult`] plus its cache provenance.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub result: AnalysisResult,
    /// When the result was originally fetched, if it came from the cache.
    pub cached_at: Option<DateTime<Utc>>,
}

/// Knobs for a single analysis run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Branch, tag, or commit SHA; default branch when absent.
    pub ref_name: Option<String>,
    /// Analyze only this subdirectory of the repository.
    pub path: Option<String>,
    /// Skip the cache and fetch fresh data.
    pub force_refresh: bool,
    /// Directory names to ignore in addition to the built-in set.
    pub extra_ignored: Vec<String>,
}

/// Analyze a repository: fetch its tree and derive the node hierarchy and
/// statistics.
///
/// Consults `cache` (scoped by repo, ref, and path) unless
/// `options.force_refresh` is set, and stores fresh results back into it.
///
/// # Errors
///
/// Returns [`ScopeError::Api`] for network and API failures,
/// [`ScopeError::PathNotFound`] when `options.path` does not exist at the
/// target ref, and the tree-construction errors of
/// [`build_tree_with`] for inconsistent listings.
///
/// # Examples
///
/// ```no_run
/// use reposcope_core::RepoLocator;
/// use reposcope_github::{analyze, AnalyzeOptions, GitHubClient};
///
/// # async fn run() -> reposcope_core::Result<()> {
/// let client = GitHubClient::new(None);
/// let repo: RepoLocator = "rust-lang/cargo".parse()?;
/// let analysis = analyze(&client, None, &repo, &AnalyzeOptions::default()).await?;
/// println!("{} files", analysis.result.stats.total_files);
/// # Ok(())
/// # }
/// ```
pub async fn analyze(
    client: &GitHubClient,
    cache: Option<&AnalysisCache>,
    repo: &RepoLocator,
    options: &AnalyzeOptions,
) -> Result<Analysis> {
    let repository = client.get_repository(repo).await?;
    let target_ref = options
        .ref_name
        .clone()
        .unwrap_or_else(|| repository.default_branch.clone());

    let repo_name = repo.to_string();
    // Path-scoped analyses are cached under their own key.
    let cache_ref = match &options.path {
        Some(path) => format!("{target_ref}:{}", path.trim_matches('/')),
        None => target_ref.clone(),
    };

    if !options.force_refresh {
        if let Some(cache) = cache {
            if let Some((result, cached_at)) = cache.get(&repo_name, &cache_ref) {
                tracing::debug!(%repo_name, %cache_ref, "analysis served from cache");
                return Ok(Analysis {
                    result,
                    cached_at: Some(cached_at),
                });
            }
        }
    }

    let snapshot = client.get_tree(repo, &target_ref).await?;
    if snapshot.truncated {
        tracing::warn!(%repo_name, "tree listing was truncated by the API");
    }

    let (entries, root_label) = match &options.path {
        Some(path) => {
            let prefix = path.trim_matches('/');
            let with_slash = format!("{prefix}/");
            let exists = snapshot
                .entries
                .iter()
                .any(|e| e.path == prefix || e.path.starts_with(&with_slash));
            if !exists {
                return Err(ScopeError::PathNotFound(prefix.to_string()));
            }
            (
                scope_to_path(&snapshot.entries, prefix),
                format!("{}/{prefix}", repo.name),
            )
        }
        None => (snapshot.entries, repo.name.clone()),
    };

    let tree = build_tree_with(&entries, &root_label, &options.extra_ignored)?;
    let stats = aggregate(&tree);

    let result = AnalysisResult {
        repo_name,
        ref_name: target_ref,
        tree,
        stats,
        truncated: snapshot.truncated,
    };
    if let Some(cache) = cache {
        cache.put(&result.repo_name, &cache_ref, &result);
    }
    Ok(Analysis {
        result,
        cached_at: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_serializes_camel_case() {
        let result = AnalysisResult {
            repo_name: "octocat/hello".into(),
            ref_name: "main".into(),
            tree: Node::Directory(reposcope_core::DirectoryNode {
                name: "hello".into(),
                path: String::new(),
                size: 0,
                file_count: 0,
                directory_count: 0,
                children: Vec::new(),
            }),
            stats: Stats::default(),
            truncated: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("repoName").is_some());
        assert!(json.get("refName").is_some());
        assert_eq!(json["truncated"], true);
        assert_eq!(json["tree"]["kind"], "directory");
    }
}
