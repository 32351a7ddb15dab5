//! Wire models for the GitHub REST responses the explorer reads.
//!
//! Raw structs mirror the API's snake_case JSON; narrowing into the strict
//! core types happens here so nothing loosely shaped crosses into the tree
//! engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reposcope_core::{EntryKind, TreeEntry};

/// Repository metadata, as returned by `GET /repos/{owner}/{repo}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    pub full_name: String,
    /// The branch the tree endpoint should default to.
    pub default_branch: String,
    /// Short description, when the repository has one.
    pub description: Option<String>,
}

/// A branch, as returned by `GET /repos/{owner}/{repo}/branches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    #[serde(default)]
    pub protected: bool,
}

/// A tag, as returned by `GET /repos/{owner}/{repo}/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

/// Raw recursive git-tree response.
#[derive(Debug, Deserialize)]
pub(crate) struct RawTreeResponse {
    pub sha: String,
    pub tree: Vec<RawTreeItem>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTreeItem {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub size: Option<u64>,
}

/// A validated git-tree listing.
///
/// `truncated` is propagated from the API unchanged: it signals that GitHub
/// capped the response (around 100k entries) and the listing is incomplete.
/// No pagination or recovery is attempted.
#[derive(Debug, Clone)]
pub struct TreeSnapshot {
    /// SHA of the tree object the listing describes.
    pub sha: String,
    /// Validated entries; only blobs and trees survive narrowing.
    pub entries: Vec<TreeEntry>,
    /// True when the API truncated the listing.
    pub truncated: bool,
}

impl TreeSnapshot {
    pub(crate) fn from_raw(raw: RawTreeResponse) -> Self {
        let mut entries = Vec::with_capacity(raw.tree.len());
        for item in raw.tree {
            let kind = match item.entry_type.as_str() {
                "blob" => EntryKind::Blob,
                "tree" => EntryKind::Tree,
                // Submodules arrive as "commit" rows; they have no place in
                // the file tree.
                other => {
                    tracing::debug!(path = %item.path, entry_type = other, "dropping tree row");
                    continue;
                }
            };
            entries.push(TreeEntry {
                path: item.path,
                kind,
                size: item.size,
            });
        }
        Self {
            sha: raw.sha,
            entries,
            truncated: raw.truncated,
        }
    }
}

/// Core-API rate limit status, from `GET /rate_limit`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    /// When the window resets.
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRateLimitResponse {
    pub resources: RawRateLimitResources,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRateLimitResources {
    pub core: RawRateLimitWindow,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRateLimitWindow {
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp in seconds.
    pub reset: i64,
}

impl RateLimit {
    pub(crate) fn from_raw(raw: RawRateLimitResponse) -> Self {
        Self {
            limit: raw.resources.core.limit,
            remaining: raw.resources.core.remaining,
            reset_at: DateTime::from_timestamp(raw.resources.core.reset, 0)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_narrowing_keeps_blobs_and_trees() {
        let raw: RawTreeResponse = serde_json::from_str(
            r#"{
                "sha": "abc123",
                "tree": [
                    {"path": "src", "mode": "040000", "type": "tree", "sha": "d1"},
                    {"path": "src/main.rs", "mode": "100644", "type": "blob", "sha": "b1", "size": 120},
                    {"path": "vendored", "mode": "160000", "type": "commit", "sha": "c1"}
                ],
                "truncated": false
            }"#,
        )
        .unwrap();
        let snapshot = TreeSnapshot::from_raw(raw);
        assert_eq!(snapshot.sha, "abc123");
        assert_eq!(snapshot.entries.len(), 2);
        assert_eq!(snapshot.entries[0], TreeEntry::tree("src"));
        assert_eq!(snapshot.entries[1], TreeEntry::blob("src/main.rs", 120));
        assert!(!snapshot.truncated);
    }

    #[test]
    fn truncated_defaults_to_false_and_propagates() {
        let raw: RawTreeResponse =
            serde_json::from_str(r#"{"sha": "x", "tree": []}"#).unwrap();
        assert!(!TreeSnapshot::from_raw(raw).truncated);

        let raw: RawTreeResponse =
            serde_json::from_str(r#"{"sha": "x", "tree": [], "truncated": true}"#).unwrap();
        assert!(TreeSnapshot::from_raw(raw).truncated);
    }

    #[test]
    fn repository_deserializes_wire_fields() {
        let repo: Repository = serde_json::from_str(
            r#"{"full_name": "octocat/hello", "default_branch": "main", "description": null, "stargazers_count": 9}"#,
        )
        .unwrap();
        assert_eq!(repo.full_name, "octocat/hello");
        assert_eq!(repo.default_branch, "main");
        assert!(repo.description.is_none());
    }

    #[test]
    fn rate_limit_converts_reset_timestamp() {
        let raw: RawRateLimitResponse = serde_json::from_str(
            r#"{"resources": {"core": {"limit": 60, "remaining": 58, "reset": 1700000000}}}"#,
        )
        .unwrap();
        let limit = RateLimit::from_raw(raw);
        assert_eq!(limit.remaining, 58);
        assert_eq!(limit.reset_at.timestamp(), 1700000000);
    }
}
