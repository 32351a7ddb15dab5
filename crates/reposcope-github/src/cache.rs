//! TTL cache for analysis results and the recent-repositories list.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analyzer::AnalysisResult;
use crate::store::KeyValueStore;

const CACHE_KEY_PREFIX: &str = "analysis:";
const RECENT_KEY: &str = "recent-repos";

/// A cached analysis with its expiry envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheEntry {
    data: AnalysisResult,
    cached_at: DateTime<Utc>,
    ttl_secs: u64,
}

/// TTL'd analysis cache keyed by `owner/repo@ref`.
///
/// Expiry is checked on read; expired entries are removed. Storage failures
/// degrade the cache silently — a failed write never fails an analysis.
pub struct AnalysisCache {
    store: Arc<dyn KeyValueStore>,
    ttl_secs: u64,
}

impl AnalysisCache {
    pub fn new(store: Arc<dyn KeyValueStore>, ttl_secs: u64) -> Self {
        Self { store, ttl_secs }
    }

    fn key(repo_name: &str, ref_name: &str) -> String {
        format!("{CACHE_KEY_PREFIX}{repo_name}@{ref_name}")
    }

    /// Look up a fresh cached analysis, returning it with its timestamp.
    pub fn get(&self, repo_name: &str, ref_name: &str) -> Option<(AnalysisResult, DateTime<Utc>)> {
        let key = Self::key(repo_name, ref_name);
        let raw = self.store.get(&key)?;
        let Ok(entry) = serde_json::from_str::<CacheEntry>(&raw) else {
            // Unreadable entries (older formats) are dropped.
            let _ = self.store.remove(&key);
            return None;
        };

        let age = Utc::now().signed_duration_since(entry.cached_at);
        if age.num_seconds() < 0 || age.num_seconds() as u64 > entry.ttl_secs {
            let _ = self.store.remove(&key);
            return None;
        }
        Some((entry.data, entry.cached_at))
    }

    /// Store an analysis under `repo_name@ref_name`, stamped now.
    pub fn put(&self, repo_name: &str, ref_name: &str, result: &AnalysisResult) {
        let entry = CacheEntry {
            data: result.clone(),
            cached_at: Utc::now(),
            ttl_secs: self.ttl_secs,
        };
        let Ok(serialized) = serde_json::to_string(&entry) else {
            return;
        };
        if let Err(err) = self.store.set(&Self::key(repo_name, ref_name), &serialized) {
            tracing::warn!(%err, "failed to write analysis cache");
        }
    }

    /// Drop a cached analysis, if present.
    pub fn invalidate(&self, repo_name: &str, ref_name: &str) {
        let _ = self.store.remove(&Self::key(repo_name, ref_name));
    }
}

/// One entry of the recently-analyzed list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentRepo {
    /// `owner/repo`.
    pub repo_name: String,
    /// Ref the analysis ran against, when one was chosen explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ref_name: Option<String>,
    /// When the analysis ran.
    pub analyzed_at: DateTime<Utc>,
}

/// Most-recent-first list of analyzed repositories, deduplicated by name
/// and capped.
pub struct RecentRepos {
    store: Arc<dyn KeyValueStore>,
    max: usize,
}

impl RecentRepos {
    pub fn new(store: Arc<dyn KeyValueStore>, max: usize) -> Self {
        Self { store, max }
    }

    /// The remembered repositories, most recent first.
    pub fn list(&self) -> Vec<RecentRepo> {
        self.store
            .get(RECENT_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    /// Record an analysis, moving the repository to the front.
    pub fn record(&self, repo_name: &str, ref_name: Option<&str>) {
        let mut recent = self.list();
        recent.retain(|r| r.repo_name != repo_name);
        recent.insert(
            0,
            RecentRepo {
                repo_name: repo_name.to_string(),
                ref_name: ref_name.map(str::to_string),
                analyzed_at: Utc::now(),
            },
        );
        recent.truncate(self.max);

        let Ok(serialized) = serde_json::to_string(&recent) else {
            return;
        };
        if let Err(err) = self.store.set(RECENT_KEY, &serialized) {
            tracing::warn!(%err, "failed to write recent repositories");
        }
    }

    /// Forget all remembered repositories.
    pub fn clear(&self) {
        let _ = self.store.remove(RECENT_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use reposcope_core::{DirectoryNode, Node, Stats};

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            repo_name: "octocat/hello".into(),
            ref_name: "main".into(),
            tree: Node::Directory(DirectoryNode {
                name: "hello".into(),
                path: String::new(),
                size: 0,
                file_count: 0,
                directory_count: 0,
                children: Vec::new(),
            }),
            stats: Stats::default(),
            truncated: false,
        }
    }

    #[test]
    fn cache_roundtrips_fresh_entries() {
        let cache = AnalysisCache::new(Arc::new(MemoryStore::new()), 3600);
        assert!(cache.get("octocat/hello", "main").is_none());

        cache.put("octocat/hello", "main", &sample_result());
        let (result, _cached_at) = cache.get("octocat/hello", "main").unwrap();
        assert_eq!(result.repo_name, "octocat/hello");

        // Keys are per-ref.
        assert!(cache.get("octocat/hello", "dev").is_none());
    }

    #[test]
    fn expired_entries_are_removed() {
        let store = Arc::new(MemoryStore::new());
        let cache = AnalysisCache::new(store.clone(), 3600);

        let entry = CacheEntry {
            data: sample_result(),
            cached_at: Utc::now() - chrono::Duration::seconds(7200),
            ttl_secs: 3600,
        };
        store
            .set(
                "analysis:octocat/hello@main",
                &serde_json::to_string(&entry).unwrap(),
            )
            .unwrap();

        assert!(cache.get("octocat/hello", "main").is_none());
        // The stale payload was dropped from the store too.
        assert!(store.get("analysis:octocat/hello@main").is_none());
    }

    #[test]
    fn unreadable_entries_are_dropped() {
        let store = Arc::new(MemoryStore::new());
        let cache = AnalysisCache::new(store.clone(), 3600);
        store.set("analysis:octocat/hello@main", "not json").unwrap();

        assert!(cache.get("octocat/hello", "main").is_none());
        assert!(store.get("analysis:octocat/hello@main").is_none());
    }

    #[test]
    fn invalidate_forces_the_next_fetch() {
        let cache = AnalysisCache::new(Arc::new(MemoryStore::new()), 3600);
        cache.put("octocat/hello", "main", &sample_result());
        cache.invalidate("octocat/hello", "main");
        assert!(cache.get("octocat/hello", "main").is_none());
    }

    #[test]
    fn recent_repos_dedupe_and_cap() {
        let recent = RecentRepos::new(Arc::new(MemoryStore::new()), 3);

        recent.record("a/one", None);
        recent.record("b/two", Some("dev"));
        recent.record("c/three", None);
        recent.record("a/one", Some("main")); // moves to front
        recent.record("d/four", None);

        let list = recent.list();
        let names: Vec<&str> = list.iter().map(|r| r.repo_name.as_str()).collect();
        assert_eq!(names, vec!["d/four", "a/one", "c/three"]);
        assert_eq!(list[1].ref_name.as_deref(), Some("main"));
    }

    #[test]
    fn recent_repos_clear() {
        let recent = RecentRepos::new(Arc::new(MemoryStore::new()), 10);
        recent.record("a/one", None);
        recent.clear();
        assert!(recent.list().is_empty());
    }
}
