//! GitHub fetch layer: REST client, response narrowing, local cache, and
//! the analysis pipeline.
//!
//! Everything network-facing lives here. Raw API responses are validated
//! into the strict core types at this boundary, so the pure tree engine
//! (`reposcope-tree`) only ever sees well-formed data. Browser-style local
//! state (analysis cache, recent repositories) is modeled as an injected
//! [`KeyValueStore`].

pub mod analyzer;
pub mod cache;
pub mod client;
pub mod manifests;
pub mod models;
pub mod store;

pub use analyzer::{analyze, Analysis, AnalysisResult, AnalyzeOptions};
pub use cache::{AnalysisCache, RecentRepo, RecentRepos};
pub use client::GitHubClient;
pub use models::{Branch, RateLimit, Repository, Tag, TreeSnapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore};
