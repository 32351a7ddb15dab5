//! Core types, configuration, and error handling for reposcope.
//!
//! This crate provides the shared foundation used by all other reposcope
//! crates:
//! - [`ScopeError`] — unified error type using `thiserror`
//! - [`ScopeConfig`] — configuration loaded from `.reposcope.toml`
//! - The data model: [`TreeEntry`], [`Node`], [`Stats`]
//! - Shared helpers: [`RepoLocator`], [`OutputFormat`], [`humanize`]

mod config;
mod error;
mod types;

pub mod humanize;

pub use config::{CacheConfig, GithubConfig, ScopeConfig, TreeSettings};
pub use error::ScopeError;
pub use types::{
    DirectoryNode, EntryKind, FileNode, Node, OutputFormat, RepoLocator, Stats, TreeEntry,
};

/// A convenience `Result` type for reposcope operations.
pub type Result<T> = std::result::Result<T, ScopeError>;
