//! Tree reconstruction and statistics for flat git-tree listings.
//!
//! Converts the flat `{path, type, size}` rows of GitHub's recursive
//! git-tree endpoint into a rooted, sorted, rollup-annotated [`Node`]
//! hierarchy, and derives everything the UI layers need from it: aggregate
//! [`Stats`], a heuristic lines-of-code estimate, substring filtering, and
//! textual serialization (ASCII box-drawing, markdown, flat paths).
//!
//! Every function in this crate is pure and performs no I/O; trees are
//! rebuilt from scratch per fetch and never mutated afterwards.
//!
//! [`Node`]: reposcope_core::Node
//! [`Stats`]: reposcope_core::Stats

pub mod builder;
pub mod classify;
pub mod filter;
pub mod loc;
pub mod serialize;
pub mod stats;

pub use builder::{build_tree, build_tree_with, scope_to_path};
pub use classify::NO_EXT;
pub use filter::{count_matches, filter_tree, select_directory};
pub use loc::{estimate_loc, LocEstimate};
pub use serialize::{serialize_tree, TreeFormat};
pub use stats::{aggregate, top_largest_files};
