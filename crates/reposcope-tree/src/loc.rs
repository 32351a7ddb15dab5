//! Heuristic lines-of-code estimation from per-extension byte totals.
//!
//! No blob contents are read; the estimate divides each code extension's
//! byte total by a typical bytes-per-line figure for that language. The
//! tables are tuning parameters, not part of the contract.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::NO_EXT;

/// Fallback for code extensions without a specific bytes-per-line figure.
const DEFAULT_BYTES_PER_LINE: u64 = 40;

/// Typical bytes per line for a known extension.
fn bytes_per_line(ext: &str) -> u64 {
    match ext {
        "js" | "mjs" | "cjs" => 40,
        "jsx" => 45,
        "ts" => 42,
        "tsx" => 48,
        "vue" | "svelte" => 50,
        "html" | "htm" => 45,
        "css" => 35,
        "scss" | "less" => 38,
        "sass" => 30,
        "py" => 35,
        "rb" => 32,
        "php" => 40,
        "java" => 45,
        "kt" => 40,
        "scala" => 42,
        "go" => 38,
        "rs" => 40,
        "c" | "h" => 35,
        "cpp" | "hpp" => 40,
        "cs" => 45,
        "swift" => 42,
        "json" => 30,
        "yaml" | "yml" => 25,
        "toml" => 28,
        "xml" => 50,
        "md" => 60,
        "txt" => 50,
        "rst" => 55,
        "sh" | "bash" | "zsh" => 35,
        "ps1" => 45,
        "bat" => 40,
        "sql" => 45,
        _ => DEFAULT_BYTES_PER_LINE,
    }
}

/// Whether an extension counts as code for the LOC estimate.
///
/// Binary and image formats are excluded, as is the `no-ext` bucket.
///
/// # Examples
///
/// ```
/// use reposcope_tree::loc::is_code_extension;
///
/// assert!(is_code_extension("rs"));
/// assert!(is_code_extension("Dockerfile"));
/// assert!(!is_code_extension("png"));
/// assert!(!is_code_extension("no-ext"));
/// ```
pub fn is_code_extension(ext: &str) -> bool {
    matches!(
        ext.to_lowercase().as_str(),
        "js" | "jsx"
            | "ts"
            | "tsx"
            | "mjs"
            | "cjs"
            | "vue"
            | "svelte"
            | "html"
            | "htm"
            | "css"
            | "scss"
            | "sass"
            | "less"
            | "py"
            | "rb"
            | "php"
            | "java"
            | "kt"
            | "scala"
            | "go"
            | "rs"
            | "c"
            | "cpp"
            | "h"
            | "hpp"
            | "cs"
            | "swift"
            | "json"
            | "yaml"
            | "yml"
            | "toml"
            | "xml"
            | "md"
            | "txt"
            | "rst"
            | "sh"
            | "bash"
            | "zsh"
            | "ps1"
            | "bat"
            | "sql"
            | "graphql"
            | "gql"
            | "prisma"
            | "dockerfile"
            | "makefile"
    )
}

/// Estimated line count for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionLoc {
    /// Lower-cased extension.
    pub ext: String,
    /// Estimated lines.
    pub loc: u64,
    /// Byte total the estimate was derived from.
    pub size: u64,
}

/// A lines-of-code estimate across all code extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocEstimate {
    /// Sum of the per-extension estimates.
    pub total: u64,
    /// Per-extension estimates, largest first.
    pub by_extension: Vec<ExtensionLoc>,
}

/// Estimate lines of code from per-extension byte totals.
///
/// Extensions outside the code allow-list (and the `no-ext` bucket) are
/// skipped. Results are ordered by estimated lines descending, extension
/// name as tiebreak.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use reposcope_tree::estimate_loc;
///
/// let mut sizes = BTreeMap::new();
/// sizes.insert("rs".to_string(), 4000u64);
/// sizes.insert("png".to_string(), 100_000u64);
///
/// let estimate = estimate_loc(&sizes);
/// assert_eq!(estimate.total, 100); // 4000 / 40; the png is ignored
/// assert_eq!(estimate.by_extension.len(), 1);
/// ```
pub fn estimate_loc(extension_sizes: &BTreeMap<String, u64>) -> LocEstimate {
    let mut by_extension = Vec::new();
    let mut total = 0;

    for (ext, &size) in extension_sizes {
        if ext.as_str() == NO_EXT || !is_code_extension(ext) {
            continue;
        }
        let loc = (size as f64 / bytes_per_line(&ext.to_lowercase()) as f64).round() as u64;
        total += loc;
        by_extension.push(ExtensionLoc {
            ext: ext.clone(),
            loc,
            size,
        });
    }

    by_extension.sort_by(|a, b| b.loc.cmp(&a.loc).then_with(|| a.ext.cmp(&b.ext)));

    LocEstimate {
        total,
        by_extension,
    }
}
