//! Dependency-manifest parsing across package-manager ecosystems.
//!
//! Each parser takes raw manifest text and extracts declared dependencies.
//! Parsers are total functions: malformed input produces an empty report,
//! never an error, since a best-effort summary is all the explorer needs.

pub mod parsers;

use serde::{Deserialize, Serialize};

/// A single declared dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name (for maven/gradle, `group:artifact`).
    pub name: String,
    /// Declared version or constraint, when one is present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Dependency {
    /// Create a dependency with a version constraint.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    /// Create a dependency without a version.
    pub fn unversioned(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }
}

/// Parsed dependencies of one manifest file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyReport {
    /// Package-manager domain (`npm`, `pip`, `cargo`, ...).
    pub ecosystem: String,
    /// Manifest file name the report came from.
    pub file: String,
    /// Runtime dependencies.
    pub dependencies: Vec<Dependency>,
    /// Development / test / build dependencies.
    pub dev_dependencies: Vec<Dependency>,
}

impl DependencyReport {
    fn new(ecosystem: &str, file: &str) -> Self {
        Self {
            ecosystem: ecosystem.to_string(),
            file: file.to_string(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
        }
    }

    /// Returns `true` when no dependencies of either kind were found.
    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.dev_dependencies.is_empty()
    }
}

/// Manifest file names the explorer knows how to parse, in fetch order.
pub const MANIFEST_FILES: [&str; 8] = [
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "pom.xml",
    "build.gradle",
    "pubspec.yaml",
];

/// Parse a manifest by file name.
///
/// Returns `None` for file names outside [`MANIFEST_FILES`].
///
/// # Examples
///
/// ```
/// use reposcope_deps::parse_manifest;
///
/// let report = parse_manifest("go.mod", "require golang.org/x/sync v0.7.0\n").unwrap();
/// assert_eq!(report.ecosystem, "go");
/// assert_eq!(report.dependencies.len(), 1);
///
/// assert!(parse_manifest("random.cfg", "").is_none());
/// ```
pub fn parse_manifest(file_name: &str, content: &str) -> Option<DependencyReport> {
    match file_name {
        "package.json" => Some(parsers::parse_package_json(content)),
        "requirements.txt" => Some(parsers::parse_requirements(content)),
        "Cargo.toml" => Some(parsers::parse_cargo_toml(content)),
        "go.mod" => Some(parsers::parse_go_mod(content)),
        "Gemfile" => Some(parsers::parse_gemfile(content)),
        "pom.xml" => Some(parsers::parse_pom_xml(content)),
        "build.gradle" => Some(parsers::parse_build_gradle(content)),
        "pubspec.yaml" => Some(parsers::parse_pubspec_yaml(content)),
        _ => None,
    }
}

/// Totals across a set of dependency reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySummary {
    /// Runtime dependency count across all manifests.
    pub total_dependencies: usize,
    /// Dev dependency count across all manifests.
    pub total_dev_dependencies: usize,
    /// Ecosystems seen, in report order.
    pub ecosystems: Vec<String>,
    /// Number of manifests that produced a report.
    pub manifest_count: usize,
}

/// Summarize a set of reports.
///
/// # Examples
///
/// ```
/// use reposcope_deps::{parse_manifest, summarize};
///
/// let report = parse_manifest("go.mod", "require golang.org/x/sync v0.7.0\n").unwrap();
/// let summary = summarize(&[report]);
/// assert_eq!(summary.total_dependencies, 1);
/// assert_eq!(summary.ecosystems, vec!["go"]);
/// ```
pub fn summarize(reports: &[DependencyReport]) -> DependencySummary {
    let mut summary = DependencySummary {
        manifest_count: reports.len(),
        ..DependencySummary::default()
    };
    for report in reports {
        summary.total_dependencies += report.dependencies.len();
        summary.total_dev_dependencies += report.dev_dependencies.len();
        summary.ecosystems.push(report.ecosystem.clone());
    }
    summary
}
