//! Concurrent dependency-manifest fetching.

use reposcope_core::RepoLocator;
use reposcope_deps::{parse_manifest, DependencyReport, MANIFEST_FILES};

use crate::client::GitHubClient;

/// Probe every known manifest file at the repository root and parse the
/// ones that exist.
///
/// All fetches run concurrently; files that are missing, unreadable, or
/// parse to nothing are skipped, so the result holds only manifests with
/// actual dependencies.
///
/// # Examples
///
/// ```no_run
/// use reposcope_core::RepoLocator;
/// use reposcope_github::{manifests::fetch_dependency_reports, GitHubClient};
///
/// # async fn run() -> reposcope_core::Result<()> {
/// let client = GitHubClient::new(None);
/// let repo: RepoLocator = "tokio-rs/tokio".parse()?;
/// let reports = fetch_dependency_reports(&client, &repo, "master").await;
/// for report in &reports {
///     println!("{}: {} deps", report.ecosystem, report.dependencies.len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn fetch_dependency_reports(
    client: &GitHubClient,
    repo: &RepoLocator,
    ref_name: &str,
) -> Vec<DependencyReport> {
    let fetches = MANIFEST_FILES.iter().map(|file| async move {
        let content = client
            .get_file_content(repo, ref_name, file)
            .await
            .ok()
            .flatten()?;
        parse_manifest(file, &content)
    });

    futures::future::join_all(fetches)
        .await
        .into_iter()
        .flatten()
        .filter(|report| !report.is_empty())
        .collect()
}
