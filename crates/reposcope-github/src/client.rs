//! GitHub REST client for the read-only endpoints the explorer needs.

use serde::de::DeserializeOwned;

use reposcope_core::{RepoLocator, Result, ScopeError};

use crate::models::{
    Branch, RateLimit, RawRateLimitResponse, RawTreeResponse, Repository, Tag, TreeSnapshot,
};

const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub API client with optional token authentication.
///
/// Public repositories work unauthenticated at a lower rate limit; a token
/// raises the limit and unlocks private repositories the token can read.
///
/// # Examples
///
/// ```no_run
/// use reposcope_core::RepoLocator;
/// use reposcope_github::GitHubClient;
///
/// # async fn run() -> reposcope_core::Result<()> {
/// let client = GitHubClient::new(None);
/// let repo: RepoLocator = "rust-lang/cargo".parse()?;
/// let info = client.get_repository(&repo).await?;
/// println!("default branch: {}", info.default_branch);
/// # Ok(())
/// # }
/// ```
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Create a client from an explicit token, falling back to the
    /// `GITHUB_TOKEN` / `GH_TOKEN` environment variables, then to
    /// unauthenticated access.
    pub fn new(token: Option<&str>) -> Self {
        let token = token
            .map(str::to_string)
            .or_else(|| std::env::var("GITHUB_TOKEN").ok())
            .or_else(|| std::env::var("GH_TOKEN").ok())
            .filter(|t| !t.is_empty());

        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            token,
        }
    }

    /// Override the API base URL (GitHub Enterprise).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Whether the client sends an authorization header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, url: &str, accept: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .get(url)
            .header("Accept", accept)
            .header("User-Agent", "reposcope");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }

    /// GET a JSON endpoint, surfacing the API's `message` field on failure.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .request(url, "application/vnd.github.v3+json")
            .send()
            .await
            .map_err(|e| ScopeError::Api(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(String::from));
            return Err(ScopeError::Api(match message {
                Some(msg) => format!("{status}: {msg}"),
                None => format!("request failed: {status}"),
            }));
        }

        response
            .json()
            .await
            .map_err(|e| ScopeError::Api(format!("failed to decode response: {e}")))
    }

    /// Fetch repository metadata (default branch, description).
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Api`] on network or API errors; a 404 gets a
    /// friendlier message since it usually means a typo or a private repo.
    pub async fn get_repository(&self, repo: &RepoLocator) -> Result<Repository> {
        let url = format!("{}/repos/{repo}", self.api_base);
        self.get_json(&url).await.map_err(|err| match err {
            ScopeError::Api(msg) if msg.starts_with("404") => ScopeError::Api(format!(
                "repository {repo} not found — make sure it exists and is public, \
                 or provide a token"
            )),
            other => other,
        })
    }

    /// Fetch the recursive git tree for `ref_name`.
    ///
    /// The response is validated into [`TreeSnapshot`]; the API's
    /// `truncated` flag is carried through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Api`] on network or API errors.
    pub async fn get_tree(&self, repo: &RepoLocator, ref_name: &str) -> Result<TreeSnapshot> {
        let url = format!(
            "{}/repos/{repo}/git/trees/{ref_name}?recursive=1",
            self.api_base
        );
        let raw: RawTreeResponse = self.get_json(&url).await?;
        Ok(TreeSnapshot::from_raw(raw))
    }

    /// List branches, making sure the default branch is always present.
    ///
    /// Failures degrade to a list containing just the default branch, so
    /// ref selection keeps working when the branches endpoint is rate
    /// limited.
    pub async fn list_branches(&self, repo: &RepoLocator, default_branch: &str) -> Vec<Branch> {
        let url = format!("{}/repos/{repo}/branches?per_page=100", self.api_base);
        match self.get_json::<Vec<Branch>>(&url).await {
            Ok(mut branches) => {
                if !default_branch.is_empty()
                    && !branches.iter().any(|b| b.name == default_branch)
                {
                    branches.insert(
                        0,
                        Branch {
                            name: default_branch.to_string(),
                            protected: false,
                        },
                    );
                }
                branches
            }
            Err(err) => {
                tracing::warn!(%err, "failed to list branches");
                if default_branch.is_empty() {
                    Vec::new()
                } else {
                    vec![Branch {
                        name: default_branch.to_string(),
                        protected: false,
                    }]
                }
            }
        }
    }

    /// List tags; failures degrade to an empty list.
    pub async fn list_tags(&self, repo: &RepoLocator) -> Vec<Tag> {
        let url = format!("{}/repos/{repo}/tags?per_page=100", self.api_base);
        match self.get_json::<Vec<Tag>>(&url).await {
            Ok(tags) => tags,
            Err(err) => {
                tracing::warn!(%err, "failed to list tags");
                Vec::new()
            }
        }
    }

    /// Fetch one file's text content at `ref_name` via the contents API.
    ///
    /// Uses the raw media type, so no base64 handling is needed. Returns
    /// `Ok(None)` when the file does not exist at that ref (or the response
    /// is otherwise unusable) — absence is an expected outcome for manifest
    /// probing, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Api`] only when the request itself cannot be
    /// sent.
    pub async fn get_file_content(
        &self,
        repo: &RepoLocator,
        ref_name: &str,
        path: &str,
    ) -> Result<Option<String>> {
        let url = format!(
            "{}/repos/{repo}/contents/{path}?ref={ref_name}",
            self.api_base
        );
        let response = self
            .request(&url, "application/vnd.github.raw+json")
            .send()
            .await
            .map_err(|e| ScopeError::Api(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            tracing::debug!(path, status = %response.status(), "no file content");
            return Ok(None);
        }
        Ok(response.text().await.ok())
    }

    /// Fetch the current core-API rate limit status.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::Api`] on network or API errors.
    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let url = format!("{}/rate_limit", self.api_base);
        let raw: RawRateLimitResponse = self.get_json(&url).await?;
        Ok(RateLimit::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_token_wins() {
        let client = GitHubClient::new(Some("ghp_explicit"));
        assert!(client.is_authenticated());
        assert_eq!(client.token.as_deref(), Some("ghp_explicit"));
    }

    #[test]
    fn empty_token_counts_as_unauthenticated() {
        // An empty string from a blank config field must not produce an
        // empty Authorization header.
        let client = GitHubClient {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            token: Some(String::new()).filter(|t| !t.is_empty()),
        };
        assert!(!client.is_authenticated());
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let client = GitHubClient::new(Some("t")).with_api_base("https://ghe.example.com/api/v3/");
        assert_eq!(client.api_base, "https://ghe.example.com/api/v3");
    }
}
