//! Plugin repository enumeration and cloning.
//!
//! Before generating docs, plugindocs asks the source-control host for
//! the organisation's repositories, filters them down to plugin repos,
//! and clones each one with the system git client.

mod git;

use serde::Deserialize;
use tracing::{debug, info, instrument};

use plugindocs_shared::{PluginDocsError, Result};

pub use git::GitClient;

/// Repositories fetched per listing page.
const PAGE_SIZE: usize = 100;

/// Default timeout in seconds for listing requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent string for listing requests.
const USER_AGENT: &str = concat!("plugindocs/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// RepoRecord
// ---------------------------------------------------------------------------

/// One repository record from the organisation listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    /// Repository name (`jx-gitops`).
    pub name: String,
    /// HTTPS clone URL; may be absent for unusual repos.
    #[serde(default)]
    pub clone_url: Option<String>,
    /// Archived repositories are skipped.
    #[serde(default)]
    pub archived: bool,
    /// Private repositories are skipped.
    #[serde(default)]
    pub private: bool,
}

impl RepoRecord {
    /// Whether this record should be processed as a plugin repository.
    ///
    /// Only public, non-archived repositories whose name carries the
    /// required prefix and is not on the ignore list count.
    pub fn is_plugin(&self, prefix: &str, ignore: &[String]) -> bool {
        !self.archived
            && !self.private
            && self.name.starts_with(prefix)
            && !ignore.iter().any(|i| i == &self.name)
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Options for the repository listing call.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Base URL of the listing API.
    pub api_url: String,
    /// Timeout for HTTP requests in seconds.
    pub timeout_secs: u64,
}

impl ListOptions {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// List every repository of an organisation, one page at a time.
///
/// A listing failure is fatal to the caller; there is no retry policy.
#[instrument(skip(opts), fields(api_url = %opts.api_url))]
pub async fn list_org_repos(owner: &str, opts: &ListOptions) -> Result<Vec<RepoRecord>> {
    let client = build_client(opts)?;
    let base = opts.api_url.trim_end_matches('/');

    let mut repos: Vec<RepoRecord> = Vec::new();
    let mut page = 1usize;

    loop {
        let url = format!("{base}/orgs/{owner}/repos?per_page={PAGE_SIZE}&page={page}");
        debug!(%url, "fetching repository page");

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| PluginDocsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PluginDocsError::Network(format!("{url}: HTTP {status}")));
        }

        let batch: Vec<RepoRecord> = response.json().await.map_err(|e| {
            PluginDocsError::parse(format!("{url}: invalid repository listing: {e}"))
        })?;

        let short_page = batch.len() < PAGE_SIZE;
        repos.extend(batch);

        if short_page {
            break;
        }
        page += 1;
    }

    info!(owner, count = repos.len(), "repository listing complete");
    Ok(repos)
}

/// Build a reqwest client with appropriate settings.
fn build_client(opts: &ListOptions) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(opts.timeout_secs))
        .build()
        .map_err(|e| PluginDocsError::Network(format!("failed to build HTTP client: {e}")))
}
