//! End-to-end run: list repositories → clone → regenerate the page tree.

use std::time::Instant;

use tracing::{info, instrument, warn};

use plugindocs_scm::{GitClient, ListOptions, list_org_repos};
use plugindocs_shared::{PluginDocsError, Result, RunConfig};

use crate::generator;

/// Result of one complete run.
#[derive(Debug)]
pub struct RunResult {
    /// Plugin repositories cloned (or reused) during the clone phase.
    pub repos_cloned: usize,
    /// Plugins with a command reference export that were regenerated.
    pub plugins_processed: usize,
    /// Plugin directories without an export.
    pub plugins_skipped: usize,
    /// Destination pages written.
    pub pages_written: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// Progress callback for reporting run status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a repository is cloned.
    fn repo_cloning(&self, name: &str, current: usize, total: usize);
    /// Called when a destination page is written.
    fn page_written(&self, title: &str, current: usize, total: usize);
    /// Called when the run completes.
    fn done(&self, result: &RunResult);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn repo_cloning(&self, _name: &str, _current: usize, _total: usize) {}
    fn page_written(&self, _title: &str, _current: usize, _total: usize) {}
    fn done(&self, _result: &RunResult) {}
}

/// Run the full pipeline.
///
/// 1. Validate the setup (git client, plugins directory)
/// 2. Clone phase (unless disabled): list the organisation's repositories
///    and clone each plugin, one at a time
/// 3. Generate phase: regenerate the destination content tree
///
/// Everything is sequential; the first error aborts the run.
#[instrument(skip_all, fields(workdir = %config.workdir.display(), clone = config.clone_enabled))]
pub async fn run(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<RunResult> {
    let start = Instant::now();

    std::fs::create_dir_all(&config.plugins_dir)
        .map_err(|e| PluginDocsError::io(&config.plugins_dir, e))?;

    let repos_cloned = if config.clone_enabled {
        clone_plugins(config, progress).await?
    } else {
        info!("clone phase disabled, using existing plugin checkouts");
        0
    };

    progress.phase("Generating reference pages");
    let stats = generator::generate_docs(config, progress)?;

    let result = RunResult {
        repos_cloned,
        plugins_processed: stats.plugins_processed,
        plugins_skipped: stats.plugins_skipped,
        pages_written: stats.pages_written,
        elapsed: start.elapsed(),
    };

    progress.done(&result);

    info!(
        repos_cloned = result.repos_cloned,
        plugins = result.plugins_processed,
        pages = result.pages_written,
        elapsed_ms = result.elapsed.as_millis(),
        "run complete"
    );

    Ok(result)
}

/// Clone every plugin repository of the organisation, sequentially.
async fn clone_plugins(config: &RunConfig, progress: &dyn ProgressReporter) -> Result<usize> {
    let git = GitClient::new(&config.git_program);
    git.verify()?;

    progress.phase("Listing plugin repositories");
    let repos = list_org_repos(&config.owner, &ListOptions::new(&config.api_url)).await?;

    let plugins: Vec<_> = repos
        .iter()
        .filter(|repo| {
            if repo.archived {
                info!(repo = %repo.name, "ignoring archived repository");
                return false;
            }
            if !repo.is_plugin(&config.plugin_prefix, &config.ignore) {
                info!(repo = %repo.name, "ignoring repository");
                return false;
            }
            true
        })
        .collect();

    let total = plugins.len();
    let mut cloned = 0usize;

    for (i, repo) in plugins.iter().enumerate() {
        let Some(url) = repo.clone_url.as_deref() else {
            warn!(repo = %repo.name, "no clone URL for repository");
            continue;
        };

        progress.repo_cloning(&repo.name, i + 1, total);
        info!(repo = %repo.name, "cloning plugin");

        let to_dir = config.plugins_dir.join(&repo.name);
        git.clone_to_dir(url, &to_dir)?;
        cloned += 1;
    }

    Ok(cloned)
}
