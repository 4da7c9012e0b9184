//! Thin wrapper around the system git client.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use plugindocs_shared::{PluginDocsError, Result};

/// Shells out to a git executable for cloning.
#[derive(Debug, Clone)]
pub struct GitClient {
    program: String,
}

impl GitClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check that the git executable is present and runnable.
    pub fn verify(&self) -> Result<()> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| {
                PluginDocsError::Git(format!("git client '{}' not found: {e}", self.program))
            })?;

        if !output.status.success() {
            return Err(PluginDocsError::Git(format!(
                "'{} --version' failed with status {}",
                self.program, output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout);
        debug!(version = %version.trim(), "git client found");
        Ok(())
    }

    /// Clone `url` into `dir`. A directory that already holds a clone
    /// (`.git` present) is reused as-is.
    pub fn clone_to_dir(&self, url: &str, dir: &Path) -> Result<()> {
        if dir.join(".git").exists() {
            info!(dir = %dir.display(), "already cloned, reusing");
            return Ok(());
        }

        if let Some(parent) = dir.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PluginDocsError::io(parent, e))?;
        }

        let output = Command::new(&self.program)
            .arg("clone")
            .arg("--quiet")
            .arg(url)
            .arg(dir)
            .output()
            .map_err(|e| PluginDocsError::Git(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PluginDocsError::Git(format!(
                "failed to clone {url} to {}: {}",
                dir.display(),
                stderr.trim()
            )));
        }

        debug!(%url, dir = %dir.display(), "clone complete");
        Ok(())
    }
}
