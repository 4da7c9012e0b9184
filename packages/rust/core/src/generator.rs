//! Destination tree generator.
//!
//! Walks the cloned plugin directories, transforms every command
//! reference page, and writes the static-site content tree. Regeneration
//! is idempotent: each plugin's destination subtree is erased before its
//! pages are rewritten.

use std::fs;
use std::path::Path;

use tracing::{debug, info, instrument};

use plugindocs_markdown::{TransformOptions, transform_page};
use plugindocs_shared::{PluginDocsError, Result, RunConfig};

use crate::pipeline::ProgressReporter;

/// Counters from one generation pass.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    /// Plugins with a command reference export that were regenerated.
    pub plugins_processed: usize,
    /// Plugin directories without an export (logged and skipped).
    pub plugins_skipped: usize,
    /// Destination pages written.
    pub pages_written: usize,
}

/// Regenerate the destination content tree from every plugin found under
/// the plugins directory. Any filesystem error aborts the whole run.
#[instrument(skip_all, fields(plugins_dir = %config.plugins_dir.display()))]
pub fn generate_docs(
    config: &RunConfig,
    progress: &dyn ProgressReporter,
) -> Result<GenerateStats> {
    let mut stats = GenerateStats::default();

    for name in sorted_subdirs(&config.plugins_dir)? {
        let plugin_dir = config.plugins_dir.join(&name);
        let src_dir = plugin_dir.join("docs").join("cmd");
        let root_page = src_dir.join(format!("{name}.md"));

        if !root_page.exists() {
            info!(
                plugin = %name,
                has_readme = plugin_dir.join("README.md").exists(),
                has_docs = plugin_dir.join("docs").exists(),
                "no command reference export, skipping"
            );
            stats.plugins_skipped += 1;
            continue;
        }

        info!(plugin = %name, path = %root_page.display(), "found docs");

        wipe_plugin_subtree(config, &name)?;
        stats.pages_written += generate_plugin(config, &name, &src_dir, progress)?;
        stats.plugins_processed += 1;
    }

    info!(
        processed = stats.plugins_processed,
        skipped = stats.plugins_skipped,
        pages = stats.pages_written,
        "generation complete"
    );
    Ok(stats)
}

/// Erase the previously generated destination subtree for one plugin so
/// that regeneration never leaves stale pages behind.
fn wipe_plugin_subtree(config: &RunConfig, plugin: &str) -> Result<()> {
    let word = plugin
        .strip_prefix(&config.plugin_prefix)
        .unwrap_or(plugin);
    let dest = config.content_dir.join(word);

    if dest.exists() {
        debug!(path = %dest.display(), "removing previous destination subtree");
        fs::remove_dir_all(&dest).map_err(|e| PluginDocsError::io(&dest, e))?;
    }
    fs::create_dir_all(&dest).map_err(|e| PluginDocsError::io(&dest, e))?;
    Ok(())
}

/// Transform and write every reference page of one plugin.
fn generate_plugin(
    config: &RunConfig,
    plugin: &str,
    src_dir: &Path,
    progress: &dyn ProgressReporter,
) -> Result<usize> {
    let files = sorted_md_files(src_dir)?;
    let total = files.len();
    let mut written = 0usize;

    for (i, file_name) in files.iter().enumerate() {
        let stem = file_name.trim_end_matches(".md");
        let src_path = src_dir.join(file_name);

        let raw =
            fs::read_to_string(&src_path).map_err(|e| PluginDocsError::io(&src_path, e))?;

        let opts = TransformOptions {
            plugin: plugin.to_string(),
            file_stem: stem.to_string(),
            plugin_prefix: config.plugin_prefix.clone(),
            root_command: config.root_command.clone(),
            page_type: config.page_type.clone(),
            alias_prefix: config.alias_prefix.clone(),
            repo_url: config.repo_url(plugin),
        };
        let result = transform_page(&raw, &opts);

        let dest_dir = result.path.dest_dir(&config.content_dir);
        fs::create_dir_all(&dest_dir).map_err(|e| PluginDocsError::io(&dest_dir, e))?;

        let dest_file = result.path.dest_file(&config.content_dir);
        fs::write(&dest_file, &result.markdown)
            .map_err(|e| PluginDocsError::io(&dest_file, e))?;

        debug!(src = %src_path.display(), dest = %dest_file.display(), "wrote page");
        progress.page_written(&result.title, i + 1, total);
        written += 1;
    }

    Ok(written)
}

/// Names of the immediate subdirectories, sorted for deterministic order.
fn sorted_subdirs(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| PluginDocsError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PluginDocsError::io(dir, e))?;
        let path = entry.path();
        if path.is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Names of the `*.md` files directly inside `dir`, sorted.
fn sorted_md_files(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| PluginDocsError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PluginDocsError::io(dir, e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if path.is_file() && name.ends_with(".md") {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    use plugindocs_shared::AppConfig;

    use crate::pipeline::SilentProgress;

    const ROOT_PAGE: &str = "## jx-gitops\n\nGitOps utility commands\n\n### Usage\n\n    jx-gitops\n";
    const ANNOTATE_PAGE: &str = "## jx-gitops annotate\n\nAnnotates all kubernetes resources in the given directory tree\n\n### Usage\n\n    jx-gitops annotate\n\n### Examples\n\n  # annotate everything\n  jx-gitops annotate foo=bar\n\n### SEE ALSO\n\n* [jx-gitops](jx-gitops.md)\n";
    const REPO_CREATE_PAGE: &str = "## jx-gitops repo create\n\nCreates a new git repository\n\n### Usage\n\n    jx-gitops repo create\n\n### SEE ALSO\n\n* [jx-gitops repo](jx-gitops_repo.md)\n";

    fn write_plugin_export(workdir: &Path) {
        let cmd_dir = workdir.join("jx-plugins/jx-gitops/docs/cmd");
        fs::create_dir_all(&cmd_dir).unwrap();
        fs::write(cmd_dir.join("jx-gitops.md"), ROOT_PAGE).unwrap();
        fs::write(cmd_dir.join("jx-gitops_annotate.md"), ANNOTATE_PAGE).unwrap();
        fs::write(cmd_dir.join("jx-gitops_repo_create.md"), REPO_CREATE_PAGE).unwrap();
    }

    fn make_config(workdir: &Path) -> RunConfig {
        RunConfig::new(&AppConfig::default(), workdir, true)
    }

    #[test]
    fn generates_nested_index_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_export(tmp.path());

        let config = make_config(tmp.path());
        let stats = generate_docs(&config, &SilentProgress).unwrap();

        assert_eq!(stats.plugins_processed, 1);
        assert_eq!(stats.pages_written, 3);

        let gitops = config.content_dir.join("gitops");
        assert!(gitops.join("_index.md").exists());
        assert!(gitops.join("annotate/_index.md").exists());
        assert!(gitops.join("repo/create/_index.md").exists());
    }

    #[test]
    fn written_pages_carry_front_matter_and_footer() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_export(tmp.path());

        let config = make_config(tmp.path());
        generate_docs(&config, &SilentProgress).unwrap();

        let page = fs::read_to_string(
            config.content_dir.join("gitops/annotate/_index.md"),
        )
        .unwrap();

        assert!(page.starts_with("---\ntitle: jx gitops annotate\nlinktitle: annotate\ntype: docs\n"));
        assert!(page.contains(
            "description: Annotates all kubernetes resources in the given directory tree"
        ));
        assert!(page.contains("aliases:\n  - /v3/develop/reference/jx/gitops/annotate\n"));
        assert!(page.contains("  ```bash\n  # annotate everything"));
        assert!(!page.contains("SEE ALSO"));
        assert!(page.ends_with(
            "## Source\n\n[jx-gitops](https://github.com/jenkins-x-plugins/jx-gitops)\n"
        ));
    }

    #[test]
    fn stale_destination_pages_are_wiped() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_export(tmp.path());

        let config = make_config(tmp.path());
        let stale = config.content_dir.join("gitops/removed-command");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("_index.md"), "old page").unwrap();

        generate_docs(&config, &SilentProgress).unwrap();

        assert!(!stale.exists());
        assert!(config.content_dir.join("gitops/_index.md").exists());
    }

    #[test]
    fn plugin_without_export_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_export(tmp.path());

        let bare = tmp.path().join("jx-plugins/jx-bare");
        fs::create_dir_all(&bare).unwrap();
        fs::write(bare.join("README.md"), "# jx-bare\n").unwrap();

        let config = make_config(tmp.path());
        let stats = generate_docs(&config, &SilentProgress).unwrap();

        assert_eq!(stats.plugins_processed, 1);
        assert_eq!(stats.plugins_skipped, 1);
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let tmp = tempfile::tempdir().unwrap();
        write_plugin_export(tmp.path());

        let config = make_config(tmp.path());
        generate_docs(&config, &SilentProgress).unwrap();
        let first = fs::read_to_string(
            config.content_dir.join("gitops/repo/create/_index.md"),
        )
        .unwrap();

        generate_docs(&config, &SilentProgress).unwrap();
        let second = fs::read_to_string(
            config.content_dir.join("gitops/repo/create/_index.md"),
        )
        .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn missing_plugins_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let config = make_config(tmp.path());

        let err = generate_docs(&config, &SilentProgress).unwrap_err();
        assert!(err.to_string().contains("jx-plugins"));
    }
}
