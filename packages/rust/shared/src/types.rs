//! Core domain types for plugindocs.

use std::path::{Path, PathBuf};

/// File name every destination page is written as — the directory's own
/// page content for the static site generator.
pub const INDEX_FILE: &str = "_index.md";

// ---------------------------------------------------------------------------
// CommandPath
// ---------------------------------------------------------------------------

/// The hierarchical command path of one reference page.
///
/// Derived from a command-reference file stem by stripping the plugin
/// prefix and splitting on underscores: `jx-gitops_repo_create` becomes
/// `["gitops", "repo", "create"]`. Each command path maps to exactly one
/// destination file; nested commands produce nested directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPath {
    /// The original file stem (`jx-gitops_repo_create`).
    stem: String,
    /// Path segments (`["gitops", "repo", "create"]`).
    segments: Vec<String>,
}

impl CommandPath {
    /// Derive a command path from a file stem (file name without `.md`).
    pub fn from_file_stem(stem: &str, plugin_prefix: &str) -> Self {
        let trimmed = stem.strip_prefix(plugin_prefix).unwrap_or(stem);
        let segments = trimmed
            .split('_')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            stem: stem.to_string(),
            segments,
        }
    }

    /// The original file stem this path was derived from.
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path segments, plugin word first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of path segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Whether this is the plugin's root page (`jx-gitops.md`).
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1
    }

    /// Page title: the root command word plus the space-joined segments
    /// (`jx gitops repo create`).
    pub fn title(&self, root_command: &str) -> String {
        let mut out = root_command.to_string();
        for seg in &self.segments {
            out.push(' ');
            out.push_str(seg);
        }
        out
    }

    /// Link title: the plugin word for root pages; for deeper pages the
    /// segments after the leading duplicate plugin word (`repo create`).
    pub fn link_title(&self) -> String {
        if self.is_root() {
            self.segments.first().cloned().unwrap_or_default()
        } else {
            self.segments[1..].join(" ")
        }
    }

    /// The file stem of the immediate parent page, if any
    /// (`jx-gitops_repo_create` → `jx-gitops_repo`).
    pub fn parent_stem(&self) -> Option<&str> {
        self.stem.rsplit_once('_').map(|(parent, _)| parent)
    }

    /// Destination directory: the content root joined with every segment.
    pub fn dest_dir(&self, content_dir: &Path) -> PathBuf {
        let mut dir = content_dir.to_path_buf();
        for seg in &self.segments {
            dir.push(seg);
        }
        dir
    }

    /// Destination file: always the index file within [`Self::dest_dir`].
    pub fn dest_file(&self, content_dir: &Path) -> PathBuf {
        self.dest_dir(content_dir).join(INDEX_FILE)
    }

    /// Front-matter alias entry (`/v3/develop/reference/jx/gitops/repo/create`).
    pub fn alias(&self, alias_prefix: &str) -> String {
        let mut out = alias_prefix.trim_end_matches('/').to_string();
        for seg in &self.segments {
            out.push('/');
            out.push_str(seg);
        }
        out
    }
}
