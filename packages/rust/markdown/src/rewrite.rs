//! Fixed substitution pipeline applied to each command reference page.
//!
//! Each pass is a function `&str -> String` applied in a fixed order.
//! The passes relocate Cobra's flat, file-based cross links into the
//! nested destination tree and strip the parts of the page the generated
//! front matter makes redundant.

use std::sync::LazyLock;

use regex::Regex;

use plugindocs_shared::CommandPath;

/// Everything the passes need to know about the page being rewritten.
pub(crate) struct RewriteContext<'a> {
    /// Hyphenated plugin name (`jx-gitops`).
    pub plugin: &'a str,
    /// Space-separated form (`jx gitops`).
    pub spaced: String,
    /// Command path of the page.
    pub path: &'a CommandPath,
    /// URL of the plugin's repository, for the Source footer.
    pub repo_url: &'a str,
}

/// Run the full rewrite pipeline on one page body.
pub(crate) fn run_pipeline(md: &str, ctx: &RewriteContext<'_>) -> String {
    let mut result = strip_markdown_link_extensions(md);

    result = rewrite_root_links(&result, ctx.plugin);
    result = space_plugin_name(&result, ctx.plugin, &ctx.spaced);
    if ctx.path.depth() > 2 {
        if let Some(parent) = ctx.path.parent_stem() {
            result = rewrite_parent_links(&result, parent);
        }
    }
    result = crate::cobra::wrap_examples_in_code_block(&result);
    result = truncate_at_see_also(&result);
    result = trim_preamble(&result);
    result = append_source_footer(&result, ctx.plugin, ctx.repo_url);

    result
}

// ---------------------------------------------------------------------------
// Pass 0: strip `.md` from link targets
// ---------------------------------------------------------------------------

/// Cobra links sibling pages as `(jx-gitops_annotate.md)`; the destination
/// tree has no `.md` paths.
fn strip_markdown_link_extensions(md: &str) -> String {
    md.replace(".md)", ")")
}

// ---------------------------------------------------------------------------
// Pass 1: self-referential root links
// ---------------------------------------------------------------------------

/// Rewrite `[jx-gitops](jx-gitops)` to `[jx-gitops](..)` — the plugin root
/// page is the parent directory of every first-level command page.
fn rewrite_root_links(md: &str, plugin: &str) -> String {
    md.replace(
        &format!("[{plugin}]({plugin})"),
        &format!("[{plugin}](..)"),
    )
}

// ---------------------------------------------------------------------------
// Pass 2: space out the hyphenated plugin name
// ---------------------------------------------------------------------------

/// Replace the hyphenated plugin binary name with its spaced invocation
/// form (`jx-gitops` → `jx gitops`) in headings, link text, and code.
///
/// Prose outside code keeps the hyphenated name except in link text, so
/// link targets survive untouched.
fn space_plugin_name(md: &str, plugin: &str, spaced: &str) -> String {
    let link_from = format!("[{plugin}");
    let link_to = format!("[{spaced}");

    let mut in_fence = false;
    let mut lines: Vec<String> = Vec::new();

    for line in md.split('\n') {
        let trimmed = line.trim_start();
        let is_fence_marker = trimmed.starts_with("```");
        let is_heading = trimmed.starts_with('#');
        let is_indented = line.starts_with("  ") || line.starts_with('\t');

        let rewritten = if is_heading || in_fence || is_indented {
            line.replace(plugin, spaced)
        } else {
            line.replace(&link_from, &link_to)
        };

        if is_fence_marker {
            in_fence = !in_fence;
        }
        lines.push(rewritten);
    }

    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Pass 3: parent links on deeply nested pages
// ---------------------------------------------------------------------------

/// Rewrite links to the immediate parent page (`(jx-gitops_repo)`) into a
/// relative parent reference. Only applied to pages more than two path
/// segments deep; first-level pages reach their parent through pass 1.
fn rewrite_parent_links(md: &str, parent_stem: &str) -> String {
    md.replace(&format!("]({parent_stem})"), "](..)")
}

// ---------------------------------------------------------------------------
// Pass 5: drop the SEE ALSO section
// ---------------------------------------------------------------------------

static SEE_ALSO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### SEE ALSO").expect("valid regex"));

/// Truncate the page at the `### SEE ALSO` marker; the destination tree
/// expresses the command hierarchy through directories instead.
fn truncate_at_see_also(md: &str) -> String {
    match SEE_ALSO_RE.find(md) {
        Some(m) => md[..m.start()].to_string(),
        None => md.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pass 6: trim the title/usage preamble
// ---------------------------------------------------------------------------

static FIRST_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### ").expect("valid regex"));

/// Drop everything before the first `###` heading. The command title and
/// synopsis above it are redundant with the generated front matter.
fn trim_preamble(md: &str) -> String {
    match FIRST_SECTION_RE.find(md) {
        Some(m) => md[m.start()..].to_string(),
        None => md.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Pass 7: source attribution footer
// ---------------------------------------------------------------------------

/// Append a fixed Source footer linking back to the plugin's repository.
fn append_source_footer(md: &str, plugin: &str, repo_url: &str) -> String {
    let body = md.trim_end();
    format!("{body}\n\n## Source\n\n[{plugin}]({repo_url})\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx<'a>(path: &'a CommandPath, repo_url: &'a str) -> RewriteContext<'a> {
        RewriteContext {
            plugin: "jx-gitops",
            spaced: "jx gitops".into(),
            path,
            repo_url,
        }
    }

    #[test]
    fn strips_md_extension_from_links() {
        let md = "* [jx-gitops annotate](jx-gitops_annotate.md)";
        assert_eq!(
            strip_markdown_link_extensions(md),
            "* [jx-gitops annotate](jx-gitops_annotate)"
        );
    }

    #[test]
    fn rewrites_root_link_to_parent() {
        let md = "* [jx-gitops](jx-gitops)\t - GitOps utility commands";
        assert_eq!(
            rewrite_root_links(md, "jx-gitops"),
            "* [jx-gitops](..)\t - GitOps utility commands"
        );
    }

    #[test]
    fn spaces_plugin_name_in_headings_links_and_code() {
        let md = "## jx-gitops annotate\n\njx-gitops is a binary\n\n    jx-gitops annotate\n\n* [jx-gitops annotate](jx-gitops_annotate)\n";
        let out = space_plugin_name(md, "jx-gitops", "jx gitops");
        assert!(out.contains("## jx gitops annotate"));
        // Indented usage line rewritten
        assert!(out.contains("\n    jx gitops annotate\n"));
        // Link text rewritten, link target untouched
        assert!(out.contains("* [jx gitops annotate](jx-gitops_annotate)"));
        // Plain prose keeps the hyphenated binary name
        assert!(out.contains("jx-gitops is a binary"));
    }

    #[test]
    fn spaces_plugin_name_inside_fences() {
        let md = "```bash\njx-gitops annotate\n```\n";
        let out = space_plugin_name(md, "jx-gitops", "jx gitops");
        assert_eq!(out, "```bash\njx gitops annotate\n```\n");
    }

    #[test]
    fn rewrites_parent_link_on_deep_pages() {
        let md = "* [jx gitops repo](jx-gitops_repo)\t - repo commands";
        assert_eq!(
            rewrite_parent_links(md, "jx-gitops_repo"),
            "* [jx gitops repo](..)\t - repo commands"
        );
    }

    #[test]
    fn truncates_at_see_also() {
        let md = "### Options\n\nsome options\n\n### SEE ALSO\n\n* [jx gitops](..)\n";
        assert_eq!(truncate_at_see_also(md), "### Options\n\nsome options\n\n");
    }

    #[test]
    fn see_also_absent_is_noop() {
        let md = "### Options\n\nsome options\n";
        assert_eq!(truncate_at_see_also(md), md);
    }

    #[test]
    fn trims_preamble_to_first_section() {
        let md = "## jx gitops annotate\n\nAnnotates resources\n\n### Usage\n\n    jx gitops annotate\n";
        assert_eq!(
            trim_preamble(md),
            "### Usage\n\n    jx gitops annotate\n"
        );
    }

    #[test]
    fn preamble_without_sections_is_kept() {
        let md = "## jx gitops weird\n\nno sections here\n";
        assert_eq!(trim_preamble(md), md);
    }

    #[test]
    fn footer_links_to_repository() {
        let out = append_source_footer(
            "### Options\n",
            "jx-gitops",
            "https://github.com/jenkins-x-plugins/jx-gitops",
        );
        assert!(out.ends_with(
            "\n\n## Source\n\n[jx-gitops](https://github.com/jenkins-x-plugins/jx-gitops)\n"
        ));
    }

    #[test]
    fn pipeline_applies_passes_in_order() {
        let path = CommandPath::from_file_stem("jx-gitops_annotate", "jx-");
        let md = "## jx-gitops annotate\n\nAnnotates all kubernetes resources\n\n### Usage\n\n    jx-gitops annotate\n\n### Examples\n\n  # annotate everything\n  jx-gitops annotate foo=bar\n\n### SEE ALSO\n\n* [jx-gitops](jx-gitops.md)\n";
        let out = run_pipeline(md, &ctx(&path, "https://github.com/jenkins-x-plugins/jx-gitops"));

        // Preamble dropped, body starts at the first section
        assert!(out.starts_with("### Usage"));
        // Examples fenced, with the binary name spaced inside
        assert!(out.contains("  ```bash\n  # annotate everything\n  jx gitops annotate foo=bar"));
        // SEE ALSO gone
        assert!(!out.contains("SEE ALSO"));
        // Footer appended last
        assert!(out.ends_with(
            "## Source\n\n[jx-gitops](https://github.com/jenkins-x-plugins/jx-gitops)\n"
        ));
    }

    #[test]
    fn pipeline_is_deterministic() {
        let path = CommandPath::from_file_stem("jx-gitops_repo_create", "jx-");
        let md = "## jx-gitops repo create\n\nCreates a repo\n\n### Usage\n\n    jx-gitops repo create\n\n### SEE ALSO\n\n* [jx-gitops repo](jx-gitops_repo.md)\n";
        let c = ctx(&path, "https://github.com/jenkins-x-plugins/jx-gitops");
        assert_eq!(run_pipeline(md, &c), run_pipeline(md, &c));
    }

    #[test]
    fn pipeline_rewrites_deep_parent_link() {
        let path = CommandPath::from_file_stem("jx-gitops_repo_create", "jx-");
        let md = "### Options\n\nsee [jx-gitops repo](jx-gitops_repo.md) for details\n";
        let out = run_pipeline(md, &ctx(&path, "https://example.com/r"));
        assert!(out.contains("[jx gitops repo](..)"));
    }
}
