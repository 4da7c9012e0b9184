//! Command-reference page transformation.
//!
//! Takes the raw Markdown of one Cobra-generated command reference page
//! and produces the static-site page: front matter (title, linktitle,
//! type, description, alias) followed by the rewritten body.

mod cobra;
mod rewrite;

use tracing::debug;

use plugindocs_shared::CommandPath;

pub use cobra::{read_cobra_description, wrap_examples_in_code_block};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Options for transforming one command reference page.
#[derive(Debug, Clone)]
pub struct TransformOptions {
    /// Hyphenated plugin name (`jx-gitops`).
    pub plugin: String,
    /// Source file name without the `.md` extension.
    pub file_stem: String,
    /// Repository prefix stripped from file stems (`jx-`).
    pub plugin_prefix: String,
    /// Root command word prepended to titles (`jx`).
    pub root_command: String,
    /// Static `type` value for the front matter.
    pub page_type: String,
    /// Site path prefix for the front-matter alias entry.
    pub alias_prefix: String,
    /// URL of the plugin's repository, for the Source footer.
    pub repo_url: String,
}

/// Result of transforming one page.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The final page content (front matter + body).
    pub markdown: String,
    /// Page title (`jx gitops repo create`).
    pub title: String,
    /// Link title (`repo create`).
    pub link_title: String,
    /// One-line description extracted from the original page.
    pub description: String,
    /// Command path, which determines the destination file.
    pub path: CommandPath,
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Transform one raw command reference page into its destination page.
///
/// The description is extracted from the original text before any
/// rewriting; the body then goes through the fixed rewrite pipeline.
/// Malformed pages degrade to an empty description and a lightly
/// rewritten body — this function never fails.
pub fn transform_page(raw: &str, opts: &TransformOptions) -> TransformResult {
    let path = CommandPath::from_file_stem(&opts.file_stem, &opts.plugin_prefix);
    let title = path.title(&opts.root_command);
    let link_title = path.link_title();
    let description = cobra::read_cobra_description(raw);

    let ctx = rewrite::RewriteContext {
        plugin: &opts.plugin,
        spaced: opts.plugin.replace('-', " "),
        path: &path,
        repo_url: &opts.repo_url,
    };
    let body = rewrite::run_pipeline(raw, &ctx);

    let front_matter = build_front_matter(
        &title,
        &link_title,
        &opts.page_type,
        &description,
        &path.alias(&opts.alias_prefix),
    );

    debug!(
        stem = %opts.file_stem,
        title = %title,
        body_len = body.len(),
        "transformed page"
    );

    TransformResult {
        markdown: format!("{front_matter}{body}"),
        title,
        link_title,
        description,
        path,
    }
}

/// Build the fixed front-matter block consumed by the site generator.
fn build_front_matter(
    title: &str,
    link_title: &str,
    page_type: &str,
    description: &str,
    alias: &str,
) -> String {
    format!(
        "---\ntitle: {title}\nlinktitle: {link_title}\ntype: {page_type}\ndescription: {description}\naliases:\n  - {alias}\n---\n\n"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
