//! Application configuration for plugindocs.
//!
//! User config lives at `~/.plugindocs/plugindocs.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PluginDocsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "plugindocs.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".plugindocs";

/// Environment variable that disables the clone phase when set truthy.
pub const NO_CLONE_ENV: &str = "PLUGINDOCS_NO_CLONE";

// ---------------------------------------------------------------------------
// Config structs (matching plugindocs.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where plugin repositories come from.
    #[serde(default)]
    pub source: SourceConfig,

    /// Where the generated page tree goes.
    #[serde(default)]
    pub output: OutputConfig,

    /// Repository cloning.
    #[serde(default)]
    pub clone: CloneConfig,
}

/// `[source]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the repository-listing API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Organisation that owns the plugin repositories.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Required repository name prefix for a repo to count as a plugin.
    #[serde(default = "default_plugin_prefix")]
    pub plugin_prefix: String,

    /// The top-level command word the plugins hang off (e.g. `jx`).
    #[serde(default = "default_root_command")]
    pub root_command: String,

    /// Repository names to skip even when they carry the prefix.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            owner: default_owner(),
            plugin_prefix: default_plugin_prefix(),
            root_command: default_root_command(),
            ignore: Vec::new(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".into()
}
fn default_owner() -> String {
    "jenkins-x-plugins".into()
}
fn default_plugin_prefix() -> String {
    "jx-".into()
}
fn default_root_command() -> String {
    "jx".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination content tree, relative to the working directory.
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    /// Static `type` value written into each page's front matter.
    #[serde(default = "default_page_type")]
    pub page_type: String,

    /// Site path prefix used for the front-matter alias entry.
    #[serde(default = "default_alias_prefix")]
    pub alias_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            page_type: default_page_type(),
            alias_prefix: default_alias_prefix(),
        }
    }
}

fn default_content_dir() -> String {
    "content/en/v3/develop/reference/jx".into()
}
fn default_page_type() -> String {
    "docs".into()
}
fn default_alias_prefix() -> String {
    "/v3/develop/reference/jx".into()
}

/// `[clone]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloneConfig {
    /// Whether the clone phase runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Git executable to shell out to.
    #[serde(default = "default_git_program")]
    pub git_program: String,

    /// Directory (under the working dir) the plugins are cloned into.
    #[serde(default = "default_plugins_dir")]
    pub plugins_dir: String,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            git_program: default_git_program(),
            plugins_dir: default_plugins_dir(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_git_program() -> String {
    "git".into()
}
fn default_plugins_dir() -> String {
    "jx-plugins".into()
}

// ---------------------------------------------------------------------------
// Run config (runtime, merged from config + CLI flags + environment)
// ---------------------------------------------------------------------------

/// Runtime configuration for one run — merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base working directory (positional CLI argument, defaults to `.`).
    pub workdir: PathBuf,
    /// Whether to clone plugin repositories before generating.
    pub clone_enabled: bool,
    /// Git executable.
    pub git_program: String,
    /// Directory holding (or receiving) the plugin clones.
    pub plugins_dir: PathBuf,
    /// Destination content tree.
    pub content_dir: PathBuf,
    /// Listing API base URL.
    pub api_url: String,
    /// Plugin organisation.
    pub owner: String,
    /// Required repo-name prefix.
    pub plugin_prefix: String,
    /// Root command word for titles.
    pub root_command: String,
    /// Repositories to ignore.
    pub ignore: Vec<String>,
    /// Front-matter `type` value.
    pub page_type: String,
    /// Front-matter alias prefix.
    pub alias_prefix: String,
}

impl RunConfig {
    /// Merge an [`AppConfig`] with the CLI's working directory and clone
    /// toggle into a runtime config. `no_clone` wins over the config file.
    pub fn new(config: &AppConfig, workdir: impl Into<PathBuf>, no_clone: bool) -> Self {
        let workdir = workdir.into();
        Self {
            plugins_dir: workdir.join(&config.clone.plugins_dir),
            content_dir: workdir.join(&config.output.content_dir),
            workdir,
            clone_enabled: config.clone.enabled && !no_clone,
            git_program: config.clone.git_program.clone(),
            api_url: config.source.api_url.clone(),
            owner: config.source.owner.clone(),
            plugin_prefix: config.source.plugin_prefix.clone(),
            root_command: config.source.root_command.clone(),
            ignore: config.source.ignore.clone(),
            page_type: config.output.page_type.clone(),
            alias_prefix: config.output.alias_prefix.clone(),
        }
    }

    /// URL of a plugin's repository home page, used in the Source footer.
    pub fn repo_url(&self, plugin: &str) -> String {
        format!("https://github.com/{}/{plugin}", self.owner)
    }
}

/// Whether the clone phase is disabled through [`NO_CLONE_ENV`].
pub fn no_clone_from_env() -> bool {
    std::env::var(NO_CLONE_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

/// Boolean-like environment values: `1`, `true`, `yes`, `on`.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.plugindocs/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PluginDocsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.plugindocs/plugindocs.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PluginDocsError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PluginDocsError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PluginDocsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PluginDocsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PluginDocsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("jenkins-x-plugins"));
        assert!(toml_str.contains("content/en/v3/develop/reference/jx"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.source.plugin_prefix, "jx-");
        assert_eq!(parsed.output.page_type, "docs");
        assert!(parsed.clone.enabled);
    }

    #[test]
    fn config_with_overrides() {
        let toml_str = r#"
[source]
owner = "my-plugins"
ignore = ["jx-internal"]

[clone]
enabled = false
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.source.owner, "my-plugins");
        assert_eq!(config.source.ignore, vec!["jx-internal".to_string()]);
        assert!(!config.clone.enabled);
        // Unspecified sections keep their defaults
        assert_eq!(config.source.api_url, "https://api.github.com");
        assert_eq!(config.clone.plugins_dir, "jx-plugins");
    }

    #[test]
    fn run_config_merges_workdir_and_no_clone() {
        let app = AppConfig::default();
        let run = RunConfig::new(&app, "/work", false);
        assert_eq!(run.plugins_dir, PathBuf::from("/work/jx-plugins"));
        assert_eq!(
            run.content_dir,
            PathBuf::from("/work/content/en/v3/develop/reference/jx")
        );
        assert!(run.clone_enabled);

        let run = RunConfig::new(&app, "/work", true);
        assert!(!run.clone_enabled);
    }

    #[test]
    fn truthy_environment_values() {
        for v in ["1", "true", "TRUE", "yes", "on", " on "] {
            assert!(is_truthy(v), "expected {v:?} to be truthy");
        }
        for v in ["", "0", "false", "no", "off", "nope"] {
            assert!(!is_truthy(v), "expected {v:?} to be falsy");
        }
    }

    #[test]
    fn repo_url_for_plugin() {
        let run = RunConfig::new(&AppConfig::default(), ".", true);
        assert_eq!(
            run.repo_url("jx-gitops"),
            "https://github.com/jenkins-x-plugins/jx-gitops"
        );
    }
}
