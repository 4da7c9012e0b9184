//! Shared types, error model, and configuration for plugindocs.
//!
//! This crate is the foundation depended on by all other plugindocs crates.
//! It provides:
//! - [`PluginDocsError`] — the unified error type
//! - Domain types ([`CommandPath`], the index-file convention)
//! - Configuration ([`AppConfig`], [`RunConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CloneConfig, NO_CLONE_ENV, OutputConfig, RunConfig, SourceConfig, config_dir,
    config_file_path, init_config, is_truthy, load_config, load_config_from, no_clone_from_env,
};
pub use error::{PluginDocsError, Result};
pub use types::{CommandPath, INDEX_FILE};
