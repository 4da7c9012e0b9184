//! Pipeline orchestration for plugindocs.
//!
//! Ties repository listing, cloning, and page transformation together
//! into the end-to-end run that regenerates the reference content tree.

pub mod generator;
pub mod pipeline;

pub use generator::{GenerateStats, generate_docs};
pub use pipeline::{ProgressReporter, RunResult, SilentProgress, run};
