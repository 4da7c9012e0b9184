//! plugindocs CLI — plugin command-reference documentation aggregator.
//!
//! Clones the plugin repositories of an organisation and rewrites their
//! Cobra command-reference exports into a static-site content tree.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
