//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use plugindocs_core::{ProgressReporter, RunResult};
use plugindocs_shared::{AppConfig, RunConfig, init_config, load_config, load_config_from};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// plugindocs — aggregate plugin command references into a site content tree.
#[derive(Parser)]
#[command(
    name = "plugindocs",
    version,
    about = "Clone plugin repositories and rewrite their command reference docs into a static-site page tree.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Clone the plugin repositories and regenerate the reference pages.
    Generate {
        /// Base working directory (defaults to the current directory).
        dir: Option<PathBuf>,

        /// Skip the clone phase and use existing plugin checkouts.
        /// Also enabled by the PLUGINDOCS_NO_CLONE environment variable.
        #[arg(long)]
        no_clone: bool,

        /// Config file to use instead of ~/.plugindocs/plugindocs.toml.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "plugindocs=info",
        1 => "plugindocs=debug",
        _ => "plugindocs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate {
            dir,
            no_clone,
            config,
        } => cmd_generate(dir, no_clone, config.as_deref()).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

async fn cmd_generate(
    dir: Option<PathBuf>,
    no_clone: bool,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    let workdir = dir.unwrap_or_else(|| PathBuf::from("."));
    let no_clone = no_clone || plugindocs_shared::no_clone_from_env();
    let run_config = RunConfig::new(&config, workdir, no_clone);

    info!(
        workdir = %run_config.workdir.display(),
        owner = %run_config.owner,
        clone = run_config.clone_enabled,
        "generating plugin reference docs"
    );

    let reporter = CliProgress::new();
    let result = plugindocs_core::run(&run_config, &reporter).await?;

    println!();
    println!("  Reference pages regenerated!");
    println!("  Cloned:  {}", result.repos_cloned);
    println!("  Plugins: {}", result.plugins_processed);
    println!("  Skipped: {}", result.plugins_skipped);
    println!("  Pages:   {}", result.pages_written);
    println!("  Output:  {}", run_config.content_dir.display());
    println!(
        "  Time:    {:.1}s",
        result.elapsed.as_secs_f64()
    );
    println!();

    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn repo_cloning(&self, name: &str, current: usize, total: usize) {
        self.spinner.set_message(format!(
            "Cloning [{current}/{total}] {name}"
        ));
    }

    fn page_written(&self, title: &str, current: usize, total: usize) {
        self.spinner.set_message(format!(
            "Writing [{current}/{total}] {title}"
        ));
    }

    fn done(&self, _result: &RunResult) {
        self.spinner.finish_and_clear();
    }
}
