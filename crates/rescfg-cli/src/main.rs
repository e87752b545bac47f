//! rescfg CLI - Command-line interface for rescfg
//!
//! Provides `rescfg config set`, `rescfg config unset` and `rescfg config show`.

mod commands;
mod error;
mod progress;
mod session;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use commands::CommandContext;
use error::CliError;
use settings::Home;

#[derive(Parser)]
#[command(name = "rescfg")]
#[command(about = "rescfg - manage configuration on custom resources")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// API base URL (overrides the profile setting)
    #[arg(long, global = true, env = "RESCFG_API_URL")]
    api_url: Option<String>,

    /// Settings profile name
    #[arg(long, global = true, env = "RESCFG_PROFILE", default_value = "default")]
    profile: String,

    /// Directory holding settings and credentials (defaults to ~/.rescfg)
    #[arg(long, global = true, env = "RESCFG_HOME")]
    home: Option<PathBuf>,

    /// Session token (overrides stored credentials)
    #[arg(long, global = true, env = "RESCFG_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// View and modify resource configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        if let Some(hint) = e.hint() {
            eprintln!("{hint}");
        }
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = CommandContext {
        home: Home::resolve(cli.home)?,
        profile: cli.profile,
        api_url: cli.api_url,
        token: cli.token,
    };

    match cli.command {
        Commands::Config { action } => commands::config::execute(action, &ctx).await,
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
