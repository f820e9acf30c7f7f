//! Deploykit CLI — entry point.
//!
//! # Commands
//!
//! - `deploykit show [--json] [--reveal]` — print the resolved configuration
//! - `deploykit check` — load and validate, exit non-zero on error
//! - `deploykit networks` — list networks and signer status
//! - `deploykit init [PATH]` — write a starter config file

mod check;
mod helpers;
mod init;
mod networks_cmd;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};

use deploykit_core::config::LoadOptions;
use deploykit_core::utils::default_config_path;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Deploykit — configuration loader for the contract compile/deploy toolchain
#[derive(Parser)]
#[command(name = "deploykit", version, about, long_about = None)]
struct Cli {
    /// JSON config file (defaults to ./deploykit.json when present)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Explicit .env file (defaults to searching from the working directory)
    #[arg(long, global = true)]
    env_file: Option<String>,

    /// Do not read any .env file
    #[arg(long, global = true, default_value_t = false)]
    no_dotenv: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration
    Show {
        /// Print the toolchain-shaped JSON instead of a summary
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Show secrets in clear text
        #[arg(long, default_value_t = false)]
        reveal: bool,
    },

    /// Load and validate the configuration
    Check,

    /// List networks with chain id, endpoint, and signer status
    Networks,

    /// Write the built-in defaults (without secrets) to a config file
    Init {
        /// Destination (defaults to ./deploykit.json)
        path: Option<String>,
    },
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = load_options(&cli);

    match cli.command {
        Commands::Show { json, reveal } => show::run(&options, json, reveal),
        Commands::Check => check::run(&options),
        Commands::Networks => networks_cmd::run(&options),
        Commands::Init { path } => {
            let path = path
                .map(|p| helpers::expand_tilde(&p))
                .unwrap_or_else(default_config_path);
            init::run(&path)
        }
    }
}

/// Translate global flags into loader options.
fn load_options(cli: &Cli) -> LoadOptions {
    let config_path = match &cli.config {
        Some(p) => Some(helpers::expand_tilde(p)),
        None => Some(default_config_path()).filter(|p| p.exists()),
    };

    LoadOptions {
        config_path,
        dotenv_path: cli.env_file.as_deref().map(helpers::expand_tilde),
        use_dotenv: !cli.no_dotenv,
    }
}

/// Initialize tracing/logging. Logs go to stderr so `show --json` stays pipeable.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("deploykit=debug,deploykit_core=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
