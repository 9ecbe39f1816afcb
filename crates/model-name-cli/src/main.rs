//! Model name inspection tool
//!
//! Parses model names and digests the same way the registry does, so names
//! can be checked from a shell or a script before they are pushed or pulled.

mod commands;
mod config;
mod telemetry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use config::CliConfig;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration directory
    #[arg(short, long, env = "CONFIG_DIR", default_value = "config")]
    config_dir: String,

    /// Environment (development, production, etc.)
    #[arg(short, long, env = "ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Log level
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a model name and show its parts
    Parse {
        /// Name to parse, e.g. `library/llama:7b`
        name: String,

        /// Do not fill in the default host, namespace and tag
        #[arg(long)]
        no_defaults: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a digest and show its normalized form
    Digest {
        /// Digest to parse, e.g. `sha256:<hex>`
        digest: String,
    },

    /// Compute the sha256 digest of a file
    Hash {
        /// File to hash
        file: PathBuf,
    },

    /// Check whether two names refer to the same model, ignoring case
    Equal {
        /// First name to compare
        a: String,

        /// Second name to compare
        b: String,

        /// Do not fill in the default host, namespace and tag
        #[arg(long)]
        no_defaults: bool,
    },
}

fn main() -> Result<ExitCode> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = CliConfig::load_or_default(&args.config_dir, &args.environment);
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    telemetry::init(&config.logging);

    debug!(
        host = %config.defaults.host,
        namespace = %config.defaults.namespace,
        tag = %config.defaults.tag,
        "Loaded name defaults"
    );

    let mut out = io::stdout().lock();
    let ok = match args.command {
        Command::Parse {
            name,
            no_defaults,
            json,
        } => {
            let defaults = (!no_defaults).then_some(&config.defaults);
            commands::parse(&name, defaults, json, &mut out)?
        }
        Command::Digest { digest } => commands::digest(&digest, &mut out)?,
        Command::Hash { file } => {
            commands::hash(&file, &mut out)?;
            true
        }
        Command::Equal { a, b, no_defaults } => {
            let defaults = (!no_defaults).then_some(&config.defaults);
            commands::equal(&a, &b, defaults, &mut out)?
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
