//! Payoff CLI - Command Line Access to Payoff Diagrams
//!
//! This is the operational entry point for the payoff engine.
//!
//! # Commands
//!
//! - `payoff list` - List catalog products, optionally by family
//! - `payoff resolve <name>...` - Show which catalog entry a name resolves to
//! - `payoff sample <name>` - Sample a payoff curve as a table, JSON or CSV
//! - `payoff compare <name>...` - Compare payoff metrics side by side
//! - `payoff check` - Validate configuration and catalog consistency
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate builds an engine from the
//! merged configuration and dispatches to one command module per subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use payoff_core::formula::Family;
use payoff_engine::config::{build_config, CliArgs};
use payoff_engine::PayoffEngine;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Payoff diagram CLI
#[derive(Parser)]
#[command(name = "payoff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "PAYOFF_CONFIG")]
    config: Option<PathBuf>,

    /// Default sampling intervals per curve
    #[arg(long, global = true)]
    default_points: Option<usize>,

    /// Default initial level of the underlying
    #[arg(long, global = true)]
    default_initial_level: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products
    List {
        /// Only products of this family (e.g. barrier, income)
        #[arg(short = 'F', long, value_parser = parse_family)]
        family: Option<Family>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Resolve free-text product names against the catalog
    Resolve {
        /// Product names, as written in a term sheet
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Sample a product's payoff curve
    Sample {
        /// Product name
        name: String,

        /// Initial level of the underlying
        #[arg(short, long)]
        initial: Option<f64>,

        /// Sampling intervals (one more point is returned)
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Compare payoff metrics of several products
    Compare {
        /// Product names
        #[arg(required = true)]
        names: Vec<String>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Check configuration and catalog consistency
    Check,
}

fn parse_family(s: &str) -> std::result::Result<Family, String> {
    s.parse()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| cli.verbose.then(|| "debug".to_string()));
    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        point_count: cli.default_points,
        initial_level: cli.default_initial_level,
        log_level,
    })?;

    // Initialise tracing; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let engine = PayoffEngine::standard(config)?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::List { family, format } => commands::list::run(&engine, family, &format, &mut out),
        Commands::Resolve { names } => commands::resolve::run(&engine, &names, &mut out),
        Commands::Sample {
            name,
            initial,
            points,
            format,
        } => commands::sample::run(&engine, &name, initial, points, &format, &mut out),
        Commands::Compare { names, format } => {
            commands::compare::run(&engine, &names, &format, &mut out)
        }
        Commands::Check => commands::check::run(&engine, &mut out),
    }
}
