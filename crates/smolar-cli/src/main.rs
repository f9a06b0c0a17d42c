//! Smolar CLI - command-line driver for the smolar array engine
//!
//! Replays the demonstration programs, dumps array descriptors and times
//! the reference batched matmul workload.

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

mod commands;
mod config;
mod utils;

use commands::{
    bench::BenchCommand, config::ConfigCommand, demo::DemoCommand, info::InfoCommand, Command,
};

#[derive(Parser)]
#[command(
    name = "smolar",
    version = env!("CARGO_PKG_VERSION"),
    about = "Smolar N-dimensional array engine CLI",
    long_about = "Run demonstrations of views, broadcasting and matrix products, inspect array layouts, and time the reference matmul workload."
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SMOLAR_CONFIG")]
    config: Option<PathBuf>,

    /// JSON output format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a demonstration program
    #[command(name = "demo", alias = "d")]
    Demo(DemoCommand),

    /// Display the layout of a constructed array
    #[command(name = "info", alias = "i")]
    Info(InfoCommand),

    /// Time batched matrix multiplication
    #[command(name = "bench", alias = "b")]
    Bench(BenchCommand),

    /// Show or write the effective configuration
    #[command(name = "config")]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli)?;

    debug!("Smolar CLI v{} starting", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = config::Config::load(cli.config.as_deref())?;
    debug!("Configuration loaded: {:?}", config);

    // Execute command
    let result = match &cli.command {
        Commands::Demo(cmd) => cmd.execute(&config, cli.json),
        Commands::Info(cmd) => cmd.execute(&config, cli.json),
        Commands::Bench(cmd) => cmd.execute(&config, cli.json),
        Commands::Config(cmd) => cmd.execute(&config, cli.json),
    };

    match result {
        Ok(()) => {
            if !cli.quiet {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
