//! Omni CLI - literate document pipeline

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use omni::commands;
use omni::{Config, Omni};

#[derive(Parser)]
#[command(name = "omni")]
#[command(author, version, about = "Literate document pipeline", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every document below the input directory
    Build {
        /// Directory below the input directory to process
        #[arg(value_name = "SUBDIR")]
        subdir: Option<PathBuf>,

        /// Dry run - show what would be written without writing it
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Continue with the remaining documents after a failure
        #[arg(short, long)]
        keep_going: bool,
    },

    /// Build, then rebuild documents as they change
    Watch {
        /// Debounce delay in milliseconds
        #[arg(short, long, default_value = "0")]
        debounce: u64,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Read configuration from file or use defaults
    let config = match cli.config {
        Some(ref path) => omni::config::read_config_file(path),
        None => omni::config::read_config(&base_dir),
    };
    let mut config = match config {
        Ok(config) => config.resolve_paths(&base_dir),
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Commands::Build { dry_run: true, .. } = cli.command {
        config.dry_run = true;
    }

    let result = match cli.command {
        Commands::Config => commands::config(&config),
        command => run_pipeline(config, command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline(config: Config, command: Commands) -> omni::Result<()> {
    let omni = Omni::new(config)?;

    match command {
        Commands::Build {
            subdir, keep_going, ..
        } => {
            let options = commands::BuildOptions { subdir, keep_going };
            commands::build(&omni, &options).map(|_| ())
        }

        Commands::Watch { debounce } => {
            let options = commands::WatchOptions {
                debounce_ms: debounce,
            };
            commands::watch(&omni, options)
        }

        Commands::Config => commands::config(omni.config()),
    }
}
