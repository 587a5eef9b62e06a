//! arch-qa CLI tool.
//!
//! Usage:
//! ```bash
//! arch-qa                      # same as `arch-qa check .`
//! arch-qa check [OPTIONS] [PATH]
//! arch-qa list [PATH]
//! arch-qa init
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Architecture compliance checker with requirement traceability
#[derive(Parser)]
#[command(name = "arch-qa")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the requirement catalog and write the QA reports
    Check(CheckArgs),

    /// List registered requirements without evaluating them
    List {
        /// Project directory (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct CheckArgs {
    /// Project directory to check (default: current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Console output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Directory for the report artifacts (overrides `qa.output_dir`)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Do not write report artifacts
    #[arg(long)]
    no_save: bool,

    /// Exit with status 1 when any requirement fails
    #[arg(long)]
    fail_on_red: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
            format: OutputFormat::default(),
            out_dir: None,
            no_save: false,
            fail_on_red: false,
        }
    }
}

/// Output format for the console summary.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary.
    #[default]
    Text,
    /// The structured JSON record.
    Json,
    /// One line per requirement.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or_else(|| Commands::Check(CheckArgs::default())) {
        Commands::Check(args) => {
            let loaded = config_resolver::load(&args.path, cli.config.as_deref())?;
            let options = commands::check::CheckOptions {
                format: args.format,
                out_dir: args.out_dir,
                save: !args.no_save,
                fail_on_red: args.fail_on_red,
            };
            commands::check::run(&args.path, &options, &loaded)
        }
        Commands::List { path } => {
            let loaded = config_resolver::load(&path, cli.config.as_deref())?;
            commands::list::run(&loaded)
        }
        Commands::Init { force } => commands::init::run(Path::new("."), force),
    }
}
