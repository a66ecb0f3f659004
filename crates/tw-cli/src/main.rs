//! CLI frontend for the Taleweaver story player.

mod commands;
mod console;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "tw",
    about = "Taleweaver — play branching text adventures from story files",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a story, choosing from a menu when no file is given
    Play {
        /// Story file to play
        file: Option<PathBuf>,

        /// Directory to list stories from (default: current directory)
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// RNG seed for reproducible dice rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List the stories in a directory
    List {
        /// Directory containing story files
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Load a story file and report its structure
    Check {
        /// Story file to check
        file: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play { file, dir, seed } => commands::play::run(file.as_deref(), &dir, seed),
        Commands::List { dir } => commands::list::run(&dir),
        Commands::Check { file } => commands::check::run(&file),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
