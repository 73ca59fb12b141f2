//! Vaultrag CLI - Chunk an Obsidian vault for retrieval.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Vaultrag - Turn an Obsidian vault into retrieval-ready chunks
#[derive(Parser)]
#[command(name = "vaultrag")]
#[command(version)]
#[command(about = "Turn an Obsidian vault into retrieval-ready chunks", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the default config file
    Init,

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// List the notes found in the vault
    Notes {
        /// Vault root (default: from config)
        #[arg(long, env = "OBSIDIAN_VAULT_PATH")]
        vault: Option<String>,

        /// Maximum number of notes to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print notes as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Parse and chunk every note in the vault
    Chunk {
        /// Vault root (default: from config)
        #[arg(long, env = "OBSIDIAN_VAULT_PATH")]
        vault: Option<String>,

        /// Maximum characters per chunk (default: from config)
        #[arg(long)]
        max_chunk_size: Option<usize>,

        /// Characters shared by consecutive chunks (default: from config)
        #[arg(long)]
        overlap: Option<usize>,

        /// Emit chunks as JSON lines instead of a summary
        #[arg(long)]
        json: bool,

        /// Write JSON lines to a file instead of stdout
        #[arg(short, long, requires = "json")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the config file location
    Path,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaultrag=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vaultrag=info,warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Init => commands::init::run(),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(),
            ConfigCommands::Path => commands::config::path(),
        },
        Commands::Notes { vault, limit, json } => commands::notes::run(vault, limit, json),
        Commands::Chunk {
            vault,
            max_chunk_size,
            overlap,
            json,
            output,
        } => commands::chunk::run(vault, max_chunk_size, overlap, json, output),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
