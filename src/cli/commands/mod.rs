//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod metadata;
mod serve;
mod test_file;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::load_settings;

#[derive(Parser)]
#[command(name = "mmif-nlp")]
#[command(about = "MMIF annotation service wrapping an English NLP pipeline")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the annotation server
    Serve {
        /// Address to bind to: PORT, HOST, or HOST:PORT (default: from config, 0.0.0.0:5000)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Annotate an MMIF file without starting the server
    Test {
        /// Input MMIF file
        infile: PathBuf,
        /// Where to write the annotated MMIF
        outfile: PathBuf,
        /// Reuse existing token views instead of tokenizing again
        #[arg(long)]
        pretokenized: bool,
        /// Use the case-insensitive entity model
        #[arg(long)]
        uncased: bool,
        /// Link entities through the configured linking service
        #[arg(long)]
        link: bool,
        /// With --link, replace recognized entities with linked ones
        #[arg(long)]
        overwrite: bool,
    },

    /// Print the app metadata
    Metadata {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).await;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&settings, bind.as_deref()).await,
        Commands::Test {
            infile,
            outfile,
            pretokenized,
            uncased,
            link,
            overwrite,
        } => {
            let flags = test_file::Flags {
                pretokenized,
                uncased,
                link,
                overwrite,
            };
            test_file::cmd_test(&settings, &infile, &outfile, flags).await
        }
        Commands::Metadata { pretty } => metadata::cmd_metadata(&settings, pretty),
    }
}
