//! CLI for urlsave.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use urlsave_core::config;

use commands::{run_get, run_sniff};

/// Top-level CLI for urlsave.
#[derive(Debug, Parser)]
#[command(name = "urlsave")]
#[command(
    about = "urlsave: download a URL under a size limit and MIME allow-list",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download a URL into `<base-folder>/<uuid>/<filename>` and print the saved path.
    Get(GetArgs),

    /// Print the sniffed MIME type of a local file.
    Sniff {
        /// Path to the file.
        path: PathBuf,
    },
}

/// Flags for `urlsave get`. Unset flags fall back to config.toml.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// HTTP/HTTPS URL to download.
    pub url: String,

    /// Reject bodies larger than N bytes (0 = unlimited).
    #[arg(long, value_name = "N")]
    pub max_size: Option<u64>,

    /// Folder under which the per-download directory is created.
    #[arg(long, value_name = "DIR")]
    pub base_folder: Option<PathBuf>,

    /// Require this exact sniffed MIME type (e.g. image/png).
    #[arg(long, value_name = "TYPE")]
    pub mime_type: Option<String>,

    /// Accept this MIME group (e.g. image). Repeatable.
    #[arg(long = "mime-group", value_name = "GROUP")]
    pub mime_groups: Vec<String>,

    /// Keep the file on disk when MIME validation rejects it.
    #[arg(long)]
    pub keep_rejected: bool,

    /// Abort the transfer after SECS seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_get(&cfg, &args)?;
            }
            CliCommand::Sniff { path } => run_sniff(&path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
