//! CLI argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// ddns-sync: keeps Dynamic DNS records pointed at this machine's public IP
///
/// Periodically looks up the public address and pushes it to every
/// configured host through the provider's update endpoint.
#[derive(Debug, Parser)]
#[command(name = "ddns-sync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to configuration file (TOML, or JSON with a .json extension)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Seconds between reconcile passes (overrides the config file)
    #[arg(long)]
    pub interval: Option<u64>,

    /// IP-echo service URL (overrides the config file)
    #[arg(long = "ip-url")]
    pub ip_url: Option<String>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ddns-sync
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ddns-sync.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
