//! Configuration layer for ddns-sync.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Configuration file parsing, TOML or JSON ([`FileConfig`])
//! - Host credentials ([`Host`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** (`--interval`, `--ip-url`)
//! 2. **Configuration file**
//! 3. **Built-in defaults**
//!
//! Hosts come from the configuration file only. Their order is kept and
//! duplicates are not removed: every entry is updated independently.
//!
//! The configuration is read once at startup; changes to the file take
//! effect on the next restart.

mod cli;
pub mod defaults;
mod error;
mod file;
mod host;
mod validated;

#[cfg(test)]
mod file_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use file::{FileConfig, default_config_template};
pub use host::Host;
pub use validated::{ValidatedConfig, write_default_config};

pub(crate) use validated::parse_url;
