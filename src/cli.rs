//! Command-line arguments
//!
//! Flags override the environment-driven [`Config`].

use std::path::PathBuf;

use clap::{Parser, ValueHint};

use crate::cache::Price;
use crate::config::Config;

/// Estimate the market value of a saved housing layout.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// File name of the housing list inside the homes directory
    pub list: String,

    /// Data center or region to price against
    pub region: Option<String>,

    /// Leave out items priced above this amount (0 disables the cutoff)
    #[arg(short = 'c', long = "cutoff", default_value = "0")]
    pub cutoff: Price,

    /// Directory holding the item catalog and the price cache
    #[arg(long = "data-dir", value_hint = ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// Directory of saved housing lists
    #[arg(long = "homes-dir", value_hint = ValueHint::DirPath)]
    pub homes_dir: Option<PathBuf>,

    /// Stop on the first failed price request instead of skipping its items
    #[arg(long = "abort-on-remote-error", default_value = "false")]
    pub abort_on_remote_error: bool,

    /// Print the report as JSON
    #[arg(long = "json", default_value = "false")]
    pub json: bool,
}

impl Args {
    /// Applies flag overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.homes_dir {
            config.homes_dir = dir.clone();
        }
        if self.abort_on_remote_error {
            config.abort_on_remote_error = true;
        }
        config
    }

    /// Region from the command line, else the configured default.
    pub fn region<'a>(&'a self, config: &'a Config) -> &'a str {
        self.region.as_deref().unwrap_or(&config.default_region)
    }
}
