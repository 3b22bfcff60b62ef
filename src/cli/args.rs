//! CLI argument definitions
//!
//! Global options and merging with the config file.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{Config, default_filter_file, default_log_file};

use super::commands::Commands;

#[derive(Parser)]
#[command(name = "cmdlog")]
#[command(about = "Command logging and reporting", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// File name of the command log ("-" reads standard input)
    #[arg(short, long, global = true, env = "CMDLOG_FILE", value_name = "FILE")]
    pub(crate) file: Option<PathBuf>,

    /// File name of the command line filter file
    #[arg(long, global = true, env = "CMDLOG_FILTERS", value_name = "FILE")]
    pub(crate) filter: Option<PathBuf>,

    /// Enable debug output on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,
}

impl Cli {
    /// Fill unset paths from the config file, then from the defaults
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if self.file.is_none() {
            self.file = Some(config.file.clone().unwrap_or_else(default_log_file));
        }
        if self.filter.is_none() {
            self.filter = Some(
                config
                    .filter_file
                    .clone()
                    .unwrap_or_else(default_filter_file),
            );
        }
        self
    }

    /// Resolved by `with_config`
    pub(crate) fn log_file(&self) -> PathBuf {
        self.file.clone().unwrap_or_default()
    }

    pub(crate) fn filter_file(&self) -> PathBuf {
        self.filter.clone().unwrap_or_default()
    }

    /// `-` stands for standard input
    pub(crate) fn reads_stdin(&self) -> bool {
        self.file.as_deref().is_some_and(|f| f.as_os_str() == "-")
    }
}
