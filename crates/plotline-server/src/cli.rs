//! Command line interface.

use clap::Parser;
use std::path::PathBuf;

/// Serves line charts of numeric samples as inline PNG images.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "plotline-server", version, about)]
pub struct Cli {
    /// Configuration file (YAML or TOML). Defaults to discovery in the working directory.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Address to listen on, overriding the configuration.
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Write the effective configuration to PATH and exit.
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}
