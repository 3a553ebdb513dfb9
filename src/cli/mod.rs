//! CLI interface for sitecfg

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitecfg")]
#[command(version)]
#[command(about = "Load and validate static site settings", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default site.toml
    Init {
        /// Where to write the configuration file
        #[arg(short, long, default_value = "site.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Load and validate the configuration
    Check {
        /// Configuration file (searched upward from the current directory if omitted)
        #[arg(short, long, env = "SITECFG_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Print the loaded settings
    Show {
        /// Configuration file (searched upward from the current directory if omitted)
        #[arg(short, long, env = "SITECFG_CONFIG")]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Write the settings as a generator-native assignment file
    Export {
        /// Configuration file (searched upward from the current directory if omitted)
        #[arg(short, long, env = "SITECFG_CONFIG")]
        config: Option<PathBuf>,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Toml,
}
