use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod config;
mod flows;
mod render;

#[derive(Parser, Debug)]
#[command(name = "depot")]
#[command(about = "Local catalog-driven package manager", long_about = None)]
struct Cli {
    /// Configuration file naming the catalogs and the ledger directory.
    #[arg(long, short, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available packages, installed packages, or pending updates
    List {
        #[arg(value_enum)]
        what: Option<ListScope>,
    },
    /// Install packages and their dependencies
    Install {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Remove packages and their recorded dependencies
    Remove {
        #[arg(required = true)]
        packages: Vec<String>,
    },
    /// Show the effective configuration
    Show {
        #[arg(value_enum)]
        what: Option<ShowScope>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ListScope {
    Installed,
    Update,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ShowScope {
    Config,
}

fn main() -> Result<()> {
    flows::run_cli(Cli::parse())
}
