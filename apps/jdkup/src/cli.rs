//! Command line interface definition

use clap::{Parser, Subcommand};
use jdkup_config::ColorChoice;
use std::path::PathBuf;

/// jdkup - early-access JDK recipe installer
#[derive(Parser)]
#[command(name = "jdkup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Early-access JDK recipe installer")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output the final result in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging to /opt/jdkup/logs/
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use alternate recipes directory
    #[arg(long, global = true, value_name = "DIR")]
    pub recipes_dir: Option<PathBuf>,
}

/// The two lifecycle entry points invoked by the package-manager runtime
#[derive(Subcommand)]
pub enum Commands {
    /// Install a staged, already-extracted bundle at the recipe's target
    #[command(alias = "i")]
    Install {
        /// Recipe token (e.g. jdk26ea)
        recipe: String,

        /// Staging directory containing the extracted archive
        #[arg(long, value_name = "DIR")]
        staged_root: PathBuf,
    },

    /// Remove the installation at the recipe's target
    #[command(alias = "rm")]
    Uninstall {
        /// Recipe token (e.g. jdk26ea)
        recipe: String,
    },
}
