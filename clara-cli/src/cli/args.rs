use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::OutputFormat;

/// Rename scanned pages in date and page order, with undo
#[derive(Parser, Debug)]
#[command(name = "clara")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run as if started in <path> instead of the current working directory
    #[arg(short = 'C', global = true, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// Do not print the log stream to stderr
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the files that would be renamed, in rename order
    Scan {
        /// Directory containing the scanned pages
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Only consider files with this extension (e.g. jpeg or .JPEG)
        #[arg(long = "ext", value_name = "EXT")]
        extension: Option<String>,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Prefix every dated page with a sequential number
    Run {
        /// Directory containing the scanned pages
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Only consider files with this extension (e.g. jpeg or .JPEG)
        #[arg(long = "ext", value_name = "EXT")]
        extension: Option<String>,

        /// Number given to the first file; invalid values fall back to 1
        #[arg(long = "start", value_name = "N", allow_hyphen_values = true)]
        start: Option<String>,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Undo the last run in a directory
    Undo {
        /// Directory the run was performed in
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Operation ID to undo (defaults to the most recent one)
        #[arg(long)]
        id: Option<String>,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Show the undo record left by the last run in a directory
    Last {
        /// Directory the run was performed in
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Output format for machine consumption
        #[arg(long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
