// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for conveyor

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "conveyor")]
#[command(about = "A task-graph pipeline runner for fetching, reshaping, and persisting records")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the user pipeline end to end
    Run {
        #[arg(short, long, help = "Source URL to fetch records from")]
        source: Option<String>,

        #[arg(short, long, help = "Destination file for the tabular output")]
        dest: Option<PathBuf>,

        #[arg(long, help = "Write the run report as JSON to this path")]
        report: Option<PathBuf>,
    },

    /// Validate the pipeline graph and print the execution order
    Plan {
        #[arg(short, long, help = "Source URL to fetch records from")]
        source: Option<String>,

        #[arg(short, long, help = "Destination file for the tabular output")]
        dest: Option<PathBuf>,
    },
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
