use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments for the uac-triage tool.
///
/// `--path` is required for a triage run and ignored by subcommands, so it
/// is checked at runtime rather than by the parser.
#[derive(Parser, Debug)]
#[clap(name = "uac-triage", about = "Collect and parse important logs from multi-host UAC output")]
pub struct Args {
    /// Root folder holding one UAC folder per host
    #[clap(short, long)]
    pub path: Option<PathBuf>,

    /// Base directory for the output tree (default: current directory)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Path to configuration YAML file
    #[clap(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Parse collected files without asking
    #[clap(short = 'y', long, conflicts_with = "no_parse")]
    pub yes: bool,

    /// Stop after collection without asking
    #[clap(long)]
    pub no_parse: bool,

    /// Override the printable fraction required to treat a file as text
    #[clap(long)]
    pub threshold: Option<f64>,

    /// Verbose logging
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

impl Args {
    /// Parse decision when it was given on the command line
    pub fn parse_decision(&self) -> Option<bool> {
        if self.yes {
            Some(true)
        } else if self.no_parse {
            Some(false)
        } else {
            None
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a default configuration file
    InitConfig {
        /// Path to output configuration file
        #[clap(default_value = "triage.yaml")]
        path: PathBuf,
    },
}
