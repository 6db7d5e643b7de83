use clap::Parser;
use std::path::PathBuf;

const AFTER_HELP: &str = "Examples:
  dirindex ~/notes                  watch a tree and keep its indexes current
  dirindex --once .                 rebuild every index once and exit
  dirindex --include 'Projects/*' . only index folders under Projects/
  dirindex -p IDX_ --save-config .  change the prefix and persist it";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirindex",
    version,
    about = "Keeps per-directory markdown index files in sync with a live directory tree",
    after_help = AFTER_HELP
)]
pub struct Args {
    /// Directory tree to maintain (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Prefix of generated index file names
    #[arg(short = 'p', long = "prefix")]
    pub prefix: Option<String>,

    /// Folder to index; `Folder` matches its subtree, `Pre*` any path starting with `Pre` (repeatable)
    #[arg(long = "include", action = clap::ArgAction::Append)]
    pub include: Vec<String>,

    /// Glob patterns of entries hidden from indexes (repeatable)
    #[arg(short = 'I', long = "ignore", action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Settings file (default: <PATH>/.dirindex.toml)
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long = "save-config")]
    pub save_config: bool,

    /// Synchronize the whole tree once and exit
    #[arg(long = "once", conflicts_with = "no_initial_sync")]
    pub once: bool,

    /// Skip the full synchronization at startup
    #[arg(long = "no-initial-sync")]
    pub no_initial_sync: bool,

    /// Debounce interval in milliseconds (minimum 50)
    #[arg(long = "debounce", default_value = "200")]
    pub debounce_ms: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        if self.debounce_ms < 50 {
            self.debounce_ms = 50;
        }
        if self.quiet {
            self.verbose = 0;
        }
        self
    }

    /// Default log directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
