use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "forum-stats")]
#[command(about = "Pull monthly usage stats from a Discourse forum and mail them as CSV")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch monthly report totals and write one CSV per report
    Fetch {
        /// How many trailing calendar months to aggregate
        #[arg(long, default_value = "10")]
        look_back: usize,

        /// Directory the CSV files are written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Minimum delay before each API request, in milliseconds
        #[arg(long, default_value_t = crate::core::throttle::DEFAULT_DELAY_MS)]
        rate_limit_ms: u64,

        #[arg(long, help = "Enable verbose output")]
        verbose: bool,
    },

    /// Mail every CSV file in a directory to the distribution list
    Send {
        /// Directory scanned (non-recursively) for *.csv attachments
        #[arg(long, default_value = ".")]
        input_dir: PathBuf,

        #[arg(long, help = "Enable verbose output")]
        verbose: bool,
    },
}
