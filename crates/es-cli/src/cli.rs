//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use es_core::Status;

/// Equipment status reporting.
///
/// Records operator-reported running/maintenance changes and reports the
/// dwell time spent in each status.
#[derive(Debug, Parser)]
#[command(name = "eqs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a status change.
    Record(RecordArgs),

    /// Import status changes as JSON lines from stdin.
    Import(ImportArgs),

    /// List reconstructed intervals, newest first.
    Intervals(QueryArgs),

    /// Summarize time spent per status.
    Summary(QueryArgs),

    /// Show the current status and time since the last change.
    Status {
        /// Equipment to report on.
        #[arg(short, long)]
        equipment: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List known equipment and its latest record.
    Equipment,
}

/// Arguments for `eqs record`.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// New status (running, maintenance).
    #[arg(short, long)]
    pub status: Status,

    /// Date of the change (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Time of the change (HH:MM). Defaults to now.
    #[arg(long)]
    pub time: Option<String>,

    /// Equipment the change applies to.
    #[arg(short, long)]
    pub equipment: Option<String>,

    /// Free-text note.
    #[arg(short, long)]
    pub note: Option<String>,

    /// Who recorded the change.
    #[arg(short, long)]
    pub operator: Option<String>,
}

/// Arguments for `eqs import`.
#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Equipment to apply when incoming events omit `equipment`.
    #[arg(short, long)]
    pub equipment: Option<String>,
}

/// Snapshot selection shared by the reporting commands.
#[derive(Debug, Clone, Default, Args)]
pub struct QueryArgs {
    /// Equipment to report on.
    #[arg(short, long)]
    pub equipment: Option<String>,

    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}
