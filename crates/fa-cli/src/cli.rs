//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Factory attendance tracker.
///
/// Reconciles badge scan events into daily attendance records and derives
/// overtime and absence reports from them.
#[derive(Debug, Parser)]
#[command(name = "fa", version, about, long_about = None)]
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
    /// Record a badge scan into the day's candidate log.
    Scan {
        /// The 4-digit badge token.
        #[arg(long)]
        token: String,

        /// Scan date (YYYY-MM-DD); must not be in the future.
        #[arg(long)]
        date: NaiveDate,

        /// Scan time of day (HH:MM).
        #[arg(long)]
        time: String,
    },

    /// Reconcile a month's candidate logs into attendance records.
    Merge {
        /// Reporting month (YYYY-MM).
        #[arg(long)]
        month: String,
    },

    /// Generate the overtime report for a date.
    Overtime {
        /// Report date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Emit JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// Generate the absentee report for a date.
    Absent {
        /// Report date (YYYY-MM-DD).
        #[arg(long)]
        date: NaiveDate,

        /// Emit JSON instead of the table.
        #[arg(long)]
        json: bool,
    },

    /// Manage the employee roster.
    Roster {
        #[command(subcommand)]
        action: RosterAction,
    },
}

/// Roster subcommands.
#[derive(Debug, Subcommand)]
pub enum RosterAction {
    /// Append a profile; re-adding an employee ID updates it (last wins).
    Add {
        /// Employee ID ('S' + 4 digits).
        #[arg(long)]
        id: String,

        /// Display name.
        #[arg(long)]
        name: String,

        /// Mobile number (8 digits, starting with 8 or 9).
        #[arg(long)]
        mobile: String,

        /// Email address.
        #[arg(long)]
        email: String,

        /// The 4-digit badge token.
        #[arg(long)]
        token: String,
    },

    /// List the deduplicated roster.
    List,
}
