//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinTrack - Plan savings goals and track expenses
#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Personal savings goal planner and expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (overrides the config file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Config file (defaults to FINTRACK_CONFIG, then the per-user file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create or verify the database
    Init,

    /// Goal totals and target-vs-current overview
    Dashboard,

    /// Savings goal planner
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Calculate the monthly saving needed for a goal without saving it
    Advise {
        /// Target amount
        #[arg(short, long)]
        target: f64,

        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
    },

    /// Expense tracking
    Expenses {
        #[command(subcommand)]
        action: Option<ExpensesAction>,
    },

    /// Goal and expense distributions, progress and health score
    Report,

    /// Export data
    Export {
        #[command(subcommand)]
        export_type: ExportType,
    },

    /// Restore a full JSON backup
    ImportFull {
        /// Backup file created by 'fintrack export full'
        #[arg(short, long)]
        file: PathBuf,

        /// Delete existing goals and transactions first
        #[arg(long)]
        clear: bool,
    },

    /// List the expense categories
    Categories,

    /// Start the web server
    Serve {
        /// Host to bind to (defaults to the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory of static files to serve (the dashboard UI)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Don't open a browser window
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List goals with their current advice
    List,

    /// Analyse and save a goal
    Add {
        /// Goal name
        #[arg(short, long)]
        name: String,

        /// Target amount
        #[arg(short, long)]
        target: f64,

        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        deadline: String,
    },
}

#[derive(Subcommand)]
pub enum ExpensesAction {
    /// List expenses (all, or the last N)
    List {
        /// Only the last N expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Record an expense
    Add {
        /// Amount spent
        #[arg(short, long)]
        amount: f64,

        /// Category (kitchen, rent, entertainment, transport, other)
        #[arg(short, long)]
        category: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ExportType {
    /// Export goals to CSV or JSON
    Goals {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export transactions to CSV or JSON
    Transactions {
        /// Output format: csv or json
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export full database backup to JSON
    Full {
        /// Output file (required)
        #[arg(short, long)]
        output: PathBuf,
    },
}
