//! FinTrack CLI - Savings goal planner and expense tracker
//!
//! Usage:
//!   fintrack init                                  Initialize database
//!   fintrack goals add --name Car --target 12000 --deadline 2026-01-01
//!   fintrack expenses add --amount 42.5 --category kitchen
//!   fintrack report                                Distributions and health score
//!   fintrack serve                                 Start web server and open the dashboard

mod cli;
mod commands;


use anyhow::{Context, Result};
use clap::Parser;
use fintrack_core::{Clock, Config, SystemClock};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let db_path = cli.db.clone().unwrap_or_else(|| config.database_path.clone());
    debug!("Using database at {}", db_path.display());

    let today = SystemClock.today();

    match cli.command {
        Commands::Init => commands::cmd_init(&db_path),
        Commands::Dashboard => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_dashboard(&db, &config)
        }
        Commands::Goals { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&db, &config, today),
                Some(GoalsAction::Add {
                    name,
                    target,
                    current,
                    deadline,
                }) => commands::cmd_goals_add(&db, &config, today, &name, target, current, &deadline),
            }
        }
        Commands::Advise {
            target,
            current,
            deadline,
        } => commands::cmd_advise(&config, today, target, current, &deadline),
        Commands::Expenses { action } => {
            let db = commands::open_db(&db_path)?;
            match action {
                None => commands::cmd_expenses_list(&db, &config, Some(config.recent_transactions)),
                Some(ExpensesAction::List { limit }) => {
                    commands::cmd_expenses_list(&db, &config, limit)
                }
                Some(ExpensesAction::Add {
                    amount,
                    category,
                    date,
                }) => commands::cmd_expenses_add(&db, &config, today, amount, &category, date.as_deref()),
            }
        }
        Commands::Report => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_report(&db, &config)
        }
        Commands::Export { export_type } => {
            let db = commands::open_db(&db_path)?;
            match export_type {
                ExportType::Goals { format, output } => commands::cmd_export_table(
                    &db,
                    fintrack_core::ExportKind::Goals,
                    &format,
                    output.as_deref(),
                ),
                ExportType::Transactions { format, output } => commands::cmd_export_table(
                    &db,
                    fintrack_core::ExportKind::Transactions,
                    &format,
                    output.as_deref(),
                ),
                ExportType::Full { output } => commands::cmd_export_full(&db, &output),
            }
        }
        Commands::ImportFull { file, clear } => {
            let db = commands::open_db(&db_path)?;
            commands::cmd_import_full(&db, &file, clear)
        }
        Commands::Categories => commands::cmd_categories(),
        Commands::Serve {
            host,
            port,
            static_dir,
            no_open,
        } => {
            commands::cmd_serve(
                &db_path,
                &config,
                host.as_deref(),
                port,
                static_dir.as_deref(),
                no_open,
            )
            .await
        }
    }
}
