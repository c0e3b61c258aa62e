//! FinTrack Core Library
//!
//! Shared functionality for the FinTrack savings and expense tracker:
//! - Virtual advisor (monthly savings needed to reach a goal)
//! - Dashboard metrics and the financial health score
//! - Storage interface and its SQLite implementation
//! - Report aggregation for the dashboard and report views
//! - CSV/JSON export and full backups
//! - Configuration loading

pub mod advisor;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod reports;
pub mod store;

pub use advisor::{Advice, Clock, FallbackReason, FixedClock, SystemClock};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use export::{ExportFormat, ExportKind, FullBackup, ImportStats};
pub use reports::{GoalPlan, Reporter};
pub use store::FinanceStore;
