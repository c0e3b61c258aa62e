//! Export functionality for goals, transactions and full backups
//!
//! Supports:
//! - Goal and transaction export as CSV or JSON
//! - Full JSON backup export/import of both tables

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{Goal, Transaction};

/// Current backup format version
pub const BACKUP_VERSION: u32 = 1;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Use 'csv' or 'json'", s)),
        }
    }
}

/// Which table to export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Goals,
    Transactions,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::Transactions => "transactions",
        }
    }
}

/// CSV row for a transaction (category as its label)
#[derive(Debug, Serialize)]
struct TransactionRow<'a> {
    id: i64,
    date: String,
    amount: f64,
    category: &'a str,
}

/// Backup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub total_records: usize,
}

/// Full database backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub goals: Vec<Goal>,
    pub transactions: Vec<Transaction>,
}

/// Result of restoring a backup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStats {
    pub goals_imported: usize,
    pub goals_skipped: usize,
    pub transactions_imported: usize,
    pub transactions_skipped: usize,
}

impl Database {
    /// Render goals or transactions in the requested format
    pub fn export(&self, kind: ExportKind, format: ExportFormat) -> Result<String> {
        let output = match (kind, format) {
            (ExportKind::Goals, ExportFormat::Csv) => goals_to_csv(&self.get_goals()?)?,
            (ExportKind::Goals, ExportFormat::Json) => {
                serde_json::to_string_pretty(&self.get_goals()?)?
            }
            (ExportKind::Transactions, ExportFormat::Csv) => {
                transactions_to_csv(&self.get_transactions()?)?
            }
            (ExportKind::Transactions, ExportFormat::Json) => {
                serde_json::to_string_pretty(&self.get_transactions()?)?
            }
        };
        Ok(output)
    }

    /// Snapshot both tables
    pub fn export_full_backup(&self) -> Result<FullBackup> {
        let goals = self.get_goals()?;
        let transactions = self.get_transactions()?;

        Ok(FullBackup {
            metadata: BackupMetadata {
                version: BACKUP_VERSION,
                exported_at: Utc::now(),
                total_records: goals.len() + transactions.len(),
            },
            goals,
            transactions,
        })
    }

    /// Restore a backup, keeping original ids
    ///
    /// Rows whose id already exists are skipped. With `clear_existing` all
    /// current rows are deleted first.
    pub fn import_full_backup(&self, backup: &FullBackup, clear_existing: bool) -> Result<ImportStats> {
        if backup.metadata.version > BACKUP_VERSION {
            return Err(Error::InvalidData(format!(
                "Backup version {} is newer than supported version {}",
                backup.metadata.version, BACKUP_VERSION
            )));
        }

        if clear_existing {
            self.clear_all()?;
        }

        let mut stats = ImportStats::default();

        for goal in &backup.goals {
            if self.restore_goal(goal)? {
                stats.goals_imported += 1;
            } else {
                stats.goals_skipped += 1;
            }
        }

        for tx in &backup.transactions {
            if self.restore_transaction(tx)? {
                stats.transactions_imported += 1;
            } else {
                stats.transactions_skipped += 1;
            }
        }

        info!(
            "Restored backup: {} goals ({} skipped), {} transactions ({} skipped)",
            stats.goals_imported,
            stats.goals_skipped,
            stats.transactions_imported,
            stats.transactions_skipped
        );

        Ok(stats)
    }
}

fn goals_to_csv(goals: &[Goal]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for goal in goals {
        writer.serialize(goal)?;
    }
    if goals.is_empty() {
        writer.write_record(["id", "name", "target", "current", "deadline"])?;
    }
    finish_csv(writer)
}

fn transactions_to_csv(transactions: &[Transaction]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for tx in transactions {
        writer.serialize(TransactionRow {
            id: tx.id,
            date: tx.date.to_string(),
            amount: tx.amount,
            category: tx.category.label(),
        })?;
    }
    if transactions.is_empty() {
        writer.write_record(["id", "date", "amount", "category"])?;
    }
    finish_csv(writer)
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| Error::InvalidData(format!("CSV is not UTF-8: {}", e)))
}
