//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::warn;

use super::Database;
use crate::error::Result;
use crate::models::{Category, NewTransaction, Transaction};

const TRANSACTION_COLUMNS: &str = "id, amount, category, date";

/// Read a transaction row. A row whose date is not `YYYY-MM-DD` is logged
/// and skipped so one bad row does not take down every expense view.
fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Option<Transaction>> {
    let id: i64 = row.get(0)?;
    let category_str: String = row.get(2)?;
    let date_str: String = row.get(3)?;

    let date = match NaiveDate::parse_from_str(&date_str, "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => {
            warn!(id, date = %date_str, "Skipping transaction with unreadable date: {}", e);
            return Ok(None);
        }
    };

    Ok(Some(Transaction {
        id,
        amount: row.get(1)?,
        category: category_str.parse().unwrap_or(Category::Other),
        date,
    }))
}

impl Database {
    /// Insert a transaction, dating it `today` when no date was given
    pub fn insert_transaction(&self, tx: &NewTransaction, today: NaiveDate) -> Result<Transaction> {
        tx.validate()?;
        let date = tx.date.unwrap_or(today);
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO transactions (amount, category, date) VALUES (?, ?, ?)",
            params![tx.amount, tx.category.as_str(), date.to_string()],
        )?;

        Ok(Transaction {
            id: conn.last_insert_rowid(),
            amount: tx.amount,
            category: tx.category,
            date,
        })
    }

    /// List all transactions in insertion order
    pub fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions ORDER BY id",
            TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map([], transaction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions.into_iter().flatten().collect())
    }

    /// The last `limit` stored transactions, oldest first. Unreadable rows
    /// count toward the limit and are then skipped.
    pub fn get_recent_transactions(&self, limit: usize) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM (SELECT {} FROM transactions ORDER BY id DESC LIMIT ?) ORDER BY id",
            TRANSACTION_COLUMNS, TRANSACTION_COLUMNS
        ))?;

        let transactions = stmt
            .query_map(params![limit as i64], transaction_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions.into_iter().flatten().collect())
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let tx = conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS),
                params![id],
                transaction_from_row,
            )
            .optional()?;

        Ok(tx.flatten())
    }

    /// Number of stored transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }

    /// Insert a transaction keeping its original id (backup restore)
    pub(crate) fn restore_transaction(&self, tx: &Transaction) -> Result<bool> {
        let conn = self.conn()?;
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO transactions (id, amount, category, date) VALUES (?, ?, ?, ?)",
            params![tx.id, tx.amount, tx.category.as_str(), tx.date.to_string()],
        )?;
        Ok(inserted > 0)
    }
}
