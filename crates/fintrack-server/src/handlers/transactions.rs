//! Expense transaction handlers

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::parse_body;
use crate::{AppError, AppState, MAX_PAGE_LIMIT};
use fintrack_core::advisor::DEADLINE_FORMAT;
use fintrack_core::models::{Category, NewTransaction, Transaction};
use fintrack_core::FinanceStore;

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct TransactionQuery {
    /// Only the last N transactions (all when omitted)
    pub limit: Option<usize>,
}

/// GET /api/transactions - All transactions, or the last `limit`, oldest first
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TransactionQuery>,
) -> Result<Json<Vec<Transaction>>, AppError> {
    let transactions = match params.limit {
        Some(limit) => state.db.recent_transactions(limit.min(MAX_PAGE_LIMIT)),
        None => state.db.list_transactions(),
    }
    .map_err(AppError::from_core)?;
    Ok(Json(transactions))
}

/// Request body for recording an expense
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    /// Category id or label (case-insensitive)
    pub category: String,
    /// YYYY-MM-DD; today when omitted
    pub date: Option<String>,
}

/// POST /api/transactions - Record an expense
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Transaction>, AppError> {
    let req: CreateTransactionRequest = parse_body(&body)?;

    let category: Category = req
        .category
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let mut new_tx = NewTransaction::new(req.amount, category);
    if let Some(date) = req.date.as_deref() {
        let date = NaiveDate::parse_from_str(date, DEADLINE_FORMAT)
            .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))?;
        new_tx = new_tx.on(date);
    }

    let tx = state
        .db
        .add_transaction_on(&new_tx, state.clock.today())
        .map_err(AppError::from_core)?;
    info!(transaction_id = tx.id, "Recorded {} expense", tx.category);

    Ok(Json(tx))
}
