//! Report handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use fintrack_core::models::FinancialReport;
use fintrack_core::Reporter;

/// GET /api/reports/summary - Distributions, progress table and health score
pub async fn report_summary(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FinancialReport>, AppError> {
    let report = Reporter::new(&state.db)
        .report()
        .map_err(AppError::from_core)?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
pub struct HealthScoreResponse {
    pub score: i64,
    pub total_savings: f64,
    pub total_expenses: f64,
}

/// GET /api/reports/health - Just the financial health score and its inputs
pub async fn report_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthScoreResponse>, AppError> {
    let report = Reporter::new(&state.db)
        .report()
        .map_err(AppError::from_core)?;
    Ok(Json(HealthScoreResponse {
        score: report.health_score,
        total_savings: report.total_savings,
        total_expenses: report.total_expenses,
    }))
}
