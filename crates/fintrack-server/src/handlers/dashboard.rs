//! Health, dashboard and category handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{AppError, AppState};
use fintrack_core::models::{Category, DashboardSummary};
use fintrack_core::Reporter;

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/dashboard - Goal totals and the target-vs-current series
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = Reporter::new(&state.db)
        .dashboard()
        .map_err(AppError::from_core)?;
    Ok(Json(summary))
}

#[derive(Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub label: &'static str,
}

/// GET /api/categories - The fixed expense categories, in display order
pub async fn list_categories() -> Json<Vec<CategoryInfo>> {
    Json(
        Category::all()
            .iter()
            .map(|c| CategoryInfo {
                id: c.as_str(),
                label: c.label(),
            })
            .collect(),
    )
}
