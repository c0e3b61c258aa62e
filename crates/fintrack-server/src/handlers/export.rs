//! Export and full backup/import handlers

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Query, State},
    http::{header, Response, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::parse_body;
use crate::{AppError, AppState};
use fintrack_core::{ExportFormat, ExportKind, FullBackup, ImportStats};

/// Query parameters for table export
#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Output format (default: csv)
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "csv".to_string()
}

/// GET /api/export/goals - Export goals to CSV or JSON
pub async fn export_goals(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<Response<Body>, AppError> {
    export_table(&state, ExportKind::Goals, &params.format)
}

/// GET /api/export/transactions - Export transactions to CSV or JSON
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportQuery>,
) -> Result<Response<Body>, AppError> {
    export_table(&state, ExportKind::Transactions, &params.format)
}

fn export_table(state: &AppState, kind: ExportKind, format: &str) -> Result<Response<Body>, AppError> {
    let format: ExportFormat = format.parse().map_err(|e: String| AppError::bad_request(&e))?;
    let output = state.db.export(kind, format)?;
    info!("Exported {} as {}", kind.as_str(), format.extension());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.content_type())
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"{}.{}\"",
                kind.as_str(),
                format.extension()
            ),
        )
        .body(Body::from(output))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// GET /api/export/full - Export full database backup as JSON
pub async fn export_full(State(state): State<Arc<AppState>>) -> Result<Response<Body>, AppError> {
    info!("Exporting full database backup");
    let backup = state.db.export_full_backup()?;

    let json =
        serde_json::to_string_pretty(&backup).map_err(|e| AppError::internal(&e.to_string()))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .header(
            header::CONTENT_DISPOSITION,
            format!(
                "attachment; filename=\"fintrack-backup-{}.json\"",
                state.clock.today().format("%Y-%m-%d")
            ),
        )
        .body(Body::from(json))
        .map_err(|e| AppError::internal(&e.to_string()))
}

/// Query parameters for full import
#[derive(Debug, Deserialize)]
pub struct ImportFullQuery {
    /// Clear existing data before import
    #[serde(default)]
    pub clear: bool,
}

/// Response for full import
#[derive(Serialize)]
pub struct ImportFullResponse {
    pub success: bool,
    pub stats: ImportStats,
}

/// POST /api/import/full - Restore a full backup from JSON
pub async fn import_full(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ImportFullQuery>,
    body: Bytes,
) -> Result<Json<ImportFullResponse>, AppError> {
    let backup: FullBackup = parse_body(&body)?;

    info!(
        "Importing full backup: version={}, records={}",
        backup.metadata.version, backup.metadata.total_records
    );

    let stats = state
        .db
        .import_full_backup(&backup, params.clear)
        .map_err(AppError::from_core)?;

    Ok(Json(ImportFullResponse {
        success: true,
        stats,
    }))
}
