//! FinTrack Web Server
//!
//! Axum-based JSON API for the FinTrack savings and expense tracker. It is
//! meant to run on localhost next to a dashboard front end:
//! - Restrictive CORS policy (same-origin unless origins are configured)
//! - Security headers on every response
//! - Sanitized error responses
//! - Optional static file serving for a bundled UI

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info};

use fintrack_core::{Clock, Database, SystemClock};

mod handlers;
pub mod launcher;

pub use launcher::{spawn_browser_launcher, LauncherConfig};

/// Maximum number of transactions returned by one list request
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Currency symbol used in advice messages
    pub currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            currency: "₺".to_string(),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    /// Source of "today" for advice and undated transactions
    pub clock: Arc<dyn Clock>,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    create_router_with_clock(db, static_dir, config, Arc::new(SystemClock))
}

/// Create the application router with a fixed clock (for testing)
pub fn create_router_with_clock(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    clock: Arc<dyn Clock>,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        clock,
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        .route("/categories", get(handlers::list_categories))
        // Goal planner
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route("/goals/:id", get(handlers::get_goal))
        .route("/goals/:id/advice", get(handlers::get_goal_advice))
        .route("/advisor", post(handlers::advise))
        // Expenses
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        // Reports
        .route("/reports/summary", get(handlers::report_summary))
        .route("/reports/health", get(handlers::report_health))
        // Export / backup
        .route("/export/goals", get(handlers::export_goals))
        .route("/export/transactions", get(handlers::export_transactions))
        .route("/export/full", get(handlers::export_full))
        .route("/import/full", post(handlers::import_full));

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    // CSP: same-origin scripts, inline styles for chart libraries, data: images
    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'"
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server, optionally opening the dashboard in a browser once the
/// listener is bound
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
    launcher: Option<LauncherConfig>,
) -> anyhow::Result<()> {
    let app = create_router(db, static_dir, config);

    let listener = bind_listener(host, port).await?;
    info!("Starting server at http://{}", listener.local_addr()?);

    if let Some(launcher) = launcher {
        // Never awaited
        let _ = spawn_browser_launcher(launcher);
    }

    axum::serve(listener, app).await?;

    Ok(())
}

/// Host as a resolver accepts it, without the brackets of an IPv6 URL host
fn bind_host(host: &str) -> &str {
    host.strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host)
}

/// Bind a listener on `host:port`; IPv6 literals work bare or bracketed
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind((bind_host(host), port)).await
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error, surfacing validation and lookup failures to the client
    pub fn from_core(err: fintrack_core::Error) -> Self {
        match err {
            fintrack_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            fintrack_core::Error::NotFound(msg) => Self::not_found(&msg),
            other => Self::from(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
