//! Built-in content server
//!
//! Serves the site's static pages and assets plus two read-only JSON
//! endpoints. Static file resolution (including traversal rejection) is
//! delegated to `tower_http`'s `ServeDir`/`ServeFile`.

pub mod company;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Serialize;
use tower_http::services::{ServeDir, ServeFile};

use crate::error::{Result, SitectlError};

/// Paths the server resolves against a project root
#[derive(Debug, Clone)]
pub struct ServerContext {
    /// Root of the live site sources (pages, styles, scripts, assets)
    pub static_root: PathBuf,
    /// Directory holding the text files backing the JSON API
    pub data_dir: PathBuf,
}

impl ServerContext {
    /// Conventional layout under a project root
    pub fn for_project(root: &Path) -> Self {
        Self {
            static_root: root.join("src"),
            data_dir: root.join("data"),
        }
    }

    fn pages_dir(&self) -> PathBuf {
        self.static_root.join("pages")
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// Build the content server router
pub fn router(ctx: ServerContext) -> Router {
    let pages = ctx.pages_dir();
    Router::new()
        .route_service("/", ServeFile::new(pages.join("index.html")))
        .route_service("/overview", ServeFile::new(pages.join("overview.html")))
        .route_service("/about", ServeFile::new(pages.join("about.html")))
        .nest_service("/static", ServeDir::new(ctx.static_root.clone()))
        .nest_service("/assets", ServeDir::new(ctx.static_root.join("assets")))
        .nest_service("/styles", ServeDir::new(ctx.static_root.join("styles")))
        .nest_service("/scripts", ServeDir::new(ctx.static_root.join("scripts")))
        .route("/api/company-data", get(company_data))
        .route("/api/health", get(health))
        .with_state(Arc::new(ctx))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn company_data(State(ctx): State<Arc<ServerContext>>) -> Response {
    match company::load(&ctx.data_dir) {
        Ok(data) => Json(data).into_response(),
        Err(e) => {
            tracing::error!("company data assembly failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Run the content server in the foreground until the process is stopped
pub fn serve(root: &Path, host: &str, port: u16) -> Result<()> {
    init_tracing();

    let ctx = ServerContext::for_project(root);
    let serve_error = |e: &dyn std::fmt::Display| SitectlError::ServeFailed {
        reason: e.to_string(),
    };

    let runtime = tokio::runtime::Runtime::new().map_err(|e| serve_error(&e))?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind((host, port))
            .await
            .map_err(|e| serve_error(&e))?;
        tracing::info!("content server listening on http://{}:{}", host, port);
        axum::serve(listener, router(ctx))
            .await
            .map_err(|e| serve_error(&e))
    })
}

fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitectl=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
