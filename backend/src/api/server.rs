//! HTTP server for the Tunestats API and the browser app.
//!
//! # API Endpoints
//!
//! | Method | Path                   | Description                              |
//! |--------|------------------------|------------------------------------------|
//! | GET    | `/health`              | Health check                             |
//! | POST   | `/api/export`          | Export a playlist as a CSV attachment    |
//! | GET    | `/api/logs`            | SSE stream of export logs                |
//! | GET    | `/scripts/features.csv`| Reference table (when configured)        |
//! | GET    | `/*`                   | Static frontend files (when configured)  |

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::Value;
use std::{convert::Infallible, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tunestats_core::{export_playlist, ExportError, PlaylistExport, ReferenceTable};

use super::logs::{log_info, RequestLog, LOG_BROADCASTER};
use super::types::{error_response, ExportRequest, HealthResponse};
use crate::error::{ServerError, ServerResult};
use crate::spotify::SpotifyClient;

/// Path the browser app loads the reference table from.
pub const REFERENCE_TABLE_ROUTE: &str = "/scripts/features.csv";

const TRACKS_TOTAL: &str = "x-tracks-total";
const TRACKS_MATCHED: &str = "x-tracks-matched";
const REQUEST_ID: &str = "x-request-id";

/// Shared, read-only request state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub table: Arc<ReferenceTable>,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(table: ReferenceTable, spotify: SpotifyClient) -> Self {
        Self {
            table: Arc::new(table),
            spotify,
        }
    }
}

/// Server settings from the CLI.
#[derive(Debug, Clone, Default)]
pub struct ServerOptions {
    pub port: u16,
    /// Built frontend (trunk `dist/`)
    pub static_dir: Option<PathBuf>,
    /// Reference table file, also served to the browser
    pub features: Option<PathBuf>,
}

/// Build the application router.
pub fn router(state: AppState, options: &ServerOptions) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([
            header::CONTENT_TYPE,
            header::CONTENT_DISPOSITION,
            HeaderName::from_static(TRACKS_TOTAL),
            HeaderName::from_static(TRACKS_MATCHED),
            HeaderName::from_static(REQUEST_ID),
        ]);

    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/export", post(export))
        .route("/api/logs", get(sse_logs));

    if let Some(ref features) = options.features {
        app = app.route_service(REFERENCE_TABLE_ROUTE, ServeFile::new(features));
    }
    if let Some(ref dir) = options.static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(cors).with_state(state)
}

/// Start the HTTP server
pub async fn start_server(options: ServerOptions, state: AppState) -> ServerResult<()> {
    if let Some(ref dir) = options.static_dir {
        if !dir.is_dir() {
            return Err(ServerError::MissingStaticDir(dir.display().to_string()));
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], options.port));
    println!("🚀 Tunestats server running on http://localhost:{}", options.port);
    println!("   POST /api/export - Export playlist as CSV");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");
    if let Some(ref dir) = options.static_dir {
        println!("   GET  /*          - Static files from {}", dir.display());
    }
    println!();
    log_info(format!("📚 Reference table: {} rows", state.table.len()));

    let app = router(state, &options);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "tunestats".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        reference_rows: state.table.len(),
    })
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Export endpoint
async fn export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let log = RequestLog::new();
    log.info("📥 Export requested");

    let result = export_playlist(
        &state.spotify,
        &state.table,
        &request.link,
        &request.access_token,
        request.style,
    )
    .await;

    let export = result.map_err(|e| {
        match e {
            ExportError::InvalidAccessToken(ref cause) => log.error(format!("{} ({})", e, cause)),
            _ => log.error(e.to_string()),
        }
        (status_for(&e), Json(error_response(&e)))
    })?;

    log.success(format!(
        "🎵 '{}': matched {} of {} tracks",
        export.playlist_name, export.report.matched, export.report.total
    ));
    if !export.report.unmatched.is_empty() {
        log.warning(format!("No features for: {}", export.report.unmatched.join(", ")));
    }

    let headers = export_headers(&export, log.request_id());
    Ok((headers, export.document.to_string()).into_response())
}

fn status_for(error: &ExportError) -> StatusCode {
    match error {
        ExportError::InvalidLink => StatusCode::BAD_REQUEST,
        ExportError::InvalidAccessToken(_) => StatusCode::UNAUTHORIZED,
        ExportError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn export_headers(export: &PlaylistExport, request_id: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv; charset=utf-8"));
    headers.insert(header::CONTENT_DISPOSITION, content_disposition(&export.filename()));
    headers.insert(HeaderName::from_static(TRACKS_TOTAL), HeaderValue::from(export.report.total));
    headers.insert(HeaderName::from_static(TRACKS_MATCHED), HeaderValue::from(export.report.matched));
    if let Ok(id) = HeaderValue::from_str(request_id) {
        headers.insert(HeaderName::from_static(REQUEST_ID), id);
    }
    headers
}

/// `attachment; filename="<name>"`, quotes and control characters replaced.
fn content_disposition(filename: &str) -> HeaderValue {
    let safe: String = filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '\'',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    HeaderValue::from_str(&format!("attachment; filename=\"{}\"", safe))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"playlist.csv\""))
}
