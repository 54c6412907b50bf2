//! Local authoring server: `POST /save` rewrites the stage catalog script,
//! `POST /upload` stores an image next to the other lesson images.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use activity_engine::stage::write_script;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::{header, HeaderMap, HeaderName, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

pub const FILE_NAME_HEADER: &str = "x-file-name";
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 3000);

/// Where saved catalogs and uploaded images go.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub stages_path: PathBuf,
    pub images_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(FILE_NAME_HEADER)]);

    Router::new()
        .route("/save", post(save))
        .route("/upload", post(upload))
        .fallback(not_found)
        .with_state(state)
        // Lesson images are stored as sent, with no size cap.
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(middleware::from_fn(options_no_content))
}

/// Listen address: explicit flag, then `ACTIVITY_SERVER_ADDR`, then
/// `ACTIVITY_SERVER_PORT` on localhost, then 127.0.0.1:3000.
pub fn resolve_addr<F>(explicit: Option<SocketAddr>, mut get_env: F) -> SocketAddr
where
    F: FnMut(&str) -> Option<String>,
{
    if let Some(addr) = explicit {
        return addr;
    }
    if let Some(addr) = get_env("ACTIVITY_SERVER_ADDR").and_then(|v| v.parse().ok()) {
        return addr;
    }
    if let Some(port) = get_env("ACTIVITY_SERVER_PORT").and_then(|v| v.parse::<u16>().ok()) {
        return SocketAddr::from(([127, 0, 0, 1], port));
    }
    DEFAULT_ADDR
}

#[derive(Debug, Serialize)]
struct SaveResponse {
    success: bool,
    message: &'static str,
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    path: String,
}

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        let body = serde_json::json!({ "success": false, "message": message });
        (status, Json(body)).into_response()
    }
}

async fn save(State(state): State<AppState>, body: Bytes) -> Result<Json<SaveResponse>, ApiError> {
    let path = &state.config.stages_path;
    let catalog: Value = serde_json::from_slice(&body).map_err(|e| {
        log::error!("save rejected: {e}");
        ApiError::Internal(e.to_string())
    })?;
    let script = write_script(&catalog).map_err(|e| ApiError::Internal(e.to_string()))?;
    tokio::fs::write(path, script).await.map_err(|e| {
        log::error!("could not write {}: {e}", path.display());
        ApiError::Internal(e.to_string())
    })?;
    log::info!("saved stages to {}", path.display());
    Ok(Json(SaveResponse {
        success: true,
        message: "Saved successfully",
    }))
}

async fn upload(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Result<Json<UploadResponse>, ApiError> {
    let raw = headers
        .get(FILE_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest(format!("missing {FILE_NAME_HEADER} header")))?;
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| ApiError::BadRequest(format!("bad file name: {e}")))?;
    let name = sanitize_file_name(&decoded).ok_or_else(|| ApiError::BadRequest(format!("bad file name: {decoded}")))?;

    let dir = &state.config.images_dir;
    let target = dir.join(&name);
    let written = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&target, &body).await
    };
    written.await.map_err(|e| {
        log::error!("could not store {}: {e}", target.display());
        ApiError::Internal(e.to_string())
    })?;

    log::info!("uploaded {} bytes to {}", body.len(), target.display());
    Ok(Json(UploadResponse {
        success: true,
        path: format!("{}/{}", dir.display(), name),
    }))
}

/// Replace whitespace runs with `_` and drop path separators.
/// `None` when nothing usable is left.
pub fn sanitize_file_name(name: &str) -> Option<String> {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c != '/' && c != '\\' {
            out.push(c);
        }
    }
    match out.as_str() {
        "" | "." | ".." => None,
        _ => Some(out),
    }
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// OPTIONS always answers 204, CORS headers included.
async fn options_no_content(req: Request, next: Next) -> Response {
    let is_options = req.method() == Method::OPTIONS;
    let mut res = next.run(req).await;
    if is_options {
        *res.status_mut() = StatusCode::NO_CONTENT;
    }
    res
}
