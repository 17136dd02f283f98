//! Admin JSON API.
//!
//! Routing is kept free of the HTTP transport so handlers can be tested
//! with plain byte slices.
//!
//! | Route                      | Method | Engine call  |
//! |----------------------------|--------|--------------|
//! | `/api/server-status`       | GET    | `status`     |
//! | `/api/publish`             | POST   | `publish`    |
//! | `/api/stop-server`         | POST   | `unpublish`  |
//! | `/api/unpublish`           | POST   | `unpublish`  |

use crate::engine::{PublishBundle, PublishError, Publisher, unix_now};
use crate::log;
use serde_json::{Value, json};
use tiny_http::Method;

pub const API_PREFIX: &str = "/api/";

/// Transport-independent API response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
    /// Send `Cache-Control: no-store`.
    pub no_store: bool,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            no_store: false,
        }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "success": false, "error": error.into() }),
            no_store: false,
        }
    }
}

/// Whether `path` belongs to the API rather than the builder's static files.
pub fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}

/// Dispatch an API request to the engine.
pub fn route(publisher: &Publisher, method: &Method, path: &str, body: &[u8]) -> ApiResponse {
    let path = path.split('?').next().unwrap_or(path);

    match (path, method) {
        ("/api/server-status", Method::Get) => server_status(publisher),
        ("/api/publish", Method::Post) => publish(publisher, body),
        ("/api/stop-server" | "/api/unpublish", Method::Post) => unpublish(publisher),
        ("/api/server-status" | "/api/publish" | "/api/stop-server" | "/api/unpublish", _) => {
            ApiResponse::failure(405, format!("method {method} not allowed on {path}"))
        }
        _ => ApiResponse::failure(404, format!("unknown API route {path}")),
    }
}

fn server_status(publisher: &Publisher) -> ApiResponse {
    ApiResponse {
        status: 200,
        body: json!({
            "status": publisher.status().as_str(),
            "timestamp": unix_now() * 1000,
        }),
        no_store: true,
    }
}

fn publish(publisher: &Publisher, body: &[u8]) -> ApiResponse {
    let bundle: PublishBundle = match serde_json::from_slice(body) {
        Ok(bundle) => bundle,
        Err(e) => return ApiResponse::failure(400, format!("invalid publish request: {e}")),
    };

    match publisher.publish(&bundle) {
        Ok(result) => {
            let message = live_message(&bundle);
            log!("publish"; "{} ({} files, tag {})", message, result.files_written, result.cache_tag);
            ApiResponse::ok(json!({
                "success": true,
                "message": message,
                "version": result.version,
                "cacheTag": result.cache_tag,
                "publishedAt": result.published_at,
                "filesWritten": result.files_written,
                "skipped": result.skipped,
                "status": result.status.as_str(),
            }))
        }
        Err(e) => {
            log!("error"; "publish failed: {}", error_chain(&e));
            ApiResponse::failure(error_status(&e), error_chain(&e))
        }
    }
}

fn unpublish(publisher: &Publisher) -> ApiResponse {
    match publisher.unpublish() {
        Ok(result) => {
            log!("unpublish"; "site stopped ({} entries removed)", result.removed);
            let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
            ApiResponse::ok(json!({
                "success": true,
                "message": "site stopped",
                "warnings": warnings,
            }))
        }
        Err(e) => {
            log!("error"; "unpublish failed: {}", error_chain(&e));
            ApiResponse::failure(500, error_chain(&e))
        }
    }
}

fn live_message(bundle: &PublishBundle) -> String {
    match (&bundle.project_id, &bundle.version_label) {
        (Some(project), Some(version)) => format!("project {project} v{version} is live"),
        (None, Some(version)) => format!("v{version} is live"),
        (Some(project), None) => format!("project {project} is live"),
        (None, None) => "site is live".to_string(),
    }
}

fn error_status(error: &PublishError) -> u16 {
    if error.is_invalid_input() { 400 } else { 500 }
}

/// Error message including its I/O cause.
fn error_chain(error: &PublishError) -> String {
    use std::error::Error;
    match error.source() {
        Some(source) => format!("{error}: {source}"),
        None => error.to_string(),
    }
}
