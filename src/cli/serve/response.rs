//! HTTP response helpers shared by the admin and public servers.

use super::api::ApiResponse;
use crate::utils::mime::{self, types};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);

    if is_head_request(&request) {
        let response = Response::empty(StatusCode(200))
            .with_header(make_header("Content-Type", content_type));
        return request.respond(response).map_err(Into::into);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a plain 404, or `404.html` from `root` when present.
pub fn respond_not_found(request: Request, root: &Path) -> Result<()> {
    let custom = root.join("404.html");
    if !is_head_request(&request)
        && let Ok(body) = fs::read(&custom)
    {
        return send_body(request, 404, types::HTML, body);
    }
    send_body(request, 404, types::PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 503 while shutting down.
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, types::PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with an API result as JSON.
pub fn respond_json(request: Request, api: ApiResponse, cors: bool) -> Result<()> {
    let body = serde_json::to_vec(&api.body)?;
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(api.status))
        .with_header(make_header("Content-Type", types::JSON));

    if api.no_store {
        response.add_header(make_header("Cache-Control", "no-store"));
    }
    if cors {
        for header in cors_headers() {
            response.add_header(header);
        }
    }

    request.respond(response).map_err(Into::into)
}

/// Answer a CORS preflight.
pub fn respond_preflight(request: Request, cors: bool) -> Result<()> {
    let mut response = Response::empty(StatusCode(204));
    if cors {
        for header in cors_headers() {
            response.add_header(header);
        }
    }
    request.respond(response).map_err(Into::into)
}

fn cors_headers() -> [Header; 3] {
    [
        make_header("Access-Control-Allow-Origin", "*"),
        make_header("Access-Control-Allow-Methods", "GET, POST, OPTIONS"),
        make_header("Access-Control-Allow-Headers", "Content-Type"),
    ]
}

pub fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Header {
    // Static ASCII names and values always form a valid header
    Header::from_bytes(key, value).unwrap()
}
