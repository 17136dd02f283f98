//! Admin server: publish API plus the builder application's static files.

use super::api::{self, ApiResponse};
use super::{path, response};
use crate::config::SiteConfig;
use crate::engine::Publisher;
use crate::{core, debug};
use anyhow::Result;
use std::io::Read;
use tiny_http::{Method, Request};

/// Handle a single admin request
pub fn handle_request(mut request: Request, publisher: &Publisher, config: &SiteConfig) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    debug!("admin"; "{} {}", request.method(), request.url());
    let cors = config.serve.cors;

    if request.method() == &Method::Options {
        return response::respond_preflight(request, cors);
    }

    if api::is_api_path(request.url()) {
        let body = match read_body(&mut request, config.serve.max_body_size)? {
            Some(body) => body,
            None => {
                let api = ApiResponse::failure(
                    413,
                    format!("request body exceeds {} bytes", config.serve.max_body_size),
                );
                return response::respond_json(request, api, cors);
            }
        };
        let url = request.url().to_string();
        let api = api::route(publisher, request.method(), &url, &body);
        return response::respond_json(request, api, cors);
    }

    let builder_dir = &config.publish.builder_dir;
    match path::resolve_path(request.url(), builder_dir) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request, builder_dir),
    }
}

/// Read the request body, or `None` if it is larger than `limit`.
fn read_body(request: &mut Request, limit: usize) -> Result<Option<Vec<u8>>> {
    if request.body_length().is_some_and(|len| len > limit) {
        return Ok(None);
    }

    let mut body = Vec::new();
    request
        .as_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut body)?;

    Ok((body.len() <= limit).then_some(body))
}
