//! Public server: plain static files from the published root.
//!
//! Knows nothing about publishing. Requests that arrive during a publish may
//! see a partially written tree.

use super::{path, response};
use crate::{core, debug};
use anyhow::Result;
use std::path::Path;
use tiny_http::{Method, Request};

/// Handle a single public request
pub fn handle_request(request: Request, root: &Path) -> Result<()> {
    if core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    debug!("public"; "{} {}", request.method(), request.url());

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_not_found(request, root);
    }

    match path::resolve_path(request.url(), root) {
        Some(file) => response::respond_file(request, &file),
        None => response::respond_not_found(request, root),
    }
}
