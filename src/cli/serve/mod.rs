//! Admin and public HTTP servers around one `Publisher`.
//!
//! ```text
//! admin  :5000  /api/*  → Publisher (publish / unpublish / status)
//!               /*      → builder_dir
//! public :8080  /*      → publish.dir
//! ```

mod admin;
mod api;
mod lifecycle;
mod path;
mod public;
mod response;

use crate::{config::cfg, engine::Publisher, log};
use anyhow::{Result, anyhow};
use std::sync::Arc;

/// Bind both servers and block until shutdown.
///
/// The public server runs on its own thread; the admin loop runs on the
/// calling thread.
pub fn serve() -> Result<()> {
    let config = cfg();
    let publisher = Arc::new(Publisher::new(
        config.publish.dir.clone(),
        config.publish.options(),
    ));
    // Status always starts Stopped; make sure the served root exists
    std::fs::create_dir_all(publisher.root())?;

    let serve = &config.serve;
    let (admin_server, admin_addr) =
        lifecycle::bind_with_retry("admin", serve.interface, serve.admin_port)?;
    let (public_server, public_addr) =
        lifecycle::bind_with_retry("public", serve.interface, serve.public_port)?;

    log!("admin"; "builder & API on http://{}", admin_addr);
    log!("public"; "published site on http://{}", public_addr);
    log!("publish"; "target {}", publisher.root().display());

    let public_root = publisher.root().to_path_buf();
    let workers = serve.workers;
    let public_thread = std::thread::Builder::new()
        .name("public".into())
        .spawn(move || {
            lifecycle::run_request_loop("public", &public_server, workers, move |request| {
                public::handle_request(request, &public_root)
            })
        })?;

    let admin_config = Arc::clone(&config);
    lifecycle::run_request_loop("admin", &admin_server, workers, move |request| {
        admin::handle_request(request, &publisher, &admin_config)
    })?;

    public_thread
        .join()
        .map_err(|_| anyhow!("public server thread panicked"))?
}
