//! Server binding and request loop.

use crate::{core, log};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tiny_http::{Request, Server};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(
    name: &str,
    interface: std::net::IpAddr,
    base_port: u16,
) -> Result<(Arc<Server>, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!(name; "port {} in use, using {} instead", base_port, port);
                }
                let server = Arc::new(server);
                core::register_server(Arc::clone(&server));
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow::anyhow!(
        "{} server failed to bind after {} attempts (ports {}-{}): {}",
        name,
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Serve requests on a thread pool until the server is unblocked.
pub fn run_request_loop<F>(name: &'static str, server: &Server, workers: usize, handler: F) -> Result<()>
where
    F: Fn(Request) -> Result<()> + Send + Sync + 'static,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(move |i| format!("{name}-{i}"))
        .build()?;
    let handler = Arc::new(handler);

    for request in server.incoming_requests() {
        let handler = Arc::clone(&handler);
        pool.spawn(move || {
            if let Err(e) = handler(request) {
                log!(name; "request error: {e:#}");
            }
        });
    }

    Ok(())
}
