//! Process shutdown state.
//!
//! Ctrl+C sets `SHUTDOWN` and unblocks every registered HTTP server so the
//! request loops return and `serve` can exit cleanly.

use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tiny_http::Server;

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// HTTP servers to unblock on shutdown
static SERVERS: Mutex<Vec<Arc<Server>>> = Mutex::new(Vec::new());

/// Setup the global Ctrl+C handler. Call once at program start
///
/// Before any server is registered the process exits immediately.
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        let servers = SERVERS.lock();
        if servers.is_empty() {
            std::process::exit(0);
        }

        crate::log!("serve"; "shutting down...");
        for server in servers.iter() {
            server.unblock();
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register an HTTP server for graceful shutdown
pub fn register_server(server: Arc<Server>) {
    SERVERS.lock().push(server);
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
