//! `[serve]` section configuration.
//!
//! Contains the admin and public HTTP server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"       # Network interface for both servers
//! admin_port = 5000           # Builder UI + publish API
//! public_port = 8080          # Published site
//! workers = 4                 # Request threads per server
//! max_body_size = 52428800    # Largest accepted publish request, in bytes
//! cors = true                 # Allow cross-origin calls to the API
//! ```

use crate::config::ConfigDiagnostics;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `0.0.0.0` (default): all interfaces
    /// - `127.0.0.1`: localhost only
    pub interface: IpAddr,

    /// Port for the builder UI and the publish API.
    pub admin_port: u16,

    /// Port the published site is served on.
    pub public_port: u16,

    /// Worker threads handling requests, per server.
    pub workers: usize,

    /// Maximum publish request body, in bytes.
    pub max_body_size: usize,

    /// Send `Access-Control-Allow-*` headers on API responses.
    pub cors: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            admin_port: 5000,
            public_port: 8080,
            workers: 4,
            max_body_size: 50 * 1024 * 1024,
            cors: true,
        }
    }
}

impl ServeConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.admin_port == self.public_port && self.admin_port != 0 {
            diag.error_with_hint(
                "serve.public_port",
                format!("admin and public servers both use port {}", self.admin_port),
                "pick a different `public_port`",
            );
        }
        if self.workers == 0 {
            diag.error("serve.workers", "must be at least 1");
        }
        if self.max_body_size == 0 {
            diag.error("serve.max_body_size", "must be greater than 0");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use crate::config::{ConfigDiagnostics, test_parse_config};

    #[test]
    fn test_serve_config() {
        let config = test_parse_config(
            "[serve]\ninterface = \"127.0.0.1\"\nadmin_port = 80\npublic_port = 8081\ncors = false",
        );

        assert_eq!(
            config.serve.interface,
            IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
        );
        assert_eq!(config.serve.admin_port, 80);
        assert_eq!(config.serve.public_port, 8081);
        assert!(!config.serve.cors);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.serve.admin_port, 5000);
        assert_eq!(config.serve.public_port, 8080);
        assert_eq!(config.serve.workers, 4);
        assert_eq!(config.serve.max_body_size, 52_428_800);
        assert!(config.serve.cors);
    }

    #[test]
    fn test_serve_config_same_ports_rejected() {
        let config = test_parse_config("[serve]\nadmin_port = 9000\npublic_port = 9000");
        let mut diag = ConfigDiagnostics::new();
        config.serve.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, "serve.public_port");
    }

    #[test]
    fn test_serve_config_zero_workers_rejected() {
        let config = test_parse_config("[serve]\nworkers = 0");
        let mut diag = ConfigDiagnostics::new();
        config.serve.validate(&mut diag);
        assert_eq!(diag.errors()[0].field, "serve.workers");
    }
}
