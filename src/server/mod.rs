//! HTTP server module
//!
//! Serves a directory tree over plain HTTP and exposes the lifecycle handle
//! the tray controller drives: start once, stop once, never restart.

pub mod app;
pub mod middleware;
pub mod routes;

pub use app::*;

use std::path::PathBuf;

/// Server configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServerConfig {
    /// Server listening address
    pub bind_address: String,
    /// Server listening port
    pub port: u16,
    /// Directory tree to serve
    pub root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            root: PathBuf::from("."),
        }
    }
}
