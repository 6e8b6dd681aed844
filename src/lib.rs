//! trayserve - Tray-Controlled Static File Server
//!
//! trayserve shares a directory over HTTP on the local network and parks a
//! small icon in the desktop notification area to control it: open the served
//! pages in a browser, read the LAN address off the menu for phones and
//! tablets, and stop the server.

pub mod errors;
pub mod net;
pub mod server;
pub mod tray;

// Re-export commonly used types
pub use errors::*;
pub use server::{ServerConfig, ServerHandle};

/// trayserve version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// trayserve application name
pub const APP_NAME: &str = "trayserve";
