//! HTTP middleware for the trayserve server

pub mod logging;
