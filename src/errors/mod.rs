//! Error types for trayserve

pub mod types;

pub use types::*;
