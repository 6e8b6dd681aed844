//! Custom error types for trayserve

use std::fmt;

/// Main error type for trayserve operations
#[derive(Debug)]
pub enum TrayServeError {
    /// The listener could not be bound (port in use, permission denied,
    /// unparseable bind address). Fatal - nothing else can resolve it.
    Bind(String),
    /// Tray icon or menu construction errors
    Tray(String),
    /// General I/O errors
    Io(std::io::Error),
}

impl fmt::Display for TrayServeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrayServeError::Bind(msg) => write!(f, "Bind error: {}", msg),
            TrayServeError::Tray(msg) => write!(f, "Tray error: {}", msg),
            TrayServeError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for TrayServeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrayServeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrayServeError {
    fn from(err: std::io::Error) -> Self {
        TrayServeError::Io(err)
    }
}

/// Result type alias for trayserve operations
pub type Result<T> = std::result::Result<T, TrayServeError>;
