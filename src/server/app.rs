//! Server lifecycle handle
//!
//! The HTTP listener runs on its own OS thread with a private tokio runtime,
//! so the caller (conventionally the main thread, which the tray event loop
//! owns) is never blocked by serving. Shutdown is message passing: `stop()`
//! fires a oneshot that completes warp's graceful-shutdown future, then joins
//! the thread so the port is verifiably released before `stop()` returns.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::thread;

use tokio::sync::oneshot;
use warp::Filter;

use super::ServerConfig;
use crate::errors::{Result, TrayServeError};

/// Handle for a running HTTP listener.
///
/// At most one exists per process; it is created once at startup and consumed
/// by `stop()` (or by `Drop` on process teardown).
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ServerHandle {
    /// Bind the listener and start serving on a background thread.
    ///
    /// Returns only after the bind outcome is known: on success the actual
    /// bound address is recorded (relevant for port 0 binds), on failure the
    /// error comes back as `TrayServeError::Bind`. Bind failures are fatal by
    /// design - no retry, the caller reports and exits.
    pub fn start(config: ServerConfig) -> Result<Self> {
        let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port)
            .parse()
            .map_err(|e| {
                TrayServeError::Bind(format!(
                    "invalid bind address {}:{}: {}",
                    config.bind_address, config.port, e
                ))
            })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<SocketAddr>>();
        let root = config.root.clone();

        let thread = thread::Builder::new()
            .name("trayserve-http".to_string())
            .spawn(move || {
                let runtime = match tokio::runtime::Runtime::new() {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(TrayServeError::Bind(format!(
                            "failed to start server runtime: {}",
                            e
                        ))));
                        return;
                    }
                };

                runtime.block_on(async move {
                    let routes = super::routes::create_routes(root)
                        .with(super::middleware::logging::with_request_logging());

                    match warp::serve(routes).try_bind_with_graceful_shutdown(addr, async move {
                        let _ = shutdown_rx.await;
                    }) {
                        Ok((bound_addr, server)) => {
                            let _ = ready_tx.send(Ok(bound_addr));
                            server.await;
                        }
                        Err(e) => {
                            let _ = ready_tx
                                .send(Err(TrayServeError::Bind(format!("{}: {}", addr, e))));
                        }
                    }
                });
            })?;

        let local_addr = ready_rx.recv().map_err(|_| {
            TrayServeError::Bind("server thread exited before reporting bind status".to_string())
        })??;

        log::info!("Server listening on http://{}", local_addr);
        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    /// The address the listener actually bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// The port the listener actually bound to
    pub fn port(&self) -> u16 {
        self.local_addr.port()
    }

    /// Stop accepting connections and release the port.
    ///
    /// In-flight connections drain through warp's graceful shutdown; the
    /// server thread is joined, so once this returns a new connection attempt
    /// to the port is refused. Calling again on a stopped handle is a no-op.
    pub fn stop(&mut self) {
        let Some(shutdown_tx) = self.shutdown_tx.take() else {
            log::debug!("stop() called on an already stopped server");
            return;
        };

        // The receiver only disappears if the serve task is already gone,
        // which is the outcome we want anyway.
        let _ = shutdown_tx.send(());

        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::warn!("Server thread panicked during shutdown");
            }
        }
        log::info!("Server on {} stopped", self.local_addr);
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
