use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use trayserve::net;
use trayserve::server::{ServerConfig, ServerHandle};
use trayserve::tray::{self, TrayApp};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "trayserve")]
#[command(about = "🗂️ Share a directory over HTTP, controlled from the system tray")]
struct Cli {
    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Directory to serve (defaults to the directory containing the executable)
    #[arg(short, long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Do not open the browser on startup
    #[arg(long)]
    no_browser: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log_panics::init();

    let cli = Cli::parse();

    // Serve relative to a deterministic root no matter where we were invoked
    let root = match cli.root {
        Some(dir) => dir,
        None => default_root()?,
    };
    std::env::set_current_dir(&root)
        .with_context(|| format!("failed to change into serving root {}", root.display()))?;

    let config = ServerConfig {
        bind_address: cli.bind,
        port: cli.port,
        root: PathBuf::from("."),
    };

    // A bind failure is fatal: report it and exit non-zero, nothing to retry
    let server = ServerHandle::start(config).context("failed to start HTTP server")?;
    let port = server.port();
    let local_ip = net::local_ipv4();

    println!("🗂️ {} v{} serving {}", trayserve::APP_NAME, trayserve::VERSION, root.display());
    println!("💻 PC:     http://localhost:{}", port);
    println!("📱 Mobile: http://{}:{}", local_ip, port);

    if !cli.no_browser {
        tray::open_browser(port);
    }

    // The tray loop owns the rest of the process's life; the Stop Server
    // action shuts the listener down and exits with code 0.
    TrayApp::new(server, local_ip)
        .context("failed to set up tray")?
        .run()
}

/// Default serving root: the directory containing the executable
fn default_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the current executable")?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
