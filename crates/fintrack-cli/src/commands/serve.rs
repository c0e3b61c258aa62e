//! Server command implementation

use std::path::Path;

use anyhow::Result;
use fintrack_core::Config;
use fintrack_server::{LauncherConfig, ServerConfig};

use super::open_db;

/// Browser launcher settings for a server at `host:port`, or None when
/// opening a browser is disabled
pub fn launcher_for(config: &Config, host: &str, port: u16, no_open: bool) -> Option<LauncherConfig> {
    if no_open || !config.launcher.open_browser {
        return None;
    }
    // A wildcard bind address is reachable on loopback
    let browse_host = match host {
        "0.0.0.0" | "::" | "[::]" => "127.0.0.1",
        other => other,
    };
    Some(LauncherConfig {
        url: format!("http://{}:{}", browse_host, port),
        delay: config.launcher.delay,
        app_mode: config.launcher.app_mode,
    })
}

pub async fn cmd_serve(
    db_path: &Path,
    config: &Config,
    host: Option<&str>,
    port: Option<u16>,
    static_dir: Option<&Path>,
    no_open: bool,
) -> Result<()> {
    let host = host.unwrap_or(&config.server.host);
    let port = port.unwrap_or(config.server.port);

    let db = open_db(db_path)?;

    println!("🚀 Starting FinTrack web server...");
    println!("   Database: {}", db.path());
    if db.is_encrypted() {
        println!("   🔒 Encryption: ENABLED");
    }
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let launcher = launcher_for(config, host, port, no_open);
    if let Some(launcher) = &launcher {
        println!("   Opening {} in a browser...", launcher.url);
    }

    let server_config = ServerConfig {
        currency: config.currency.clone(),
        ..Default::default()
    };

    let static_dir = static_dir.and_then(|d| d.to_str());
    fintrack_server::serve_with_config(db, host, port, static_dir, server_config, launcher).await
}
