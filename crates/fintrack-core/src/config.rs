//! Application configuration
//!
//! Config is loaded with a layered resolution:
//! 1. An explicit path (`--config`), if given
//! 2. The file named by `FINTRACK_CONFIG`
//! 3. The per-user override (~/.local/share/fintrack/config/fintrack.toml)
//! 4. Embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/fintrack.toml");

/// Environment variable pointing at a config file
pub const CONFIG_ENV: &str = "FINTRACK_CONFIG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub currency: String,
    pub recent_transactions: usize,
    pub server: ServerSettings,
    pub launcher: LauncherSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LauncherSettings {
    pub open_browser: bool,
    pub delay: Duration,
    pub app_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("fintrack.db"),
            currency: "₺".to_string(),
            recent_transactions: 5,
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8501,
            },
            launcher: LauncherSettings {
                open_browser: true,
                delay: Duration::from_millis(2000),
                app_mode: true,
            },
        }
    }
}

impl Config {
    /// Load configuration, preferring `override_path`, then `FINTRACK_CONFIG`,
    /// then the per-user file, then embedded defaults
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
        let candidates = [
            override_path.map(Path::to_path_buf),
            env_path,
            default_config_path(),
        ];

        for path in candidates.into_iter().flatten() {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                return Self::from_file(&path);
            }
            if override_path == Some(path.as_path()) {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
        }

        parse_config(DEFAULT_CONFIG)
    }

    /// Load a specific file layered over the embedded defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        parse_config(&content)
    }
}

/// Default per-user config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("fintrack").join("config").join("fintrack.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    database: Option<RawDatabase>,
    display: Option<RawDisplay>,
    server: Option<RawServer>,
    launcher: Option<RawLauncher>,
}

#[derive(Debug, Deserialize)]
struct RawDatabase {
    path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency: Option<String>,
    recent_transactions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawServer {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct RawLauncher {
    open_browser: Option<bool>,
    delay_ms: Option<u64>,
    app_mode: Option<bool>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = Config::default();

    if let Some(database) = raw.database {
        if let Some(path) = database.path {
            config.database_path = path;
        }
    }

    if let Some(display) = raw.display {
        if let Some(currency) = display.currency {
            config.currency = currency;
        }
        if let Some(n) = display.recent_transactions {
            config.recent_transactions = n;
        }
    }

    if let Some(server) = raw.server {
        if let Some(host) = server.host {
            config.server.host = host;
        }
        if let Some(port) = server.port {
            config.server.port = port;
        }
    }

    if let Some(launcher) = raw.launcher {
        if let Some(open) = launcher.open_browser {
            config.launcher.open_browser = open;
        }
        if let Some(ms) = launcher.delay_ms {
            config.launcher.delay = Duration::from_millis(ms);
        }
        if let Some(app_mode) = launcher.app_mode {
            config.launcher.app_mode = app_mode;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = parse_config(
            r#"
            [display]
            currency = "$"

            [server]
            port = 9000
            "#,
        )
        .unwrap();

        assert_eq!(config.currency, "$");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.recent_transactions, 5);
        assert!(config.launcher.open_browser);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[server\nport = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[launcher]\nopen_browser = false\ndelay_ms = 10").unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert!(!config.launcher.open_browser);
        assert_eq!(config.launcher.delay, Duration::from_millis(10));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Config::load(Some(&missing)),
            Err(Error::Config(_))
        ));
    }
}
