//! Opens the dashboard in a browser shortly after the server starts
//!
//! The launcher is fire-and-forget: one spawned task sleeps for the
//! configured delay, then tries an app-mode window in Edge, then Chrome,
//! then the platform's default opener. Failures are logged and ignored.

use std::time::Duration;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How long a launched command has to report failure
const EXIT_GRACE: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq)]
pub struct LauncherConfig {
    /// Page to open
    pub url: String,
    /// Wait before launching so the listener is ready
    pub delay: Duration,
    /// Prefer a chromeless `--app=` window over a regular tab
    pub app_mode: bool,
}

/// One way of opening the URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl BrowserCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Candidate commands for this platform, in the order they are tried
pub fn browser_commands(url: &str, app_mode: bool) -> Vec<BrowserCommand> {
    let mut commands = Vec::new();

    if app_mode {
        let app_arg = format!("--app={}", url);
        if cfg!(target_os = "windows") {
            commands.push(BrowserCommand::new("cmd", &["/C", "start", "msedge", &app_arg]));
            commands.push(BrowserCommand::new("cmd", &["/C", "start", "chrome", &app_arg]));
        } else if cfg!(target_os = "macos") {
            commands.push(BrowserCommand::new(
                "open",
                &["-na", "Microsoft Edge", "--args", &app_arg],
            ));
            commands.push(BrowserCommand::new(
                "open",
                &["-na", "Google Chrome", "--args", &app_arg],
            ));
        } else {
            commands.push(BrowserCommand::new("microsoft-edge", &[&app_arg]));
            commands.push(BrowserCommand::new("google-chrome", &[&app_arg]));
        }
    }

    // Default opener
    if cfg!(target_os = "windows") {
        commands.push(BrowserCommand::new("cmd", &["/C", "start", "", url]));
    } else if cfg!(target_os = "macos") {
        commands.push(BrowserCommand::new("open", &[url]));
    } else {
        commands.push(BrowserCommand::new("xdg-open", &[url]));
    }

    commands
}

/// Spawn the launcher task. The handle may be dropped; nothing awaits it.
pub fn spawn_browser_launcher(config: LauncherConfig) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(config.delay).await;

        for cmd in browser_commands(&config.url, config.app_mode) {
            match Command::new(&cmd.program).args(&cmd.args).spawn() {
                // A browser may keep running in the foreground; only a quick
                // non-zero exit counts as failure
                Ok(mut child) => match tokio::time::timeout(EXIT_GRACE, child.wait()).await {
                    Ok(Ok(status)) if !status.success() => {
                        debug!("{} exited with {}", cmd.program, status)
                    }
                    Ok(Err(e)) => debug!("{} failed: {}", cmd.program, e),
                    _ => {
                        info!("Opened {} with {}", config.url, cmd.program);
                        return;
                    }
                },
                Err(e) => debug!("Could not start {}: {}", cmd.program, e),
            }
        }

        warn!("Could not open a browser; visit {} manually", config.url);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://127.0.0.1:8501";

    #[test]
    fn test_app_mode_tries_edge_then_chrome_then_default() {
        let commands = browser_commands(URL, true);
        assert_eq!(commands.len(), 3);

        let joined: Vec<String> = commands
            .iter()
            .map(|c| format!("{} {}", c.program, c.args.join(" ")))
            .collect();
        assert!(joined[0].to_lowercase().contains("edge"));
        assert!(joined[0].contains("--app=http://127.0.0.1:8501"));
        assert!(joined[1].to_lowercase().contains("chrome"));
        assert!(joined[1].contains("--app=http://127.0.0.1:8501"));
        assert!(!joined[2].contains("--app="));
        assert!(joined[2].ends_with(URL));
    }

    #[test]
    fn test_without_app_mode_only_default_opener() {
        let commands = browser_commands(URL, false);
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].args.last().map(String::as_str), Some(URL));
    }
}
