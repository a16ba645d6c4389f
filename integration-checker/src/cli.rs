//! CLI module for integration-checker
//!
//! Command-line flags override the environment-derived configuration.

use crate::config::CheckerConfig;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Integration checker - smoke-tests the monitoring dashboard and its webhook integrations
#[derive(Parser, Debug, Default)]
#[command(name = "integration-checker")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    PORT                    Dashboard port (default: 3001)
    DASHBOARD_URL           Dashboard base URL, overrides PORT (legacy: MONITOR_URL)
    CURSOR_LISTENER_URL     Editor event listener URL (default: http://localhost:8347)
    ENABLE_NGROK            Expect an ngrok tunnel for Replit webhooks (true/false)
    CURSOR_ENABLE_VSCODE    Expect the VSCode extension integration (true/false)
    CHECK_TIMEOUT_SECS      Per-request deadline in seconds (default: 10)
    CHECK_LOG_DIR           Log directory (default: ./logs)
    CHECK_LOG_LEVEL         Log level (default: info)
"#)]
pub struct Cli {
    /// Dashboard port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Dashboard base URL (takes precedence over --port)
    #[arg(long)]
    pub dashboard_url: Option<String>,

    /// Editor event listener base URL
    #[arg(long)]
    pub listener_url: Option<String>,

    /// Treat the ngrok tunnel as enabled
    #[arg(long, default_value_t = false)]
    pub enable_ngrok: bool,

    /// Treat the VSCode extension integration as enabled
    #[arg(long, default_value_t = false)]
    pub enable_vscode: bool,

    /// Per-request deadline in seconds
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// Log directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Layer the flags that were given on top of `config`.
    pub fn apply(&self, mut config: CheckerConfig) -> CheckerConfig {
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if let Some(url) = &self.dashboard_url {
            config = config.with_dashboard_url(url);
        }
        if let Some(url) = &self.listener_url {
            config = config.with_listener_url(url);
        }
        if self.enable_ngrok {
            config.ngrok_enabled = true;
        }
        if self.enable_vscode {
            config.vscode_enabled = true;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_config() {
        let cli = Cli::try_parse_from(["integration-checker"]).unwrap();
        let config = CheckerConfig::default();
        assert_eq!(cli.apply(config.clone()), config);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from([
            "integration-checker",
            "--port",
            "4100",
            "--listener-url",
            "http://127.0.0.1:9000/",
            "--enable-ngrok",
            "--timeout-secs",
            "2",
            "--log-dir",
            "/tmp/checker-logs",
        ])
        .unwrap();
        let config = cli.apply(CheckerConfig::default());
        assert_eq!(config.dashboard_url, "http://localhost:4100");
        assert_eq!(config.listener_url, "http://127.0.0.1:9000");
        assert!(config.ngrok_enabled);
        assert!(!config.vscode_enabled);
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/checker-logs"));
    }

    #[test]
    fn test_dashboard_url_wins_over_port() {
        let cli = Cli::try_parse_from([
            "integration-checker",
            "--port",
            "4100",
            "--dashboard-url",
            "http://dash:8080",
        ])
        .unwrap();
        let config = cli.apply(CheckerConfig::default());
        assert_eq!(config.dashboard_url, "http://dash:8080");
    }

    #[test]
    fn test_switch_flags_do_not_disable_env_switches() {
        let cli = Cli::try_parse_from(["integration-checker"]).unwrap();
        let config = CheckerConfig {
            ngrok_enabled: true,
            vscode_enabled: true,
            ..CheckerConfig::default()
        };
        let applied = cli.apply(config);
        assert!(applied.ngrok_enabled);
        assert!(applied.vscode_enabled);
    }
}
