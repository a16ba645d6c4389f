//! Configuration management via environment variables
//!
//! All recognized options are resolved once at startup into [`CheckerConfig`].
//! Helper functions read environment variables with fallback to deprecated
//! variable names, logging a warning when the old name is used.

use std::path::PathBuf;
use std::time::Duration;

/// Default dashboard port
pub const DEFAULT_DASHBOARD_PORT: u16 = 3001;

/// Default editor-event listener base URL
pub const DEFAULT_LISTENER_URL: &str = "http://localhost:8347";

/// Default per-request deadline (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default log directory
pub const DEFAULT_LOG_DIR: &str = "./logs";

/// Get an environment variable with fallback to a deprecated name
///
/// If the new variable name is set, returns its value.
/// If only the old (deprecated) variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use integration_checker::config::get_env_with_fallback;
///
/// let url = get_env_with_fallback("DASHBOARD_URL", "MONITOR_URL");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `true/1/yes/on` (case-insensitive) を真とみなす
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Read a boolean switch; unset means off.
pub fn get_env_flag(name: &str) -> bool {
    get_env_with_fallback(name, name)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

/// Log directory from `CHECK_LOG_DIR`, or the default.
fn log_dir_from_env() -> PathBuf {
    PathBuf::from(get_env_with_fallback_or(
        "CHECK_LOG_DIR",
        "CHECK_LOG_DIR",
        DEFAULT_LOG_DIR,
    ))
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Options for one checker run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerConfig {
    /// Dashboard base URL (no trailing slash)
    pub dashboard_url: String,
    /// Editor-event listener base URL (no trailing slash)
    pub listener_url: String,
    /// Tunnel (ngrok) switch
    pub ngrok_enabled: bool,
    /// Editor extension (VSCode) switch
    pub vscode_enabled: bool,
    /// Deadline applied to every outbound request
    pub timeout: Duration,
    /// Directory the log file is written to
    pub log_dir: PathBuf,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            dashboard_url: format!("http://localhost:{}", DEFAULT_DASHBOARD_PORT),
            listener_url: DEFAULT_LISTENER_URL.to_string(),
            ngrok_enabled: false,
            vscode_enabled: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl CheckerConfig {
    /// Load configuration from environment variables.
    ///
    /// `DASHBOARD_URL` (旧: `MONITOR_URL`) takes precedence over `PORT`.
    pub fn from_env() -> Self {
        let port = get_env_with_fallback_parse("PORT", "PORT", DEFAULT_DASHBOARD_PORT);
        let dashboard_url = get_env_with_fallback("DASHBOARD_URL", "MONITOR_URL")
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        let listener_url = normalize_base_url(&get_env_with_fallback_or(
            "CURSOR_LISTENER_URL",
            "CURSOR_LISTENER_URL",
            DEFAULT_LISTENER_URL,
        ));
        let timeout_secs = get_env_with_fallback_parse(
            "CHECK_TIMEOUT_SECS",
            "CHECK_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        );

        Self {
            dashboard_url,
            listener_url,
            ngrok_enabled: get_env_flag("ENABLE_NGROK"),
            vscode_enabled: get_env_flag("CURSOR_ENABLE_VSCODE"),
            timeout: Duration::from_secs(timeout_secs),
            log_dir: log_dir_from_env(),
        }
    }

    /// Point the dashboard at `http://localhost:<port>`.
    pub fn with_port(mut self, port: u16) -> Self {
        self.dashboard_url = format!("http://localhost:{}", port);
        self
    }

    /// Override the dashboard base URL.
    pub fn with_dashboard_url(mut self, url: &str) -> Self {
        self.dashboard_url = normalize_base_url(url);
        self
    }

    /// Override the listener base URL.
    pub fn with_listener_url(mut self, url: &str) -> Self {
        self.listener_url = normalize_base_url(url);
        self
    }

    /// Set the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `/status` endpoint URL
    pub fn status_url(&self) -> String {
        format!("{}/status", self.dashboard_url)
    }
}
