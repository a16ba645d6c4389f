//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Errors produced while talking to the dashboard or a listener
#[derive(Debug, Error)]
pub enum CheckError {
    /// Connection could not be established or was dropped
    #[error("Connection to {url} failed: {message}")]
    Connect { url: String, message: String },

    /// Request exceeded the configured deadline
    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// Non-2xx HTTP status
    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// Response body was not the JSON we expected
    #[error("Invalid response body from {url}: {message}")]
    Decode { url: String, message: String },

    /// `/status` body had no `components` mapping
    #[error("Status response from {url} has no components")]
    MissingComponents { url: String },

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Report could not be written
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Liveness check failed; the run cannot continue
    #[error("Dashboard not running at {url} ({reason})")]
    DashboardDown { url: String, reason: String },
}

impl CheckError {
    /// Classify a transport-level reqwest error for `url`.
    pub fn from_reqwest(url: &str, timeout: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                timeout,
            }
        } else if let Some(status) = err.status() {
            Self::Status {
                url: url.to_string(),
                status,
            }
        } else {
            Self::Connect {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Short label used in summary details and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Timeout { .. } => "timeout",
            Self::Status { .. } => "status",
            Self::Decode { .. } => "decode",
            Self::MissingComponents { .. } => "missing_components",
            Self::Client(_) => "client",
            Self::Output(_) => "output",
            Self::DashboardDown { .. } => "dashboard_down",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_down_mentions_url() {
        let err = CheckError::DashboardDown {
            url: "http://localhost:3001".to_string(),
            reason: "connection refused".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("http://localhost:3001"));
        assert!(message.starts_with("Dashboard not running at"));
    }

    #[test]
    fn test_status_display() {
        let err = CheckError::Status {
            url: "http://localhost:3001/status".to_string(),
            status: StatusCode::SERVICE_UNAVAILABLE,
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:3001/status responded with HTTP 503 Service Unavailable"
        );
        assert_eq!(err.kind(), "status");
    }
}
