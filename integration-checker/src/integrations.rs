//! Relay-tested integrations
//!
//! Each integration exposes a `POST .../test` endpoint that simulates an
//! inbound webhook and echoes back how the receiving service parsed it.

use crate::config::CheckerConfig;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Integrations checked by a relay test, in run order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Integration {
    /// GitHub Actions (source-control events)
    GitHubActions,
    /// Replit via ngrok (workspace events)
    Replit,
    /// Cursor via the VSCode extension (editor events)
    Cursor,
}

impl Integration {
    /// All integrations in the order they are tested and summarized.
    pub const ALL: [Integration; 3] = [Self::GitHubActions, Self::Replit, Self::Cursor];

    /// Name used in progress lines
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::GitHubActions => "GitHub Actions",
            Self::Replit => "Replit",
            Self::Cursor => "Cursor/VSCode",
        }
    }

    /// Label used in the summary section
    pub fn summary_label(&self) -> &'static str {
        match self {
            Self::GitHubActions => "GitHub Actions",
            Self::Replit => "Replit (ngrok)",
            Self::Cursor => "Cursor (VSCode)",
        }
    }

    /// Section heading printed before the test
    pub fn heading(&self) -> &'static str {
        match self {
            Self::GitHubActions => "Testing GitHub Actions integration...",
            Self::Replit => "Testing Replit integration (ngrok)...",
            Self::Cursor => "Testing Cursor integration (VSCode extension)...",
        }
    }

    /// Test endpoint path
    pub fn test_path(&self) -> &'static str {
        match self {
            Self::GitHubActions => "/api/github-events/test",
            Self::Replit => "/api/replit-events/test",
            Self::Cursor => "/api/vscode-events/test",
        }
    }

    /// Full test URL; Cursor events go to the listener, the rest to the dashboard.
    pub fn test_url(&self, config: &CheckerConfig) -> String {
        let base = match self {
            Self::Cursor => &config.listener_url,
            Self::GitHubActions | Self::Replit => &config.dashboard_url,
        };
        format!("{}{}", base, self.test_path())
    }

    /// Render the event descriptor echoed back by the test endpoint.
    ///
    /// Fields that are absent, empty, or not strings fall back to placeholders.
    pub fn describe_event(&self, response: &RelayResponse) -> String {
        let kind = response.event_text(&["event"]);
        match self {
            Self::GitHubActions => format!(
                "Event: {} - {}",
                kind.unwrap_or("workflow_run"),
                response.event_text(&["action"]).unwrap_or("completed")
            ),
            Self::Replit => format!(
                "Event: {} on workspace {}",
                kind.unwrap_or("deploy"),
                response
                    .event_text(&["workspace", "name"])
                    .unwrap_or("test")
            ),
            Self::Cursor => format!(
                "Event: {} on file {}",
                kind.unwrap_or("test"),
                response.event_text(&["file"]).unwrap_or("test-file.js")
            ),
        }
    }
}

impl fmt::Display for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Body returned by a relay test endpoint
///
/// Any well-formed JSON is accepted; the parsed event is read from
/// `event.*` when present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct RelayResponse {
    body: Value,
}

impl RelayResponse {
    /// Non-empty string at `event.<path>`, if there is one
    pub fn event_text(&self, path: &[&str]) -> Option<&str> {
        path.iter()
            .try_fold(self.body.get("event")?, |value, key| value.get(*key))?
            .as_str()
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> RelayResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_urls_use_dashboard_or_listener() {
        let config = CheckerConfig::default()
            .with_dashboard_url("http://dash:1")
            .with_listener_url("http://listen:2");
        assert_eq!(
            Integration::GitHubActions.test_url(&config),
            "http://dash:1/api/github-events/test"
        );
        assert_eq!(
            Integration::Replit.test_url(&config),
            "http://dash:1/api/replit-events/test"
        );
        assert_eq!(
            Integration::Cursor.test_url(&config),
            "http://listen:2/api/vscode-events/test"
        );
    }

    #[test]
    fn test_describe_event_uses_reported_fields() {
        let github = parse(r#"{"event":{"event":"push","action":"created"}}"#);
        assert_eq!(
            Integration::GitHubActions.describe_event(&github),
            "Event: push - created"
        );

        let replit = parse(r#"{"event":{"event":"build","workspace":{"name":"api-server"}}}"#);
        assert_eq!(
            Integration::Replit.describe_event(&replit),
            "Event: build on workspace api-server"
        );

        let cursor = parse(r#"{"event":{"event":"save","file":"main.rs","extra":1}}"#);
        assert_eq!(
            Integration::Cursor.describe_event(&cursor),
            "Event: save on file main.rs"
        );
    }

    #[test]
    fn test_describe_event_falls_back_to_placeholders() {
        let empty = RelayResponse::default();
        assert_eq!(
            Integration::GitHubActions.describe_event(&empty),
            "Event: workflow_run - completed"
        );
        assert_eq!(
            Integration::Replit.describe_event(&empty),
            "Event: deploy on workspace test"
        );
        assert_eq!(
            Integration::Cursor.describe_event(&empty),
            "Event: test on file test-file.js"
        );

        let partial = parse(r#"{"event":{"event":"","workspace":{}}}"#);
        assert_eq!(
            Integration::Replit.describe_event(&partial),
            "Event: deploy on workspace test"
        );
    }

    #[test]
    fn test_unexpected_shapes_fall_back_to_placeholders() {
        let numeric_action = parse(r#"{"event":{"event":"push","action":7}}"#);
        assert_eq!(
            Integration::GitHubActions.describe_event(&numeric_action),
            "Event: push - completed"
        );

        let string_event = parse(r#"{"event":"deploy"}"#);
        assert_eq!(
            Integration::Replit.describe_event(&string_event),
            "Event: deploy on workspace test"
        );

        let array_body = parse("[1,2]");
        assert_eq!(
            Integration::Cursor.describe_event(&array_body),
            "Event: test on file test-file.js"
        );

        let workspace_string = parse(r#"{"event":{"workspace":"monitor"}}"#);
        assert_eq!(
            Integration::Replit.describe_event(&workspace_string),
            "Event: deploy on workspace test"
        );
    }

    #[test]
    fn test_null_event_is_accepted() {
        let response = parse(r#"{"event":null,"ok":true}"#);
        assert_eq!(response.event_text(&["event"]), None);
    }
}
