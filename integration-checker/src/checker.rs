//! Integration checker pipeline
//!
//! Runs the liveness check, then one relay test per [`Integration`], strictly
//! in order, and hands the collected [`CheckResult`]s to the summary renderer.
//! Only the liveness check is fatal.

use crate::client::DashboardClient;
use crate::config::CheckerConfig;
use crate::error::CheckError;
use crate::integrations::Integration;
use crate::report::Console;
use std::io::Write;
use tracing::{error, info, warn};

/// Printed after a fatal error
pub const REMEDIATION_HINT: &str = "Make sure the dashboard is running with: npm run start:all";

/// Outcome of one relay test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub integration: Integration,
    pub ok: bool,
    /// Event descriptor on success, error text on failure
    pub detail: String,
}

impl CheckResult {
    pub fn passed(integration: Integration, detail: impl Into<String>) -> Self {
        Self {
            integration,
            ok: true,
            detail: detail.into(),
        }
    }

    pub fn failed(integration: Integration, detail: impl Into<String>) -> Self {
        Self {
            integration,
            ok: false,
            detail: detail.into(),
        }
    }
}

/// Results of a completed run, in check order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub dashboard_url: String,
    pub results: Vec<CheckResult>,
}

impl RunSummary {
    /// Whether `integration`'s relay test succeeded
    pub fn is_connected(&self, integration: Integration) -> bool {
        self.results
            .iter()
            .any(|result| result.integration == integration && result.ok)
    }

    /// Number of failed relay tests
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|result| !result.ok).count()
    }
}

/// Sequential integration checker
pub struct IntegrationChecker {
    config: CheckerConfig,
    client: DashboardClient,
}

impl IntegrationChecker {
    pub fn new(config: CheckerConfig) -> Result<Self, CheckError> {
        let client = DashboardClient::new(config.timeout)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Print the banner, run every check and print the report.
    ///
    /// Returns [`CheckError::DashboardDown`] without running anything else if
    /// the liveness check fails. Relay failures never make this return `Err`.
    pub async fn run<W: Write>(&self, console: &mut Console<W>) -> Result<RunSummary, CheckError> {
        console.banner()?;
        self.run_checks(console).await
    }

    /// [`Self::run`] without the banner, for callers that print it themselves.
    pub async fn run_checks<W: Write>(
        &self,
        console: &mut Console<W>,
    ) -> Result<RunSummary, CheckError> {
        self.check_dashboard(console).await?;

        let mut results = Vec::with_capacity(Integration::ALL.len());
        for integration in Integration::ALL {
            console.section(integration.heading())?;
            self.report_feature_switch(integration, console).await?;
            results.push(self.relay_test(integration, console).await?);
        }

        let summary = RunSummary {
            dashboard_url: self.config.dashboard_url.clone(),
            results,
        };
        info!(
            failures = summary.failure_count(),
            "Integration checks completed"
        );
        console.summary(&summary)?;
        Ok(summary)
    }

    async fn check_dashboard<W: Write>(&self, console: &mut Console<W>) -> Result<(), CheckError> {
        console.section("Testing dashboard connectivity...")?;

        let status_url = self.config.status_url();
        match self.client.fetch_status(&status_url).await {
            Ok(report) => {
                let names = report.component_names();
                info!(components = ?names, "Dashboard is running");
                console.success("Dashboard is running")?;
                console.detail(&format!("Components detected: {}", names.join(", ")))?;
                Ok(())
            }
            Err(e) => {
                error!(url = %status_url, kind = e.kind(), error = %e, "Dashboard liveness check failed");
                Err(CheckError::DashboardDown {
                    url: self.config.dashboard_url.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Print the optional-feature notice that precedes a relay test.
    ///
    /// Never affects whether the relay test runs.
    async fn report_feature_switch<W: Write>(
        &self,
        integration: Integration,
        console: &mut Console<W>,
    ) -> Result<(), CheckError> {
        match integration {
            Integration::GitHubActions => {}
            Integration::Replit => {
                if self.config.ngrok_enabled {
                    console.detail("ngrok is enabled - checking for webhook URL")?;
                    self.discover_webhook_url(console).await?;
                } else {
                    console.warning("ngrok is not enabled in .env file (ENABLE_NGROK=true)")?;
                }
            }
            Integration::Cursor => {
                if self.config.vscode_enabled {
                    console.detail("VSCode extension integration is enabled")?;
                } else {
                    console.warning(
                        "VSCode extension integration is not enabled in .env file (CURSOR_ENABLE_VSCODE=true)",
                    )?;
                }
            }
        }
        Ok(())
    }

    /// Re-fetch `/status` and print the tunnel's public webhook URL. Advisory only.
    async fn discover_webhook_url<W: Write>(
        &self,
        console: &mut Console<W>,
    ) -> Result<(), CheckError> {
        let status_url = self.config.status_url();
        let webhook_url = match self.client.fetch_status(&status_url).await {
            Ok(report) => report.webhook_url().map(str::to_string),
            Err(e) => {
                warn!(url = %status_url, error = %e, "Could not re-fetch dashboard status");
                None
            }
        };

        match webhook_url {
            Some(url) => console.detail(&format!("Found webhook URL: {}", url))?,
            None => console
                .warning("No ngrok webhook URL found yet - ngrok might still be starting")?,
        }
        Ok(())
    }

    async fn relay_test<W: Write>(
        &self,
        integration: Integration,
        console: &mut Console<W>,
    ) -> Result<CheckResult, CheckError> {
        let url = integration.test_url(&self.config);
        match self.client.post_relay_test(&url).await {
            Ok(response) => {
                let description = integration.describe_event(&response);
                info!(integration = %integration, event = %description, "Relay test succeeded");
                console.success(&format!("{} integration test successful", integration))?;
                console.detail(&description)?;
                Ok(CheckResult::passed(integration, description))
            }
            Err(e) => {
                warn!(
                    integration = %integration,
                    url = %url,
                    kind = e.kind(),
                    error = %e,
                    "Relay test failed"
                );
                console.failure(&format!("{} integration test failed", integration))?;
                console.detail(&e.to_string())?;
                Ok(CheckResult::failed(integration, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_connected() {
        let summary = RunSummary {
            dashboard_url: "http://localhost:3001".to_string(),
            results: vec![
                CheckResult::passed(Integration::GitHubActions, "ok"),
                CheckResult::failed(Integration::Replit, "HTTP 502"),
                CheckResult::passed(Integration::Cursor, "ok"),
            ],
        };
        assert!(summary.is_connected(Integration::GitHubActions));
        assert!(!summary.is_connected(Integration::Replit));
        assert!(summary.is_connected(Integration::Cursor));
        assert_eq!(summary.failure_count(), 1);
    }

    #[test]
    fn test_checker_keeps_config() {
        let config = CheckerConfig::default().with_port(4321);
        let checker = IntegrationChecker::new(config.clone()).unwrap();
        assert_eq!(checker.config(), &config);
    }
}
