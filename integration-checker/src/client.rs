//! Dashboard / listener HTTP client
//!
//! Every request carries the configured deadline, and every body decode
//! returns a [`CheckError`] instead of panicking.

use crate::error::CheckError;
use crate::integrations::RelayResponse;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

/// Component that reports the public tunnel URL
const TUNNEL_COMPONENT: &str = "replit";

/// Field holding the public tunnel URL
const WEBHOOK_URL_FIELD: &str = "webhookUrl";

/// Decoded `GET /status` body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusReport {
    /// Component name → component details, in the order the dashboard sent them
    #[serde(default)]
    components: Option<Map<String, Value>>,
}

impl StatusReport {
    /// Component names as reported by the dashboard
    pub fn component_names(&self) -> Vec<&str> {
        self.components
            .iter()
            .flat_map(|components| components.keys().map(String::as_str))
            .collect()
    }

    /// Public webhook URL published by the tunnel component, if any
    pub fn webhook_url(&self) -> Option<&str> {
        self.components
            .as_ref()?
            .get(TUNNEL_COMPONENT)?
            .get(WEBHOOK_URL_FIELD)?
            .as_str()
            .filter(|url| !url.is_empty())
    }
}

/// HTTP client shared by every check in a run
#[derive(Debug, Clone)]
pub struct DashboardClient {
    client: Client,
    timeout: Duration,
}

impl DashboardClient {
    /// Build a client whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, CheckError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CheckError::Client(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    /// `GET <url>` and decode a status report that must contain `components`.
    pub async fn fetch_status(&self, url: &str) -> Result<StatusReport, CheckError> {
        let response = self.send(self.client.get(url), url).await?;
        let report: StatusReport = self.decode(response, url).await?;
        if report.components.is_none() {
            return Err(CheckError::MissingComponents {
                url: url.to_string(),
            });
        }
        Ok(report)
    }

    /// `POST <url>` to a relay test endpoint.
    ///
    /// An empty 2xx body is treated as `{}`.
    pub async fn post_relay_test(&self, url: &str) -> Result<RelayResponse, CheckError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        let response = self.send(request, url).await?;
        let body = self.read_body(response, url).await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RelayResponse::default());
        }
        parse_json(&body, url)
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, CheckError> {
        let response = request
            .send()
            .await
            .map_err(|e| CheckError::from_reqwest(url, self.timeout, e))?;

        let status = response.status();
        debug!(url = %url, status = %status, "Received response");
        if !status.is_success() {
            return Err(CheckError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn read_body(&self, response: Response, url: &str) -> Result<Vec<u8>, CheckError> {
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| CheckError::from_reqwest(url, self.timeout, e))
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        response: Response,
        url: &str,
    ) -> Result<T, CheckError> {
        let body = self.read_body(response, url).await?;
        parse_json(&body, url)
    }
}

fn parse_json<T: DeserializeOwned>(body: &[u8], url: &str) -> Result<T, CheckError> {
    serde_json::from_slice(body).map_err(|e| CheckError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
