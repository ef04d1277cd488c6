// ── Backend HTTP client ──
//
// One fixed endpoint, one GET, no auth. The response is a JSON object
// with at least `ip` and `countryCode`; unknown fields are ignored and
// missing fields take defaults, matching what the backend actually
// serves.

use serde::Deserialize;
use url::Url;

use crate::config::MonitorConfig;
use crate::error::CoreError;

/// Response body of the backend lookup.
#[derive(Debug, Deserialize)]
pub(crate) struct BackendReport {
    #[serde(default = "unknown_ip")]
    pub ip: String,
    #[serde(default, rename = "countryCode")]
    pub country_code: String,
}

fn unknown_ip() -> String {
    "Unknown".to_owned()
}

/// Thin wrapper around `reqwest::Client` with the configured timeout.
pub(crate) struct BackendClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl BackendClient {
    pub(crate) fn new(config: &MonitorConfig) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("netglance/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CoreError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            endpoint: config.backend_url.clone(),
        })
    }

    /// Issue the lookup. Timeout, transport, HTTP, and decode failures
    /// all map to [`CoreError`] variants; none are fatal to the caller.
    pub(crate) async fn fetch(&self) -> Result<BackendReport, CoreError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;

        let report = response.json::<BackendReport>().await?;
        Ok(report)
    }
}
