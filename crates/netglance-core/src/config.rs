// ── Runtime monitor configuration ──
//
// Describes *how* the monitor observes the network: backend endpoint,
// request timing, and the external probe command. Runtime-only — the
// CLI reads config files and hands in a finished `MonitorConfig`;
// core never touches disk.

use std::time::Duration;

use url::Url;

/// Default backend endpoint returning `{ "ip": ..., "countryCode": ... }`.
pub const DEFAULT_BACKEND_URL: &str = "http://45.130.214.133:8080";

/// Default diagnostic command for WiFi signal readings (macOS).
pub const DEFAULT_PROBE_COMMAND: &[&str] =
    &["/usr/sbin/system_profiler", "SPAirPortDataType", "-detailLevel", "basic"];

/// Configuration for a [`NetMonitor`](crate::NetMonitor) instance.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Backend endpoint for public IP / country lookup.
    pub backend_url: Url,
    /// HTTP timeout for the backend request.
    pub request_timeout: Duration,
    /// Minimum interval between backend requests; calls arriving earlier
    /// are deferred to the earliest valid time.
    pub min_resolve_interval: Duration,
    /// Cadence of WiFi signal sampling while the sampler is running.
    pub sample_interval: Duration,
    /// Polling interval for the sysfs path source.
    pub path_poll_interval: Duration,
    /// Diagnostic command (program + arguments) producing the WiFi
    /// adapter report on stdout.
    pub probe_command: Vec<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL
                .parse()
                .expect("default backend URL is valid"),
            request_timeout: Duration::from_secs(2),
            min_resolve_interval: Duration::from_millis(500),
            sample_interval: Duration::from_secs(1),
            path_poll_interval: Duration::from_secs(1),
            probe_command: DEFAULT_PROBE_COMMAND
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
