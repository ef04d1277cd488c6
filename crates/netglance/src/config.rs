//! Configuration loading for the CLI.
//!
//! Layered: built-in defaults, then the TOML config file, then
//! `NETGLANCE_*` environment variables, then CLI flags on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use netglance_core::MonitorConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── File config ──────────────────────────────────────────────────────

/// TOML configuration file shape. Every field is optional; unset fields
/// fall back to the core defaults.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    /// Backend endpoint URL.
    pub backend: Option<String>,

    /// Backend request timeout (seconds).
    pub timeout_secs: Option<u64>,

    /// Minimum interval between backend requests (milliseconds).
    pub resolve_interval_ms: Option<u64>,

    /// Path source polling interval (milliseconds).
    pub path_poll_ms: Option<u64>,

    #[serde(default)]
    pub wifi: WifiSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WifiSection {
    /// Diagnostic command producing the adapter report (program + args).
    pub command: Option<Vec<String>>,

    /// Sampling cadence (milliseconds).
    pub interval_ms: Option<u64>,
}

/// Default config file location (`~/.config/netglance/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "netglance")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("netglance.toml"))
}

/// Load the layered file + env configuration.
pub fn load(path_override: Option<&Path>) -> Result<FileConfig, CliError> {
    let path = path_override.map_or_else(config_path, Path::to_path_buf);

    let config = Figment::from(Serialized::defaults(FileConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETGLANCE_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Resolution into MonitorConfig ────────────────────────────────────

/// Build a [`MonitorConfig`] from the config file and CLI overrides.
pub fn build_monitor_config(
    global: &GlobalOpts,
    file: &FileConfig,
) -> Result<MonitorConfig, CliError> {
    let mut config = MonitorConfig::default();

    if let Some(url) = global.backend.as_deref().or(file.backend.as_deref()) {
        config.backend_url = url.parse().map_err(|_| CliError::Validation {
            field: "backend".into(),
            reason: format!("invalid URL: {url}"),
        })?;
    }

    if let Some(secs) = global.timeout.or(file.timeout_secs) {
        if secs == 0 {
            return Err(CliError::Validation {
                field: "timeout".into(),
                reason: "timeout must be at least 1 second".into(),
            });
        }
        config.request_timeout = Duration::from_secs(secs);
    }

    if let Some(ms) = file.resolve_interval_ms {
        config.min_resolve_interval = Duration::from_millis(ms);
    }

    if let Some(ms) = file.path_poll_ms {
        config.path_poll_interval = Duration::from_millis(ms);
    }

    if let Some(ms) = file.wifi.interval_ms {
        config.sample_interval = Duration::from_millis(ms);
    }

    if let Some(command) = &file.wifi.command {
        if command.is_empty() {
            return Err(CliError::Validation {
                field: "wifi.command".into(),
                reason: "must name a program".into(),
            });
        }
        config.probe_command.clone_from(command);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use netglance_core::DEFAULT_BACKEND_URL;

    use super::*;
    use crate::cli::Cli;

    fn global_from(args: &[&str]) -> GlobalOpts {
        Cli::try_parse_from(args).expect("valid args").global
    }

    #[test]
    fn defaults_match_core() {
        let global = global_from(&["netglance", "status"]);
        let config = build_monitor_config(&global, &FileConfig::default()).expect("config");

        assert_eq!(config.backend_url.as_str().trim_end_matches('/'), DEFAULT_BACKEND_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(2));
        assert_eq!(config.min_resolve_interval, Duration::from_millis(500));
        assert_eq!(config.sample_interval, Duration::from_secs(1));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let global = global_from(&[
            "netglance",
            "status",
            "--backend",
            "http://127.0.0.1:9000",
            "--timeout",
            "5",
        ]);
        let file = FileConfig {
            backend: Some("http://ignored.example".into()),
            timeout_secs: Some(9),
            ..FileConfig::default()
        };

        let config = build_monitor_config(&global, &file).expect("config");
        assert_eq!(config.backend_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn invalid_backend_url_is_rejected() {
        let global = global_from(&["netglance", "status", "--backend", "not a url"]);
        let err = build_monitor_config(&global, &FileConfig::default())
            .expect_err("invalid URL must fail");
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let global = global_from(&["netglance", "status", "--timeout", "0"]);
        let err = build_monitor_config(&global, &FileConfig::default())
            .expect_err("zero timeout must fail");
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn wifi_section_overrides_probe_command() {
        let global = global_from(&["netglance", "status"]);
        let file = FileConfig {
            wifi: WifiSection {
                command: Some(vec!["iw".into(), "dev".into(), "wlan0".into(), "link".into()]),
                interval_ms: Some(2000),
            },
            ..FileConfig::default()
        };

        let config = build_monitor_config(&global, &file).expect("config");
        assert_eq!(config.probe_command[0], "iw");
        assert_eq!(config.sample_interval, Duration::from_secs(2));
    }
}
