// ── WiFi signal sampling ──
//
// Periodic signal-quality readings driven by an external diagnostic
// command, gated on WiFi being the active interface. The sampler has an
// explicit start/stop surface independent of any rendering lifecycle.

pub mod report;
pub mod signal;

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::WifiSample;
use crate::store::StatusStore;

pub use report::{SignalReading, parse_report};
pub use signal::{FALLBACK_PERCENT, rssi_to_percent};

/// Name shown when the report does not carry one.
pub const FALLBACK_SSID: &str = "WiFi";

/// Source of raw WiFi adapter reports.
#[async_trait]
pub trait SignalProbe: Send + Sync {
    /// Produce one report. The text is parsed with [`parse_report`].
    async fn sample(&self) -> Result<String, CoreError>;
}

/// Probe that runs an external diagnostic command and captures its
/// stdout. Stderr is discarded; nothing is written to stdin.
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    /// Build from a command line (program followed by arguments).
    pub fn from_command(command: &[String]) -> Result<Self, CoreError> {
        let (program, args) = command.split_first().ok_or_else(|| CoreError::Config {
            message: "probe command must name a program".to_owned(),
        })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl SignalProbe for CommandProbe {
    async fn sample(&self) -> Result<String, CoreError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| CoreError::ProbeLaunch {
                command: self.program.clone(),
                reason: e.to_string(),
            })?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Periodic WiFi signal sampler.
///
/// `start()` and `stop()` are idempotent; `stop()` cancels the pending
/// tick task and is safe to call when not running. A probe result that
/// completes after `stop()` is discarded.
pub struct WifiSampler {
    store: Arc<StatusStore>,
    probe: Arc<dyn SignalProbe>,
    interval: Duration,
    running: Mutex<Option<SamplerTask>>,
}

struct SamplerTask {
    cancel: CancellationToken,
    _handle: JoinHandle<()>,
}

impl WifiSampler {
    pub fn new(store: Arc<StatusStore>, probe: Arc<dyn SignalProbe>, interval: Duration) -> Self {
        Self {
            store,
            probe,
            interval,
            running: Mutex::new(None),
        }
    }

    /// Begin sampling. No-op when already running. The first reading is
    /// taken immediately, then every `interval`.
    pub fn start(self: &Arc<Self>) {
        let mut running = self.running.lock();
        if running.is_some() {
            return;
        }

        debug!("wifi sampling started");
        let cancel = CancellationToken::new();
        let sampler = Arc::clone(self);
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            sampler.run(task_cancel).await;
        });

        *running = Some(SamplerTask {
            cancel,
            _handle: handle,
        });
    }

    /// Stop sampling and cancel the pending tick.
    pub fn stop(&self) {
        if let Some(task) = self.running.lock().take() {
            debug!("wifi sampling stopped");
            task.cancel.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    async fn run(&self, cancel: CancellationToken) {
        let mut connectivity = self.store.subscribe_connectivity();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                changed = connectivity.changed() => {
                    match changed {
                        // WiFi dropped out of the active set: reset
                        // immediately rather than on the next tick.
                        Some(conn) if !conn.uses_wifi() => {
                            self.store.set_wifi(WifiSample::default());
                        }
                        Some(_) => {}
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if !self.store.connectivity().uses_wifi() {
                        continue;
                    }
                    self.sample_once(&cancel).await;
                }
            }
        }
    }

    async fn sample_once(&self, cancel: &CancellationToken) {
        let sample = match self.probe.sample().await {
            Ok(output) => {
                let reading = parse_report(&output);
                WifiSample {
                    percent: rssi_to_percent(reading.rssi, true),
                    ssid: reading.ssid.unwrap_or_else(|| FALLBACK_SSID.to_owned()),
                    sampled_at: Some(Utc::now()),
                }
            }
            Err(err) => {
                warn!(error = %err, "signal probe failed, publishing placeholder");
                WifiSample {
                    percent: FALLBACK_PERCENT,
                    ssid: FALLBACK_SSID.to_owned(),
                    sampled_at: Some(Utc::now()),
                }
            }
        };

        // Results landing after stop() or after WiFi dropped out of the
        // active set are discarded, never applied.
        if cancel.is_cancelled() || !self.store.connectivity().uses_wifi() {
            return;
        }
        self.store.set_wifi(sample);
    }
}
