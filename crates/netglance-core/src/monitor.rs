// ── Network monitor ──
//
// The main entry point for consumers: wires the path source, backend
// resolver, and WiFi sampler around a shared StatusStore and manages
// their lifecycle. Cheaply cloneable via `Arc<MonitorInner>`.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{Connectivity, GeoStatus, PathUpdate, interface_signature};
use crate::path::PathSource;
use crate::resolver::BackendResolver;
use crate::store::StatusStore;
use crate::wifi::{CommandProbe, SignalProbe, WifiSampler};

/// Composed connectivity monitor, backend resolver, and WiFi sampler.
#[derive(Clone)]
pub struct NetMonitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    store: Arc<StatusStore>,
    resolver: Arc<BackendResolver>,
    sampler: Arc<WifiSampler>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

/// State the path task carries between updates.
#[derive(Default)]
struct PathState {
    reachable: bool,
    signature: String,
}

impl NetMonitor {
    /// Create a monitor with the default command-based signal probe.
    /// Does NOT observe anything yet — call [`start()`](Self::start).
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        let probe: Arc<dyn SignalProbe> =
            Arc::new(CommandProbe::from_command(&config.probe_command)?);
        Self::with_probe(config, probe)
    }

    /// Create a monitor with a custom signal probe.
    pub fn with_probe(
        config: MonitorConfig,
        probe: Arc<dyn SignalProbe>,
    ) -> Result<Self, CoreError> {
        let store = Arc::new(StatusStore::new());
        let resolver = BackendResolver::new(&config, Arc::clone(&store))?;
        let sampler = Arc::new(WifiSampler::new(
            Arc::clone(&store),
            probe,
            config.sample_interval,
        ));

        Ok(Self {
            inner: Arc::new(MonitorInner {
                config,
                store,
                resolver,
                sampler,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying store for snapshots and subscriptions.
    pub fn store(&self) -> &Arc<StatusStore> {
        &self.inner.store
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Start observing path changes from `source` and perform the
    /// initial backend check.
    pub async fn start<S: PathSource + 'static>(&self, source: S) {
        info!("network monitor started");

        // Initial check: don't wait for the first path event.
        self.inner.resolver.resolve();

        let inner = Arc::clone(&self.inner);
        let cancel = self.inner.cancel.clone();
        let handle = tokio::spawn(path_task(inner, source, cancel));
        self.inner.task_handles.lock().await.push(handle);
    }

    /// Trigger a manual backend lookup (debounced and single-flight
    /// like any other trigger).
    pub fn refresh(&self) {
        self.inner.resolver.resolve();
    }

    /// Start WiFi signal sampling. Idempotent.
    pub fn start_wifi_sampling(&self) {
        self.inner.sampler.start();
    }

    /// Stop WiFi signal sampling. Safe to call when not sampling.
    pub fn stop_wifi_sampling(&self) {
        self.inner.sampler.stop();
    }

    pub fn is_sampling(&self) -> bool {
        self.inner.sampler.is_running()
    }

    /// Cancel background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        self.inner.sampler.stop();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("network monitor stopped");
    }
}

// ── Path task ────────────────────────────────────────────────────────

async fn path_task(
    inner: Arc<MonitorInner>,
    mut source: impl PathSource,
    cancel: CancellationToken,
) {
    let mut state = PathState::default();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            update = source.next_update() => {
                let Some(update) = update else { break };
                apply_path_update(&inner, update, &mut state);
            }
        }
    }
}

/// Apply one path notification.
///
/// Reachability transitions and interface-set changes are evaluated
/// independently: a VPN or WiFi/Ethernet swap that never toggles
/// reachability still triggers a fresh backend lookup. The resolver's
/// guard collapses the double trigger when both fire at once.
fn apply_path_update(inner: &MonitorInner, update: PathUpdate, state: &mut PathState) {
    let was_reachable = state.reachable;
    state.reachable = update.reachable;

    inner.store.set_connectivity(Connectivity {
        reachable: update.reachable,
        interfaces: update.interfaces.clone(),
    });

    if update.reachable && !was_reachable {
        info!("network reachable");
        inner.resolver.resolve();
    } else if !update.reachable && was_reachable {
        info!("network unreachable");
        // Clear the displayed IP/country without calling the resolver.
        inner.store.set_geo(GeoStatus::Unavailable);
    }

    let signature = interface_signature(&update.interfaces);
    if signature != state.signature && !signature.is_empty() {
        debug!(interfaces = %signature, "interface set changed");
        state.signature = signature;
        if update.reachable {
            inner.resolver.resolve();
        }
    }
}
