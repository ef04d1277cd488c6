// ── Debounced backend resolver ──
//
// Invariants (the only explicit concurrency control in this crate):
//   - at most one backend request in flight at a time;
//   - requests are never issued less than `min_interval` apart — an
//     early call is deferred to the earliest valid time, not dropped;
//   - both hold under concurrent triggering from a reachability
//     transition and an interface-signature change in the same path
//     notification.
//
// A failed lookup publishes `GeoStatus::Unavailable` but never touches
// the independently tracked reachability flag, so a backend hiccup
// stays distinguishable from a real outage. The completion timestamp is
// recorded on every outcome. In-flight requests are never cancelled;
// the most recent write wins.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::backend::BackendClient;
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::model::{BackendResult, GeoStatus};
use crate::store::StatusStore;

/// Resolves the public IP and country through the backend, publishing
/// results into the store.
pub struct BackendResolver {
    client: BackendClient,
    store: Arc<StatusStore>,
    min_interval: Duration,
    guard: Mutex<DebounceGuard>,
}

#[derive(Default)]
struct DebounceGuard {
    last_issued: Option<Instant>,
    in_flight: bool,
}

/// Outcome of the check-and-claim on the debounce guard.
enum Claim {
    Issue,
    Defer(Duration),
    Busy,
}

impl BackendResolver {
    pub fn new(config: &MonitorConfig, store: Arc<StatusStore>) -> Result<Arc<Self>, CoreError> {
        Ok(Arc::new(Self {
            client: BackendClient::new(config)?,
            store,
            min_interval: config.min_resolve_interval,
            guard: Mutex::new(DebounceGuard::default()),
        }))
    }

    /// Trigger a lookup. Fire-and-forget: the request runs on a spawned
    /// task and publishes its outcome through the store.
    pub fn resolve(self: &Arc<Self>) {
        match self.claim() {
            Claim::Issue => {
                let resolver = Arc::clone(self);
                tokio::spawn(async move {
                    resolver.run_request().await;
                });
            }
            Claim::Defer(delay) => {
                debug!(?delay, "deferring backend lookup");
                let resolver = Arc::clone(self);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    resolver.resolve();
                });
            }
            Claim::Busy => {}
        }
    }

    /// Atomically decide whether this call issues, defers, or no-ops.
    fn claim(&self) -> Claim {
        let mut guard = self.guard.lock();
        if guard.in_flight {
            return Claim::Busy;
        }

        let now = Instant::now();
        if let Some(last) = guard.last_issued {
            let elapsed = now.duration_since(last);
            if elapsed < self.min_interval {
                return Claim::Defer(self.min_interval - elapsed);
            }
        }

        guard.in_flight = true;
        guard.last_issued = Some(now);
        Claim::Issue
    }

    async fn run_request(&self) {
        let outcome = self.client.fetch().await;
        self.guard.lock().in_flight = false;

        // Recorded regardless of outcome.
        self.store.set_last_update(Utc::now());

        match outcome {
            Ok(report) => {
                debug!(ip = %report.ip, country = %report.country_code, "backend lookup resolved");
                self.store.set_geo(GeoStatus::Resolved(BackendResult {
                    public_ip: report.ip,
                    country_code: report.country_code,
                    fetched_at: Utc::now(),
                }));
            }
            Err(err) => {
                warn!(error = %err, "backend lookup failed");
                self.store.set_geo(GeoStatus::Unavailable);
            }
        }
    }
}
