// ── Reactive status store ──
//
// The single place all observed state lives. Producers (connectivity
// monitor, backend resolver, WiFi sampler) publish through the setters;
// consumers read snapshots or subscribe to change notification via
// `watch` channels. Serializing all mutation through the store replaces
// the original design's UI-thread affinity.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::model::{Connectivity, GeoStatus, WifiSample};
use crate::stream::StateStream;

/// Reactive store for the three published state slices plus the
/// last-update timestamp.
pub struct StatusStore {
    connectivity: watch::Sender<Connectivity>,
    geo: watch::Sender<GeoStatus>,
    wifi: watch::Sender<WifiSample>,
    last_update: watch::Sender<Option<DateTime<Utc>>>,
}

impl StatusStore {
    pub fn new() -> Self {
        let (connectivity, _) = watch::channel(Connectivity::default());
        let (geo, _) = watch::channel(GeoStatus::default());
        let (wifi, _) = watch::channel(WifiSample::default());
        let (last_update, _) = watch::channel(None);

        Self {
            connectivity,
            geo,
            wifi,
            last_update,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity.borrow().clone()
    }

    pub fn geo(&self) -> GeoStatus {
        self.geo.borrow().clone()
    }

    pub fn wifi_sample(&self) -> WifiSample {
        self.wifi.borrow().clone()
    }

    /// Completion time of the last backend request, success or failure.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.borrow()
    }

    // ── Updates ──────────────────────────────────────────────────────

    /// Publish new connectivity state. Subscribers are only notified
    /// when the state actually changed.
    pub fn set_connectivity(&self, value: Connectivity) {
        self.connectivity.send_if_modified(|current| {
            if *current == value {
                false
            } else {
                *current = value;
                true
            }
        });
    }

    pub fn set_geo(&self, value: GeoStatus) {
        self.geo.send_replace(value);
    }

    pub fn set_wifi(&self, value: WifiSample) {
        self.wifi.send_replace(value);
    }

    pub fn set_last_update(&self, value: DateTime<Utc>) {
        self.last_update.send_replace(Some(value));
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_connectivity(&self) -> StateStream<Connectivity> {
        StateStream::new(self.connectivity.subscribe())
    }

    pub fn subscribe_geo(&self) -> StateStream<GeoStatus> {
        StateStream::new(self.geo.subscribe())
    }

    pub fn subscribe_wifi(&self) -> StateStream<WifiSample> {
        StateStream::new(self.wifi.subscribe())
    }

    pub fn subscribe_last_update(&self) -> StateStream<Option<DateTime<Utc>>> {
        StateStream::new(self.last_update.subscribe())
    }
}

impl Default for StatusStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::model::InterfaceKind;

    fn wifi_connectivity() -> Connectivity {
        Connectivity {
            reachable: true,
            interfaces: BTreeSet::from([InterfaceKind::Wifi]),
        }
    }

    #[tokio::test]
    async fn snapshots_reflect_updates_without_subscribers() {
        let store = StatusStore::new();
        assert!(!store.connectivity().reachable);

        store.set_connectivity(wifi_connectivity());
        assert!(store.connectivity().reachable);
        assert!(store.connectivity().uses_wifi());
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let store = StatusStore::new();
        let mut stream = store.subscribe_connectivity();

        store.set_connectivity(wifi_connectivity());
        let seen = stream.changed().await.expect("store alive");
        assert!(seen.reachable);
    }

    #[tokio::test]
    async fn identical_connectivity_does_not_notify() {
        let store = StatusStore::new();
        let mut receiver = store.subscribe_connectivity();

        store.set_connectivity(wifi_connectivity());
        receiver.changed().await.expect("first change");

        // Re-publishing the same state must not wake the subscriber.
        store.set_connectivity(wifi_connectivity());
        let woken = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            receiver.changed(),
        )
        .await;
        assert!(woken.is_err(), "unexpected notification for unchanged state");
    }

    #[tokio::test]
    async fn last_update_records_every_completion() {
        let store = StatusStore::new();
        assert_eq!(store.last_update(), None);

        let stamp = Utc::now();
        store.set_last_update(stamp);
        assert_eq!(store.last_update(), Some(stamp));
    }
}
