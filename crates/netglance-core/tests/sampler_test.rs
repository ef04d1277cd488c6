// WiFi sampler behavior tests with a fake probe: tick publishing,
// immediate reset when WiFi drops, start/stop idempotence, late-result
// discard, and the launch-failure placeholder.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use netglance_core::{
    Connectivity, CoreError, InterfaceKind, SignalProbe, StatusStore, WifiSampler,
};

const SAMPLE_REPORT: &str = "\
MyNetwork:
  PHY Mode: 802.11ax
  Signal / Noise: -63 dBm / -91 dBm
";

// ── Fake probes ─────────────────────────────────────────────────────

struct FixedProbe {
    output: &'static str,
    calls: AtomicUsize,
}

impl FixedProbe {
    fn new(output: &'static str) -> Arc<Self> {
        Arc::new(Self {
            output,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SignalProbe for FixedProbe {
    async fn sample(&self) -> Result<String, CoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.output.to_owned())
    }
}

struct FailingProbe;

#[async_trait]
impl SignalProbe for FailingProbe {
    async fn sample(&self) -> Result<String, CoreError> {
        Err(CoreError::ProbeLaunch {
            command: "system_profiler".into(),
            reason: "No such file or directory".into(),
        })
    }
}

/// Probe that blocks long enough for stop() to land mid-sample.
struct SlowProbe;

#[async_trait]
impl SignalProbe for SlowProbe {
    async fn sample(&self) -> Result<String, CoreError> {
        tokio::time::sleep(Duration::from_millis(150)).await;
        Ok(SAMPLE_REPORT.to_owned())
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn wifi_up() -> Connectivity {
    Connectivity {
        reachable: true,
        interfaces: BTreeSet::from([InterfaceKind::Wifi]),
    }
}

fn ethernet_only() -> Connectivity {
    Connectivity {
        reachable: true,
        interfaces: BTreeSet::from([InterfaceKind::Ethernet]),
    }
}

fn sampler_with(
    store: &Arc<StatusStore>,
    probe: Arc<dyn SignalProbe>,
) -> Arc<WifiSampler> {
    Arc::new(WifiSampler::new(
        Arc::clone(store),
        probe,
        Duration::from_millis(20),
    ))
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn publishes_parsed_samples_while_wifi_is_active() {
    let store = Arc::new(StatusStore::new());
    store.set_connectivity(wifi_up());

    let sampler = sampler_with(&store, FixedProbe::new(SAMPLE_REPORT));
    sampler.start();

    let mut wifi = store.subscribe_wifi();
    let sample = tokio::time::timeout(Duration::from_secs(1), wifi.changed())
        .await
        .expect("first sample")
        .expect("store alive");

    assert_eq!(sample.ssid, "MyNetwork");
    assert_eq!(sample.percent, 45); // -63 dBm
    assert!(sample.sampled_at.is_some());

    sampler.stop();
}

#[tokio::test]
async fn skips_ticks_while_wifi_is_inactive() {
    let store = Arc::new(StatusStore::new());
    store.set_connectivity(ethernet_only());

    let probe = FixedProbe::new(SAMPLE_REPORT);
    let sampler = sampler_with(&store, Arc::clone(&probe) as Arc<dyn SignalProbe>);
    sampler.start();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0, "no probe off-WiFi");

    sampler.stop();
}

#[tokio::test]
async fn wifi_loss_resets_the_sample_immediately() {
    let store = Arc::new(StatusStore::new());
    store.set_connectivity(wifi_up());

    let sampler = sampler_with(&store, FixedProbe::new(SAMPLE_REPORT));
    sampler.start();

    let mut wifi = store.subscribe_wifi();
    tokio::time::timeout(Duration::from_secs(1), wifi.changed())
        .await
        .expect("first sample")
        .expect("store alive");

    store.set_connectivity(ethernet_only());

    // The reset must arrive without waiting for another tick interval.
    let reset = tokio::time::timeout(Duration::from_secs(1), async {
        loop {
            let sample = wifi.changed().await.expect("store alive");
            if sample.percent == 0 && sample.ssid.is_empty() {
                return sample;
            }
        }
    })
    .await
    .expect("reset sample");
    assert_eq!(reset.sampled_at, None);

    sampler.stop();
}

#[tokio::test]
async fn start_and_stop_are_idempotent() {
    let store = Arc::new(StatusStore::new());
    let sampler = sampler_with(&store, FixedProbe::new(SAMPLE_REPORT));

    sampler.stop(); // safe when not running
    assert!(!sampler.is_running());

    sampler.start();
    sampler.start();
    assert!(sampler.is_running());

    sampler.stop();
    sampler.stop();
    assert!(!sampler.is_running());
}

#[tokio::test]
async fn late_results_after_stop_are_discarded() {
    let store = Arc::new(StatusStore::new());
    store.set_connectivity(wifi_up());

    let sampler = sampler_with(&store, Arc::new(SlowProbe));
    sampler.start();

    // Let the first tick start its (slow) probe, then stop mid-sample.
    tokio::time::sleep(Duration::from_millis(50)).await;
    sampler.stop();

    tokio::time::sleep(Duration::from_millis(250)).await;
    let sample = store.wifi_sample();
    assert_eq!(sample.percent, 0, "late probe result must be discarded");
    assert!(sample.ssid.is_empty());
}

#[tokio::test]
async fn launch_failure_publishes_the_placeholder() {
    let store = Arc::new(StatusStore::new());
    store.set_connectivity(wifi_up());

    let sampler = sampler_with(&store, Arc::new(FailingProbe));
    sampler.start();

    let mut wifi = store.subscribe_wifi();
    let sample = tokio::time::timeout(Duration::from_secs(1), wifi.changed())
        .await
        .expect("placeholder sample")
        .expect("store alive");

    assert_eq!(sample.percent, 75);
    assert_eq!(sample.ssid, "WiFi");

    sampler.stop();
}
