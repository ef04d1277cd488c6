// ── sysfs path source ──
//
// Default OS integration on Linux: reads interface state from
// `/sys/class/net`, classifies interfaces by name, and emits a
// `PathUpdate` only when reachability or the interface set changes.
// The polling is internal; consumers still see an edge-triggered event
// stream.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use super::PathSource;
use crate::model::{InterfaceKind, PathUpdate};

const SYSFS_NET_ROOT: &str = "/sys/class/net";

/// Edge-triggered path source backed by `/sys/class/net`.
pub struct SysfsPathSource {
    root: PathBuf,
    poll_interval: Duration,
    last: Option<PathUpdate>,
}

impl SysfsPathSource {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            root: PathBuf::from(SYSFS_NET_ROOT),
            poll_interval,
            last: None,
        }
    }

    /// Read from a different root directory (tests).
    pub fn with_root(root: impl Into<PathBuf>, poll_interval: Duration) -> Self {
        Self {
            root: root.into(),
            poll_interval,
            last: None,
        }
    }

    /// Scan the sysfs tree for interfaces that are currently up.
    fn read_state(&self) -> PathUpdate {
        let mut interfaces = BTreeSet::new();

        let Ok(entries) = fs::read_dir(&self.root) else {
            return PathUpdate::default();
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if skip_interface(&name) {
                continue;
            }

            let operstate = fs::read_to_string(entry.path().join("operstate"))
                .unwrap_or_default();
            if operstate.trim() != "up" {
                continue;
            }

            interfaces.insert(classify(&name));
        }

        PathUpdate {
            reachable: !interfaces.is_empty(),
            interfaces,
        }
    }
}

#[async_trait]
impl PathSource for SysfsPathSource {
    async fn next_update(&mut self) -> Option<PathUpdate> {
        loop {
            let current = self.read_state();
            if self.last.as_ref() != Some(&current) {
                trace!(reachable = current.reachable, "path state changed");
                self.last = Some(current.clone());
                return Some(current);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Loopback and virtual bridge endpoints never count as connectivity.
fn skip_interface(name: &str) -> bool {
    name == "lo" || name.starts_with("veth") || name.starts_with("docker") || name.starts_with("br-")
}

/// Classify an interface by its kernel name.
fn classify(name: &str) -> InterfaceKind {
    if name.starts_with("wl") {
        InterfaceKind::Wifi
    } else if name.starts_with("en") || name.starts_with("eth") {
        InterfaceKind::Ethernet
    } else if name.starts_with("ww") {
        InterfaceKind::Cellular
    } else {
        // tun/tap/wg/ppp and anything unrecognized.
        InterfaceKind::Other
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn fake_interface(root: &std::path::Path, name: &str, operstate: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).expect("create interface dir");
        fs::write(dir.join("operstate"), operstate).expect("write operstate");
    }

    #[test]
    fn classifies_kernel_interface_names() {
        assert_eq!(classify("wlan0"), InterfaceKind::Wifi);
        assert_eq!(classify("wlp3s0"), InterfaceKind::Wifi);
        assert_eq!(classify("eth0"), InterfaceKind::Ethernet);
        assert_eq!(classify("enp0s31f6"), InterfaceKind::Ethernet);
        assert_eq!(classify("wwan0"), InterfaceKind::Cellular);
        assert_eq!(classify("tun0"), InterfaceKind::Other);
        assert_eq!(classify("wg0"), InterfaceKind::Other);
    }

    #[test]
    fn reads_up_interfaces_from_sysfs_layout() {
        let root = tempfile::tempdir().expect("tempdir");
        fake_interface(root.path(), "lo", "unknown");
        fake_interface(root.path(), "wlp3s0", "up");
        fake_interface(root.path(), "enp0s31f6", "down");
        fake_interface(root.path(), "docker0", "up");

        let source = SysfsPathSource::with_root(root.path(), Duration::from_millis(10));
        let state = source.read_state();

        assert!(state.reachable);
        assert_eq!(
            state.interfaces,
            BTreeSet::from([InterfaceKind::Wifi]),
            "only the up, non-virtual interface should count"
        );
    }

    #[test]
    fn empty_root_is_unreachable() {
        let root = tempfile::tempdir().expect("tempdir");
        let source = SysfsPathSource::with_root(root.path(), Duration::from_millis(10));
        let state = source.read_state();
        assert!(!state.reachable);
        assert!(state.interfaces.is_empty());
    }

    #[tokio::test]
    async fn emits_only_on_change() {
        let root = tempfile::tempdir().expect("tempdir");
        fake_interface(root.path(), "eth0", "up");

        let mut source = SysfsPathSource::with_root(root.path(), Duration::from_millis(5));

        let first = source.next_update().await.expect("initial state");
        assert!(first.reachable);

        // Unchanged state: next_update should block past one poll cycle.
        let unchanged =
            tokio::time::timeout(Duration::from_millis(30), source.next_update()).await;
        assert!(unchanged.is_err(), "update emitted without a state change");

        fake_interface(root.path(), "eth0", "down");
        let second = tokio::time::timeout(Duration::from_millis(200), source.next_update())
            .await
            .expect("poll cycle")
            .expect("state change");
        assert!(!second.reachable);
    }
}
