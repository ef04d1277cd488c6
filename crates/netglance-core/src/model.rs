// ── Domain model ──
//
// The three independent state slices published by the store:
// connectivity (OS path state), geo status (backend lookup result),
// and the WiFi sample. Derived display values (country name, flag,
// status glyph) are pure functions in `country`, never stored.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::country;

// ── Interfaces ───────────────────────────────────────────────────────

/// Category of an active network interface.
///
/// The `Ord` impl fixes the order used by
/// [`interface_signature`] so signatures are stable across updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum InterfaceKind {
    Wifi,
    Ethernet,
    Cellular,
    Other,
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Wifi => "WiFi",
            Self::Ethernet => "Ethernet",
            Self::Cellular => "Cellular",
            Self::Other => "VPN/Other",
        };
        f.write_str(label)
    }
}

/// One OS-level path change event: overall reachability plus the set of
/// active interface categories.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathUpdate {
    pub reachable: bool,
    pub interfaces: BTreeSet<InterfaceKind>,
}

/// Published connectivity state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Connectivity {
    pub reachable: bool,
    pub interfaces: BTreeSet<InterfaceKind>,
}

impl Connectivity {
    /// Whether WiFi is among the active interfaces.
    pub fn uses_wifi(&self) -> bool {
        self.interfaces.contains(&InterfaceKind::Wifi)
    }

    pub fn interface_signature(&self) -> String {
        interface_signature(&self.interfaces)
    }
}

/// Join the interface set into a stable `|`-separated signature.
///
/// Used to detect interface-set changes (VPN or WiFi/Ethernet swaps)
/// that do not toggle reachability.
pub fn interface_signature(interfaces: &BTreeSet<InterfaceKind>) -> String {
    interfaces
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|")
}

// ── Backend lookup ───────────────────────────────────────────────────

/// A successful backend lookup. Superseded wholesale by the next
/// result, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendResult {
    /// Public IP as reported by the backend (`"Unknown"` when absent).
    pub public_ip: String,
    /// ISO 3166-1 alpha-2 country code, possibly empty.
    pub country_code: String,
    pub fetched_at: DateTime<Utc>,
}

impl BackendResult {
    /// Display name for the country code (raw code when not in the table).
    pub fn country_name(&self) -> String {
        country::country_name(&self.country_code)
    }

    /// Flag glyph for the country code.
    pub fn flag(&self) -> String {
        country::flag_glyph(&self.country_code)
    }
}

/// Displayed geolocation status.
///
/// `Unavailable` covers both a real outage and a backend hiccup — the
/// independently tracked [`Connectivity::reachable`] flag tells the two
/// apart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum GeoStatus {
    /// No lookup has completed yet.
    #[default]
    Pending,
    Resolved(BackendResult),
    /// The last lookup failed, or the network went down.
    Unavailable,
}

// ── WiFi ─────────────────────────────────────────────────────────────

/// One WiFi signal reading. `Default` is the reset value published when
/// WiFi leaves the active interface set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct WifiSample {
    /// Signal quality on a 0–100 scale.
    pub percent: u8,
    pub ssid: String,
    /// `None` for the reset sample.
    pub sampled_at: Option<DateTime<Utc>>,
}
