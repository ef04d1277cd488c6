// ── RSSI → signal quality conversion ──

/// Weakest RSSI considered usable, in dBm.
pub const MIN_RSSI: i32 = -90;

/// RSSI at which the signal is treated as perfect, in dBm.
pub const MAX_RSSI: i32 = -30;

/// Quality shown when the reading is unavailable but WiFi is active.
pub const FALLBACK_PERCENT: u8 = 75;

/// Convert an RSSI reading in dBm to a 0–100 quality percentage.
///
/// The reading is clamped to `[MIN_RSSI, MAX_RSSI]` and mapped
/// linearly. An RSSI of exactly 0 is the "unavailable" sentinel: it
/// maps to [`FALLBACK_PERCENT`] while WiFi is active, else 0.
pub fn rssi_to_percent(rssi: i32, wifi_active: bool) -> u8 {
    if rssi == 0 {
        return if wifi_active { FALLBACK_PERCENT } else { 0 };
    }

    let clamped = rssi.clamp(MIN_RSSI, MAX_RSSI);
    let percent = ((clamped - MIN_RSSI) * 100) / (MAX_RSSI - MIN_RSSI);
    u8::try_from(percent.clamp(0, 100)).unwrap_or(100)
}
