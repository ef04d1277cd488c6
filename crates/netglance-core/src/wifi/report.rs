// ── WiFi adapter report parsing ──
//
// Scans the text report produced by the diagnostic command
// (`system_profiler SPAirPortDataType` on macOS) for the connected
// network's name and RSSI. The format is indentation-based prose, so
// parsing is line-oriented:
//
//     MyNetwork:
//               PHY Mode: 802.11ax
//               Channel: 44 (5GHz, 80MHz)
//               Signal / Noise: -63 dBm / -91 dBm
//
// The SSID is the non-empty line immediately preceding the first
// `PHY Mode` line, with a trailing colon stripped. The RSSI is the
// numeric prefix of the first token after the colon on the first line
// containing `Signal`.

/// Markers located in the report text.
const PHY_MODE_MARKER: &str = "PHY Mode";
const SIGNAL_MARKER: &str = "Signal";

/// Parsed fields of one adapter report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalReading {
    /// Network name, when the report names one.
    pub ssid: Option<String>,
    /// RSSI in dBm; 0 when the report carried no signal line.
    pub rssi: i32,
}

/// Parse a diagnostic report. Never fails: missing fields default to
/// `None` / 0 and are resolved downstream.
pub fn parse_report(output: &str) -> SignalReading {
    let lines: Vec<&str> = output.lines().collect();
    let mut ssid = None;
    let mut rssi = None;

    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if ssid.is_none() && trimmed.contains(PHY_MODE_MARKER) && index > 0 {
            let previous = lines[index - 1].trim();
            let name = previous.strip_suffix(':').unwrap_or(previous);
            if !name.is_empty() {
                ssid = Some(name.to_owned());
            }
        }

        if rssi.is_none() && trimmed.contains(SIGNAL_MARKER) {
            rssi = parse_signal_line(trimmed);
        }
    }

    SignalReading {
        ssid,
        rssi: rssi.unwrap_or(0),
    }
}

/// Extract the RSSI from a line like `Signal / Noise: -63 dBm / -91 dBm`
/// or `Signal: -63 dBm`.
fn parse_signal_line(line: &str) -> Option<i32> {
    let (_, value) = line.split_once(':')?;
    let token = value.split_whitespace().next()?;
    numeric_prefix(token)
}

/// Parse the leading integer of a token, e.g. `-63dBm` -> -63.
fn numeric_prefix(token: &str) -> Option<i32> {
    let end = token
        .char_indices()
        .take_while(|&(i, c)| c.is_ascii_digit() || (i == 0 && c == '-'))
        .last()
        .map(|(i, _)| i + 1)?;
    token[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE_REPORT: &str = "\
Wi-Fi:

      Software Versions:
          CoreWLAN: 16.0 (1657)
      Interfaces:
        en0:
          Card Type: Wi-Fi  (0x14E4, 0x4387)
          Status: Connected
          Current Network Information:
            MyNetwork:
              PHY Mode: 802.11ax
              Channel: 44 (5GHz, 80MHz)
              Signal / Noise: -63 dBm / -91 dBm
              Transmit Rate: 1200
";

    #[test]
    fn parses_ssid_and_rssi_from_a_full_report() {
        let reading = parse_report(SAMPLE_REPORT);
        assert_eq!(reading.ssid.as_deref(), Some("MyNetwork"));
        assert_eq!(reading.rssi, -63);
    }

    #[test]
    fn ssid_is_the_line_before_the_first_phy_mode_marker() {
        let report = "MyNetwork:\n  PHY Mode: 802.11n\nOther:\n  PHY Mode: 802.11ac\n";
        let reading = parse_report(report);
        assert_eq!(reading.ssid.as_deref(), Some("MyNetwork"));
    }

    #[test]
    fn ssid_without_trailing_colon_is_kept_verbatim() {
        let report = "CoffeeShop\n  PHY Mode: 802.11n\n";
        assert_eq!(parse_report(report).ssid.as_deref(), Some("CoffeeShop"));
    }

    #[test]
    fn plain_signal_line_is_accepted() {
        let report = "  Signal: -71 dBm\n";
        assert_eq!(parse_report(report).rssi, -71);
    }

    #[test]
    fn first_signal_line_wins() {
        let report = "Signal / Noise: -40 dBm / -90 dBm\nSignal / Noise: -80 dBm / -90 dBm\n";
        assert_eq!(parse_report(report).rssi, -40);
    }

    #[test]
    fn missing_fields_default() {
        let reading = parse_report("no adapter data here\n");
        assert_eq!(reading.ssid, None);
        assert_eq!(reading.rssi, 0);
    }

    #[test]
    fn unparseable_signal_value_defaults_to_zero() {
        assert_eq!(parse_report("Signal / Noise: strong\n").rssi, 0);
        assert_eq!(parse_report("Signal / Noise:\n").rssi, 0);
        assert_eq!(parse_report("Signal / Noise: - dBm\n").rssi, 0);
    }

    #[test]
    fn numeric_prefix_strips_units() {
        assert_eq!(numeric_prefix("-63dBm"), Some(-63));
        assert_eq!(numeric_prefix("-63"), Some(-63));
        assert_eq!(numeric_prefix("42"), Some(42));
        assert_eq!(numeric_prefix("dBm"), None);
        assert_eq!(numeric_prefix("-"), None);
    }
}
