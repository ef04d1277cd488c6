// ── Country display mapping ──
//
// Pure derivations from an ISO 3166-1 alpha-2 country code: display
// name, flag emoji, and the overall status glyph. Flags are built from
// Unicode regional indicator symbols, so any valid two-letter code
// works; the name table only covers the codes the backend commonly
// returns and falls back to the raw code.

use crate::model::GeoStatus;

/// Fallback glyph for missing or invalid country codes.
pub const GLOBE_GLYPH: &str = "🌐";

/// Glyph shown while reachable with no country information.
pub const CONNECTED_GLYPH: &str = "✅";

/// Glyph shown when offline or when the backend lookup failed.
pub const OFFLINE_GLYPH: &str = "❌";

/// First Unicode regional indicator symbol (REGIONAL INDICATOR SYMBOL LETTER A).
const REGIONAL_INDICATOR_BASE: u32 = 0x1F1E6;

const COUNTRY_NAMES: [(&str, &str); 11] = [
    ("RU", "Russia"),
    ("US", "United States"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("CN", "China"),
    ("JP", "Japan"),
    ("GB", "United Kingdom"),
    ("KZ", "Kazakhstan"),
    ("TR", "Turkey"),
    ("UA", "Ukraine"),
    ("LV", "Latvia"),
];

/// Display name for a country code; codes outside the table display
/// the (uppercased) raw code.
pub fn country_name(code: &str) -> String {
    let upper = code.to_ascii_uppercase();
    COUNTRY_NAMES
        .iter()
        .find(|(c, _)| *c == upper)
        .map_or(upper, |(_, name)| (*name).to_owned())
}

/// Flag emoji for a country code.
///
/// Each of the two ASCII letters maps to a regional indicator symbol
/// (`0x1F1E6 + (letter - 'A')`); anything that is not exactly two ASCII
/// letters yields the globe glyph.
pub fn flag_glyph(code: &str) -> String {
    let upper = code.to_ascii_uppercase();
    if upper.len() != 2 || !upper.bytes().all(|b| b.is_ascii_uppercase()) {
        return GLOBE_GLYPH.to_owned();
    }

    upper
        .chars()
        .filter_map(|c| char::from_u32(REGIONAL_INDICATOR_BASE + (u32::from(c) - u32::from('A'))))
        .collect()
}

/// Overall status glyph derived from reachability and geo status.
pub fn status_glyph(reachable: bool, geo: &GeoStatus) -> String {
    match geo {
        GeoStatus::Resolved(result) if !result.country_code.is_empty() => {
            flag_glyph(&result.country_code)
        }
        GeoStatus::Resolved(_) => {
            if reachable { CONNECTED_GLYPH } else { OFFLINE_GLYPH }.to_owned()
        }
        GeoStatus::Unavailable => OFFLINE_GLYPH.to_owned(),
        GeoStatus::Pending => GLOBE_GLYPH.to_owned(),
    }
}
