//! Numeric normalization for string-encoded indicator values.
//!
//! Calendar feeds report values as display strings ("3.4%", "250K",
//! "1,234.5"); this module turns them into plain `f64` readings and
//! provides the rounding rule used for surprises.

/// Parses a raw value token as reported by an indicator feed.
///
/// Handles percent suffixes, `K`/`M`/`B`/`T` magnitude suffixes,
/// thousands separators, and the usual empty markers (`""`, `"-"`,
/// `"n/a"`). Percent readings keep their printed magnitude, so `"3.4%"`
/// parses to `3.4`.
///
/// Returns `None` when the token carries no usable number.
#[must_use]
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty()
        || trimmed == "-"
        || trimmed == "--"
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("na")
    {
        return None;
    }

    let mut s = trimmed.replace(',', "");
    if s.ends_with('%') {
        s.pop();
    }

    let multiplier = match s.chars().last() {
        Some('K' | 'k') => {
            s.pop();
            1e3
        }
        Some('M' | 'm') => {
            s.pop();
            1e6
        }
        Some('B' | 'b') => {
            s.pop();
            1e9
        }
        Some('T' | 't') => {
            s.pop();
            1e12
        }
        _ => 1.0,
    };

    s.trim().parse::<f64>().ok().map(|v| v * multiplier)
}

/// Rounds to two decimal places, half away from zero.
///
/// Surprises are rounded with this rule before classification, so the
/// stored surprise and the stored bias can never disagree.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a reading for display, compacting large magnitudes.
///
/// `250_000.0` renders as `"250.00K"`, `2.5e13` as `"25.00T"`, and
/// ordinary readings as plain two-decimal numbers.
#[must_use]
pub fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e12 {
        format!("{:.2}T", value / 1e12)
    } else if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e3 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}
