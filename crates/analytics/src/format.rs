//! Display formatting for metric values

/// Compact human form of a metric value
///
/// `1_500_000` becomes `1.5M`, `48_300` becomes `48K`, small values print
/// as-is. Negative values keep their sign (`-2K`).
pub fn format_compact_number(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if magnitude >= 1_000_000_000.0 {
        format!("{sign}{:.1}B", magnitude / 1_000_000_000.0)
    } else if magnitude >= 1_000_000.0 {
        format!("{sign}{:.1}M", magnitude / 1_000_000.0)
    } else if magnitude >= 1_000.0 {
        format!("{sign}{:.0}K", magnitude / 1_000.0)
    } else if magnitude.fract() == 0.0 {
        format!("{sign}{:.0}", magnitude)
    } else {
        format!("{sign}{}", magnitude)
    }
}

/// Signed percentage with a fixed number of decimals, e.g. `+12.50%`
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("{:+.*}%", decimals, value)
}
