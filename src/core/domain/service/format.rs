//! Human-readable rendering of byte counts and uptimes for dashboard views.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formats a byte count with binary multiples, e.g. `1536` → `"1.5 KB"`.
///
/// At most `decimals` fractional digits are kept and trailing zeros dropped.
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rendered = format!("{:.*}", decimals, value);
    let rendered = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rendered
    };
    format!("{} {}", rendered, UNITS[unit])
}

/// Formats an uptime in seconds as `"2d 3h 4m"`.
///
/// Zero renders as `"Not running"` and anything under a minute as `"< 1m"`.
pub fn format_uptime(seconds: u64) -> String {
    if seconds == 0 {
        return "Not running".to_string();
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let parts: Vec<String> = [(days, "d"), (hours, "h"), (minutes, "m")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, suffix)| format!("{}{}", n, suffix))
        .collect();

    if parts.is_empty() {
        "< 1m".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0, 2), "0 B");
        assert_eq!(format_bytes(512, 2), "512 B");
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(1073741824, 2), "1 GB");
        assert_eq!(format_bytes(512000000, 2), "488.28 MB");
        assert_eq!(format_bytes(u64::MAX, 1), "16777216 TB");
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "Not running");
        assert_eq!(format_uptime(42), "< 1m");
        assert_eq!(format_uptime(3_660), "1h 1m");
        assert_eq!(format_uptime(2 * 86_400 + 3 * 3_600 + 4 * 60), "2d 3h 4m");
        assert_eq!(format_uptime(86_400), "1d");
    }
}
