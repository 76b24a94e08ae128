use std::time::Duration;

use anyhow::{bail, Result};

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

/// Parse duration strings like "30s", "500ms", "1.5m", "2h"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    for (suffix, multiplier) in UNITS {
        if let Some(val_str) = s.strip_suffix(suffix) {
            let val: f64 = val_str.trim().parse()?;
            if !val.is_finite() || val < 0.0 {
                bail!("Duration must be a non-negative number: {}", s);
            }
            return Ok(Duration::from_nanos((val * multiplier) as u64));
        }
    }

    bail!("Unknown duration format: {}", s)
}

/// Format a latency in milliseconds for display
pub fn format_latency(ms: f64) -> String {
    if ms < 1.0 {
        format!("{:.2}ms", ms)
    } else if ms < 1_000.0 {
        format!("{:.0}ms", ms)
    } else {
        format!("{:.2}s", ms / 1_000.0)
    }
}

/// Format how long ago something happened ("just now", "42s ago", "3m ago")
pub fn format_ago(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs < 5 {
        "just now".to_string()
    } else if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3_600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3_600)
    } else {
        format!("{}d ago", secs / 86_400)
    }
}

/// Current wall clock time in epoch milliseconds.
pub fn now_ms() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
}

/// Time elapsed between an epoch timestamp and `now_ms`, saturating at zero
/// for timestamps from the future (clock skew between us and the server).
pub fn elapsed_since(timestamp_ms: u64, now_ms: u64) -> Duration {
    Duration::from_millis(now_ms.saturating_sub(timestamp_ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        let d = parse_duration("29.99s").unwrap();
        assert!((d.as_secs_f64() - 29.99).abs() < 0.0001);
    }

    #[test]
    fn test_parse_milliseconds() {
        let d = parse_duration("500ms").unwrap();
        assert_eq!(d, Duration::from_millis(500));
    }

    #[test]
    fn test_parse_microseconds() {
        let d = parse_duration("16.958µs").unwrap();
        assert_eq!(d.as_nanos(), 16958);
    }

    #[test]
    fn test_parse_minutes_and_hours() {
        assert_eq!(parse_duration("1.5m").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("2h").unwrap(), Duration::from_secs(7200));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("-1s").is_err());
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(0.5), "0.50ms");
        assert_eq!(format_latency(42.4), "42ms");
        assert_eq!(format_latency(1534.0), "1.53s");
    }

    #[test]
    fn test_format_ago() {
        assert_eq!(format_ago(Duration::from_secs(2)), "just now");
        assert_eq!(format_ago(Duration::from_secs(42)), "42s ago");
        assert_eq!(format_ago(Duration::from_secs(185)), "3m ago");
        assert_eq!(format_ago(Duration::from_secs(7_300)), "2h ago");
        assert_eq!(format_ago(Duration::from_secs(200_000)), "2d ago");
    }

    #[test]
    fn test_elapsed_since_saturates() {
        assert_eq!(elapsed_since(1_000, 4_000), Duration::from_secs(3));
        assert_eq!(elapsed_since(5_000, 4_000), Duration::ZERO);
    }
}
