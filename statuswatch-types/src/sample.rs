//! Heartbeat samples and the per-monitor series they form.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Status;

/// A single timestamped health observation for a monitor.
///
/// Samples are produced by the monitoring service and are read-only here.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Milliseconds since the Unix epoch when the check ran.
    pub timestamp_ms: u64,

    /// Outcome of the check.
    pub status: Status,

    /// Message attached by the checker (e.g. "200 - OK", "timeout").
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,

    /// Round trip time of the check in milliseconds.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub latency_ms: Option<f64>,
}

impl Sample {
    /// Create a sample with no message or latency.
    pub fn new(timestamp_ms: u64, status: Status) -> Self {
        Self {
            timestamp_ms,
            status,
            message: None,
            latency_ms: None,
        }
    }

    /// Attach a checker message. Empty messages are dropped.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.message = if message.is_empty() { None } else { Some(message) };
        self
    }

    /// Attach a latency in milliseconds.
    pub fn with_latency(mut self, latency_ms: f64) -> Self {
        self.latency_ms = Some(latency_ms);
        self
    }

    /// HTTP status code reported by the check, if any.
    ///
    /// HTTP checkers put the code at the start of the message
    /// (`"200 - OK"`, `"503 Service Unavailable"`).
    pub fn response_code(&self) -> Option<u16> {
        let message = self.message.as_deref()?.trim_start();
        let digits = message.get(..3)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        // "2001 items" is not a status code
        if message[3..].starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let code: u16 = digits.parse().ok()?;
        (100..600).contains(&code).then_some(code)
    }
}

/// All samples for one monitor from one polling cycle.
///
/// A series is rebuilt every cycle; it is never appended to.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The most recent sample. On equal timestamps the later one in the
    /// series wins.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples
            .iter()
            .reduce(|best, s| if s.timestamp_ms >= best.timestamp_ms { s } else { best })
    }

    /// Mean latency over samples that carry one.
    pub fn average_latency(&self) -> Option<f64> {
        let (sum, count) = self
            .samples
            .iter()
            .filter_map(|s| s.latency_ms)
            .fold((0.0, 0usize), |(sum, count), l| (sum + l, count + 1));
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    /// Fraction of up checks among up and down checks.
    ///
    /// Pending, maintenance and unknown samples are not counted.
    pub fn uptime_ratio(&self) -> Option<f64> {
        let (up, total) = self.samples.iter().fold((0usize, 0usize), |(up, total), s| match s.status {
            Status::Up => (up + 1, total + 1),
            Status::Down => (up, total + 1),
            _ => (up, total),
        });
        if total == 0 {
            None
        } else {
            Some(up as f64 / total as f64)
        }
    }
}

impl From<Vec<Sample>> for Series {
    fn from(samples: Vec<Sample>) -> Self {
        Self::new(samples)
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_response_code_from_message() {
        let s = Sample::new(1, Status::Up).with_message("200 - OK");
        assert_eq!(s.response_code(), Some(200));

        let s = Sample::new(1, Status::Down).with_message("503 Service Unavailable");
        assert_eq!(s.response_code(), Some(503));
    }

    #[test]
    fn test_response_code_absent() {
        assert_eq!(Sample::new(1, Status::Up).response_code(), None);
        let s = Sample::new(1, Status::Down).with_message("timeout of 48000ms exceeded");
        assert_eq!(s.response_code(), None);
        let s = Sample::new(1, Status::Up).with_message("2001 rows");
        assert_eq!(s.response_code(), None);
        let s = Sample::new(1, Status::Up).with_message("999 odd");
        assert_eq!(s.response_code(), None);
    }

    #[test]
    fn test_empty_message_is_dropped() {
        let s = Sample::new(1, Status::Up).with_message("");
        assert!(s.message.is_none());
    }

    #[test]
    fn test_latest_prefers_last_on_tie() {
        let series = Series::new(vec![
            Sample::new(5, Status::Up),
            Sample::new(9, Status::Down),
            Sample::new(9, Status::Pending),
            Sample::new(2, Status::Up),
        ]);
        assert_eq!(series.latest().map(|s| s.status), Some(Status::Pending));
        assert!(Series::default().latest().is_none());
    }

    #[test]
    fn test_average_latency_skips_missing() {
        let series = Series::new(vec![
            Sample::new(1, Status::Up).with_latency(10.0),
            Sample::new(2, Status::Down),
            Sample::new(3, Status::Up).with_latency(30.0),
        ]);
        assert_eq!(series.average_latency(), Some(20.0));
        assert!(Series::default().average_latency().is_none());
    }

    #[test]
    fn test_uptime_ratio_ignores_maintenance() {
        let series = Series::new(vec![
            Sample::new(1, Status::Up),
            Sample::new(2, Status::Down),
            Sample::new(3, Status::Maintenance),
            Sample::new(4, Status::Up),
            Sample::new(5, Status::Up),
        ]);
        assert_eq!(series.uptime_ratio(), Some(0.75));

        let series = Series::new(vec![Sample::new(1, Status::Pending)]);
        assert!(series.uptime_ratio().is_none());
    }
}
