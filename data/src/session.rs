use chrono::{DateTime, FixedOffset, Timelike};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::series::Sample;

/// The local-time-of-day interval during which samples are considered valid
/// for display, expressed against a fixed UTC offset.
///
/// The boundary convention of the upstream feed is unsettled: some deliveries
/// carry true UTC instants, others carry exchange-local times mislabeled as
/// UTC. The default window is therefore wide enough to admit both without a
/// code change; hosts that know their feed's convention can narrow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    /// Inclusive start, minutes since local midnight.
    pub start_minutes: u16,
    /// Inclusive end, minutes since local midnight.
    pub end_minutes: u16,
    /// Offset added to each timestamp before extracting the time of day.
    pub utc_offset_minutes: i16,
}

impl Default for SessionWindow {
    fn default() -> Self {
        // 03:00-16:30: covers a true-UTC session (03:45-10:00) as well as
        // an exchange-local one mislabeled as UTC (09:15-15:30).
        Self {
            start_minutes: 3 * 60,
            end_minutes: 16 * 60 + 30,
            utc_offset_minutes: 0,
        }
    }
}

impl SessionWindow {
    pub fn new(start_minutes: u16, end_minutes: u16, utc_offset_minutes: i16) -> Self {
        Self {
            start_minutes,
            end_minutes,
            utc_offset_minutes,
        }
    }

    fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(i32::from(self.utc_offset_minutes) * 60)
            .unwrap_or_else(|| FixedOffset::east_opt(0).expect("zero offset is valid"))
    }

    /// Minutes since local midnight for a Unix-ms timestamp, `None` when the
    /// timestamp cannot be represented.
    pub fn minute_of_day(&self, time_ms: u64) -> Option<u16> {
        let datetime = DateTime::from_timestamp_millis(time_ms as i64)?
            .with_timezone(&self.offset());
        Some((datetime.hour() * 60 + datetime.minute()) as u16)
    }

    pub fn contains(&self, minute_of_day: u16) -> bool {
        minute_of_day >= self.start_minutes && minute_of_day <= self.end_minutes
    }

    /// Returns the subsequence of `samples` inside the window, as a new vec.
    ///
    /// A sample whose timestamp cannot be converted is dropped with a warning
    /// rather than aborting the filter. An empty result is a valid terminal
    /// state for the caller to render as such.
    pub fn filter(&self, samples: &[Sample]) -> Vec<Sample> {
        samples
            .iter()
            .filter(|sample| match self.minute_of_day(sample.time) {
                Some(minute) => self.contains(minute),
                None => {
                    warn!("dropping sample with unrepresentable timestamp {}", sample.time);
                    false
                }
            })
            .copied()
            .collect()
    }

    /// `HH:MM` label for axis ticks and tooltips, in the session's offset.
    pub fn format_label(&self, time_ms: u64) -> String {
        DateTime::from_timestamp_millis(time_ms as i64)
            .map(|datetime| {
                datetime
                    .with_timezone(&self.offset())
                    .format("%H:%M")
                    .to_string()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> u64 {
        // 2024-06-03 00:00:00 UTC
        const MIDNIGHT_MS: u64 = 1_717_372_800_000;
        MIDNIGHT_MS + u64::from(hour * 60 + minute) * 60_000
    }

    fn sample(time: u64, imbalance: f32) -> Sample {
        Sample {
            time,
            imbalance,
            ratio: None,
        }
    }

    #[test]
    fn keeps_samples_inside_window_inclusive() {
        let window = SessionWindow::new(9 * 60, 16 * 60, 0);
        let samples = vec![
            sample(at(8, 59), 1.0),
            sample(at(9, 0), 2.0),
            sample(at(12, 30), 3.0),
            sample(at(16, 0), 4.0),
            sample(at(16, 1), 5.0),
        ];

        let kept = window.filter(&samples);

        assert_eq!(
            kept.iter().map(|s| s.imbalance).collect::<Vec<_>>(),
            vec![2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn filter_is_idempotent() {
        let window = SessionWindow::default();
        let samples = vec![
            sample(at(2, 0), 1.0),
            sample(at(9, 15), 2.0),
            sample(at(15, 30), 3.0),
            sample(at(23, 0), 4.0),
        ];

        let once = window.filter(&samples);
        let twice = window.filter(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn sample_outside_window_yields_empty_result() {
        let window = SessionWindow::new(9 * 60, 16 * 60, 0);
        let kept = window.filter(&[sample(at(2, 0), 7.0)]);
        assert!(kept.is_empty());
    }

    #[test]
    fn offset_shifts_the_extracted_time_of_day() {
        // 04:30 UTC is 10:00 at +05:30
        let ist = SessionWindow::new(9 * 60, 16 * 60, 330);
        assert_eq!(ist.minute_of_day(at(4, 30)), Some(10 * 60));
        assert!(!ist.filter(&[sample(at(4, 30), 1.0)]).is_empty());

        let utc = SessionWindow::new(9 * 60, 16 * 60, 0);
        assert!(utc.filter(&[sample(at(4, 30), 1.0)]).is_empty());
    }

    #[test]
    fn default_window_admits_both_feed_conventions() {
        let window = SessionWindow::default();
        // true UTC open: 03:45
        assert!(window.contains(window.minute_of_day(at(3, 45)).unwrap()));
        // exchange-local open mislabeled as UTC: 09:15
        assert!(window.contains(window.minute_of_day(at(9, 15)).unwrap()));
        // exchange-local close mislabeled as UTC: 15:30
        assert!(window.contains(window.minute_of_day(at(15, 30)).unwrap()));
    }

    #[test]
    fn format_label_uses_session_offset() {
        let ist = SessionWindow::new(0, 1439, 330);
        assert_eq!(ist.format_label(at(4, 30)), "10:00");
        let utc = SessionWindow::new(0, 1439, 0);
        assert_eq!(utc.format_label(at(4, 30)), "04:30");
    }
}
