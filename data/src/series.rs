use chrono::DateTime;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::DecodeError;

/// One timestamped observation of the imbalance oscillator and, when the
/// upstream service provides it, the put/call ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in milliseconds.
    pub time: u64,
    pub imbalance: f32,
    pub ratio: Option<f32>,
}

/// A finished snapshot of the feed for one instrument/day.
///
/// `key` is an opaque identity supplied by the host; the engine compares keys,
/// not sample contents, to decide whether a snapshot is a new dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub samples: Vec<Sample>,
}

/// One row of the upstream feed payload, prior to validation.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPoint {
    #[serde(rename = "dateTime")]
    pub date_time: String,
    #[serde(rename = "totalImbalance")]
    pub total_imbalance: f64,
    pub pcr: Option<f64>,
}

impl Series {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            samples: Vec::new(),
        }
    }

    /// Builds a series from raw feed rows, dropping malformed rows.
    ///
    /// A row with an unparseable timestamp or a non-finite imbalance is
    /// skipped with a warning; it never aborts the rest of the batch. A
    /// non-finite ratio only blanks that sample's ratio, leaving a gap.
    /// Input ordering is preserved, duplicates included.
    pub fn from_raw(key: impl Into<String>, points: &[RawPoint]) -> Self {
        let samples = points
            .iter()
            .filter_map(|point| {
                let time = match DateTime::parse_from_rfc3339(&point.date_time) {
                    Ok(datetime) => {
                        let millis = datetime.timestamp_millis();
                        if millis < 0 {
                            warn!("dropping sample with pre-epoch timestamp {:?}", point.date_time);
                            return None;
                        }
                        millis as u64
                    }
                    Err(err) => {
                        warn!("dropping sample with unparseable timestamp {:?}: {err}", point.date_time);
                        return None;
                    }
                };

                if !point.total_imbalance.is_finite() {
                    warn!("dropping sample at {} with non-finite imbalance", point.date_time);
                    return None;
                }

                let ratio = point.pcr.filter(|v| v.is_finite()).map(|v| v as f32);

                Some(Sample {
                    time,
                    imbalance: point.total_imbalance as f32,
                    ratio,
                })
            })
            .collect();

        Self {
            key: key.into(),
            samples,
        }
    }

    /// Decodes a JSON array of feed rows into a series.
    pub fn from_json(key: impl Into<String>, json: &str) -> Result<Self, DecodeError> {
        let points: Vec<RawPoint> = serde_json::from_str(json)?;
        Ok(Self::from_raw(key, &points))
    }

    pub fn has_ratio(&self) -> bool {
        self.samples.iter().any(|s| s.ratio.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
