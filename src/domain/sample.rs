// Wearable sample domain models
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// Which export stream a sample came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Stress,
    HeartRate,
    Respiration,
    SleepRespiration,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        SeriesKind::Stress,
        SeriesKind::HeartRate,
        SeriesKind::Respiration,
        SeriesKind::SleepRespiration,
    ];

    /// Key of this series in the `/all-data` payload
    pub fn series_name(self) -> &'static str {
        match self {
            SeriesKind::Stress => "stress",
            SeriesKind::HeartRate => "daily_heart_rate",
            SeriesKind::Respiration => "respiration",
            SeriesKind::SleepRespiration => "sleep_respiration",
        }
    }

    /// Field holding the measured value in each raw record
    pub fn metric_field(self) -> &'static str {
        match self {
            SeriesKind::Stress => "stressLevel",
            SeriesKind::HeartRate => "beatsPerMinute",
            SeriesKind::Respiration | SeriesKind::SleepRespiration => "breathsPerMinute",
        }
    }
}

/// One record as exported, before cleaning. Either field may be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRecord {
    pub timestamp: Option<String>,
    pub value: Option<f64>,
}

impl RawRecord {
    pub fn new(timestamp: Option<String>, value: Option<f64>) -> Self {
        Self { timestamp, value }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub source: SeriesKind,
}

impl Sample {
    pub fn new(timestamp: DateTime<Utc>, value: f64, source: SeriesKind) -> Self {
        Self {
            timestamp,
            value,
            source,
        }
    }
}

/// Samples ordered by ascending timestamp. Duplicated instants are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub kind: SeriesKind,
    pub samples: Vec<Sample>,
}

impl NormalizedSeries {
    pub fn new(kind: SeriesKind, samples: Vec<Sample>) -> Self {
        Self { kind, samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.value)
    }
}

/// Every raw series returned for a user in one `/all-data` fetch
#[derive(Debug, Clone, Default)]
pub struct RawSeriesSet {
    series: HashMap<SeriesKind, Vec<RawRecord>>,
}

impl RawSeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: SeriesKind, records: Vec<RawRecord>) {
        self.series.insert(kind, records);
    }

    pub fn with(mut self, kind: SeriesKind, records: Vec<RawRecord>) -> Self {
        self.insert(kind, records);
        self
    }

    /// Records for a series; absent series read as empty
    pub fn records(&self, kind: SeriesKind) -> &[RawRecord] {
        self.series.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when at least one series carries any record
    pub fn has_data(&self) -> bool {
        self.series.values().any(|records| !records.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_names_match_payload_keys() {
        assert_eq!(SeriesKind::HeartRate.series_name(), "daily_heart_rate");
        assert_eq!(SeriesKind::SleepRespiration.metric_field(), "breathsPerMinute");
    }

    #[test]
    fn test_has_data() {
        let empty = RawSeriesSet::new().with(SeriesKind::Stress, Vec::new());
        assert!(!empty.has_data());
        assert!(empty.records(SeriesKind::HeartRate).is_empty());

        let some = empty.with(
            SeriesKind::Respiration,
            vec![RawRecord::new(Some("2024-01-01T00:00:00Z".into()), Some(14.0))],
        );
        assert!(some.has_data());
    }
}
