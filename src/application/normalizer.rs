// Sample normalization - clean, order and decimate raw export series
use crate::domain::sample::{NormalizedSeries, RawRecord, Sample, SeriesKind};
use crate::domain::time::parse_instant;
use crate::infrastructure::config::AnalyticsConfig;

/// Keeps every k-th sample of a time-ordered series. Chart density control
/// only: no averaging or interpolation.
pub fn decimate(series: NormalizedSeries, stride: usize) -> NormalizedSeries {
    let stride = stride.max(1);
    let samples = series.samples.into_iter().step_by(stride).collect();
    NormalizedSeries::new(series.kind, samples)
}

#[derive(Debug, Clone, PartialEq)]
pub struct SampleNormalizer {
    stress_stride: usize,
    heart_rate_stride: usize,
    respiration_stride: usize,
}

impl Default for SampleNormalizer {
    fn default() -> Self {
        Self::new(5, 10, 5)
    }
}

impl SampleNormalizer {
    pub fn new(stress_stride: usize, heart_rate_stride: usize, respiration_stride: usize) -> Self {
        Self {
            stress_stride,
            heart_rate_stride,
            respiration_stride,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(
            config.stress_stride,
            config.heart_rate_stride,
            config.respiration_stride,
        )
    }

    pub fn stride_for(&self, kind: SeriesKind) -> usize {
        match kind {
            SeriesKind::Stress => self.stress_stride,
            SeriesKind::HeartRate => self.heart_rate_stride,
            SeriesKind::Respiration | SeriesKind::SleepRespiration => self.respiration_stride,
        }
    }

    /// Drop incomplete records, canonicalize timestamps and sort ascending.
    /// This is the full-resolution series statistics are computed on.
    pub fn clean(&self, kind: SeriesKind, records: &[RawRecord]) -> NormalizedSeries {
        let mut samples: Vec<Sample> = records
            .iter()
            .filter_map(|record| {
                let value = record.value.filter(|v| v.is_finite())?;
                let timestamp = parse_instant(record.timestamp.as_deref()?)?;
                Some(Sample::new(timestamp, value, kind))
            })
            .collect();

        let dropped = records.len() - samples.len();
        if dropped > 0 {
            tracing::debug!(
                "Dropped {} of {} {} records with missing value or timestamp",
                dropped,
                records.len(),
                kind.series_name()
            );
        }

        // Stable, so equal instants keep their export order
        samples.sort_by_key(|s| s.timestamp);
        NormalizedSeries::new(kind, samples)
    }

    /// Clean then decimate with the stride for this series type. Decimation
    /// runs after sorting so the kept subset is time ordered and reproducible.
    pub fn normalize(&self, kind: SeriesKind, records: &[RawRecord]) -> NormalizedSeries {
        decimate(self.clean(kind, records), self.stride_for(kind))
    }
}
