// Chart view models built from decimated series
use crate::application::normalizer::SampleNormalizer;
use crate::domain::sample::{RawSeriesSet, Sample, SeriesKind};
use crate::domain::time::format_hover_time;
use crate::domain::zones::{HeartRateZone, HeartRateZones, StressBand, StressThresholds};
use crate::infrastructure::config::AnalyticsConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    pub hover: String,
}

impl ChartPoint {
    fn from_sample(sample: &Sample) -> Self {
        Self {
            timestamp: sample.timestamp,
            value: sample.value,
            hover: format!(
                "Timestamp: {}\nValue: {}",
                format_hover_time(&sample.timestamp),
                sample.value
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressPoint {
    #[serde(flatten)]
    pub point: ChartPoint,
    pub band: StressBand,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StressChart {
    pub points: Vec<StressPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRatePoint {
    #[serde(flatten)]
    pub point: ChartPoint,
    pub zone: HeartRateZone,
}

/// Line piece between two consecutive points, colored by the first point's zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneSegment {
    pub zone: HeartRateZone,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub start_bpm: f64,
    pub end_bpm: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeartRateChart {
    pub points: Vec<HeartRatePoint>,
    pub segments: Vec<ZoneSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RespirationChart {
    pub awake: Vec<ChartPoint>,
    pub sleep: Vec<ChartPoint>,
}

#[derive(Debug, Clone)]
pub struct ChartBuilder {
    normalizer: SampleNormalizer,
    stress: StressThresholds,
    zones: HeartRateZones,
    age: u32,
}

impl ChartBuilder {
    pub fn new(
        normalizer: SampleNormalizer,
        stress: StressThresholds,
        zones: HeartRateZones,
        age: u32,
    ) -> Self {
        Self {
            normalizer,
            stress,
            zones,
            age,
        }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(
            SampleNormalizer::from_config(config),
            config.stress.clone(),
            config.heart_rate.clone(),
            config.age,
        )
    }

    pub fn stress_chart(&self, raw: &RawSeriesSet) -> StressChart {
        let series = self
            .normalizer
            .normalize(SeriesKind::Stress, raw.records(SeriesKind::Stress));
        let points = series
            .samples
            .iter()
            .map(|s| StressPoint {
                point: ChartPoint::from_sample(s),
                band: self.stress.classify(s.value),
            })
            .collect();
        StressChart { points }
    }

    pub fn heart_rate_chart(&self, raw: &RawSeriesSet) -> HeartRateChart {
        let series = self
            .normalizer
            .normalize(SeriesKind::HeartRate, raw.records(SeriesKind::HeartRate));
        let points: Vec<HeartRatePoint> = series
            .samples
            .iter()
            .map(|s| HeartRatePoint {
                point: ChartPoint::from_sample(s),
                zone: self.zones.classify(s.value, self.age),
            })
            .collect();

        // Zone 0 and zone 1 stay on the base line
        let segments = points
            .windows(2)
            .filter(|pair| pair[0].zone > HeartRateZone::Zone1)
            .map(|pair| ZoneSegment {
                zone: pair[0].zone,
                start_time: pair[0].point.timestamp,
                end_time: pair[1].point.timestamp,
                start_bpm: pair[0].point.value,
                end_bpm: pair[1].point.value,
            })
            .collect();

        HeartRateChart { points, segments }
    }

    pub fn respiration_chart(&self, raw: &RawSeriesSet) -> RespirationChart {
        let points = |kind: SeriesKind| -> Vec<ChartPoint> {
            self.normalizer
                .normalize(kind, raw.records(kind))
                .samples
                .iter()
                .map(ChartPoint::from_sample)
                .collect()
        };
        RespirationChart {
            awake: points(SeriesKind::Respiration),
            sleep: points(SeriesKind::SleepRespiration),
        }
    }
}

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new(
            SampleNormalizer::default(),
            StressThresholds::default(),
            HeartRateZones::default(),
            23,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::RawRecord;

    fn minute_records(values: &[f64]) -> Vec<RawRecord> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| RawRecord::new(Some(format!("2024-01-01T08:{:02}:00Z", i)), Some(*v)))
            .collect()
    }

    #[test]
    fn test_stress_chart_is_decimated_and_banded() {
        let values: Vec<f64> = (0..10).map(|i| (i * 10) as f64).collect();
        let raw = RawSeriesSet::new().with(SeriesKind::Stress, minute_records(&values));

        let chart = ChartBuilder::default().stress_chart(&raw);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].band, StressBand::Resting);
        assert_eq!(chart.points[1].point.value, 50.0);
        assert_eq!(chart.points[1].band, StressBand::Low);
        assert_eq!(chart.points[1].point.hover, "Timestamp: 2024-01-01 08:05\nValue: 50");
    }

    #[test]
    fn test_heart_rate_segments_skip_base_zones() {
        let builder = ChartBuilder::new(
            SampleNormalizer::new(5, 1, 5),
            StressThresholds::default(),
            HeartRateZones::default(),
            23,
        );
        // zone1, zone3, none, zone5
        let raw = RawSeriesSet::new().with(
            SeriesKind::HeartRate,
            minute_records(&[100.0, 150.0, 60.0, 190.0]),
        );

        let chart = builder.heart_rate_chart(&raw);
        let zones: Vec<u8> = chart.points.iter().map(|p| p.zone.number()).collect();
        assert_eq!(zones, vec![1, 3, 0, 5]);
        assert_eq!(chart.segments.len(), 1);
        assert_eq!(chart.segments[0].zone, HeartRateZone::Zone3);
        assert_eq!(chart.segments[0].end_bpm, 60.0);
    }

    #[test]
    fn test_respiration_chart_keeps_series_apart() {
        let raw = RawSeriesSet::new()
            .with(SeriesKind::Respiration, minute_records(&[15.0; 6]))
            .with(SeriesKind::SleepRespiration, minute_records(&[11.0]));

        let chart = ChartBuilder::default().respiration_chart(&raw);
        assert_eq!(chart.awake.len(), 2);
        assert_eq!(chart.sleep.len(), 1);
        assert_eq!(chart.sleep[0].value, 11.0);
    }
}
