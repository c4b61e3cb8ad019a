// Aggregator - reduce full-resolution series into summary statistics
use crate::domain::annotation::{Annotation, AnnotationType};
use crate::domain::sample::NormalizedSeries;
use crate::domain::summary::{
    AnnotationStats, AnnotationTypeStats, DailyAverage, RespirationComparison, ZoneDistribution,
};
use crate::domain::zones::{HeartRateZone, HeartRateZones};
use crate::infrastructure::config::AnalyticsConfig;
use chrono::NaiveDate;
use std::collections::BTreeMap;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Nearest integer, halves rounded up (37.5 -> 38, -2.5 -> -2)
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[derive(Debug, Clone)]
pub struct Aggregator {
    age: u32,
    zones: HeartRateZones,
}

impl Aggregator {
    pub fn new(age: u32, zones: HeartRateZones) -> Self {
        Self { age, zones }
    }

    pub fn from_config(config: &AnalyticsConfig) -> Self {
        Self::new(config.age, config.heart_rate.clone())
    }

    /// Average stress per calendar day, ascending. The day is the UTC date of
    /// each instant; no other timezone is applied.
    pub fn daily_trend(&self, stress: &NormalizedSeries) -> Vec<DailyAverage> {
        let mut days: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
        for sample in &stress.samples {
            let entry = days.entry(sample.timestamp.date_naive()).or_insert((0.0, 0));
            entry.0 += sample.value;
            entry.1 += 1;
        }

        days.into_iter()
            .map(|(date, (sum, count))| DailyAverage {
                date,
                average: sum / count as f64,
            })
            .collect()
    }

    /// Percent of classified samples per zone. Zone 0 samples are left out of
    /// the denominator; no classified samples means 0% everywhere.
    pub fn zone_distribution(&self, heart_rate: &NormalizedSeries) -> ZoneDistribution {
        let mut counts = [0usize; 5];
        for sample in &heart_rate.samples {
            let zone = self.zones.classify(sample.value, self.age);
            if zone != HeartRateZone::None {
                counts[usize::from(zone.number() - 1)] += 1;
            }
        }

        let classified: usize = counts.iter().sum();
        let percentages = counts.map(|count| {
            if classified == 0 {
                0.0
            } else {
                count as f64 / classified as f64 * 100.0
            }
        });

        ZoneDistribution {
            classified_samples: classified,
            percentages,
        }
    }

    pub fn respiration_comparison(
        &self,
        awake: &NormalizedSeries,
        sleep: &NormalizedSeries,
    ) -> RespirationComparison {
        let avg_awake = mean(awake.values()).unwrap_or(0.0);
        let avg_sleep = mean(sleep.values()).unwrap_or(0.0);

        let percent_lower = if avg_awake == 0.0 || avg_sleep == 0.0 {
            0
        } else {
            round_half_up((avg_awake - avg_sleep) / avg_awake * 100.0)
        };

        RespirationComparison {
            avg_awake,
            avg_sleep,
            percent_lower,
        }
    }

    pub fn annotation_stats(&self, annotations: &[Annotation]) -> AnnotationStats {
        let stats_for = |kind: AnnotationType| {
            let durations = annotations
                .iter()
                .filter(|a| a.kind == kind)
                .map(|a| a.duration_ms() as f64);
            let count = annotations.iter().filter(|a| a.kind == kind).count();
            AnnotationTypeStats {
                count,
                avg_duration_minutes: mean(durations)
                    .map(|ms| round_half_up(ms / MS_PER_MINUTE))
                    .unwrap_or(0),
            }
        };

        AnnotationStats {
            events: stats_for(AnnotationType::Event),
            interventions: stats_for(AnnotationType::Intervention),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(23, HeartRateZones::default())
    }
}
