// Summary view models
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub average: f64,
}

/// Share of classified heart-rate samples per zone (1..=5), in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDistribution {
    pub classified_samples: usize,
    pub percentages: [f64; 5],
}

impl ZoneDistribution {
    /// Percentage for zone 1..=5; anything else reads as 0
    pub fn percent(&self, zone: u8) -> f64 {
        match zone {
            1..=5 => self.percentages[usize::from(zone - 1)],
            _ => 0.0,
        }
    }

    pub fn total(&self) -> f64 {
        self.percentages.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RespirationComparison {
    pub avg_awake: f64,
    pub avg_sleep: f64,
    /// How much lower sleep respiration is than awake, in whole percent
    pub percent_lower: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationTypeStats {
    pub count: usize,
    pub avg_duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationStats {
    pub events: AnnotationTypeStats,
    pub interventions: AnnotationTypeStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub stress_trend: Vec<DailyAverage>,
    pub heart_rate_zones: ZoneDistribution,
    pub respiration: RespirationComparison,
    pub annotations: AnnotationStats,
}
