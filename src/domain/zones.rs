// Physiological zone classification
//
// Both classifiers are pure and total: every finite reading maps to exactly
// one category.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StressBand {
    Resting,
    Low,
    Medium,
    High,
}

/// Upper bounds (inclusive) of the first three stress bands
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StressThresholds {
    pub resting_max: f64,
    pub low_max: f64,
    pub medium_max: f64,
}

impl Default for StressThresholds {
    fn default() -> Self {
        Self {
            resting_max: 25.0,
            low_max: 50.0,
            medium_max: 75.0,
        }
    }
}

impl StressThresholds {
    pub fn classify(&self, level: f64) -> StressBand {
        if level <= self.resting_max {
            StressBand::Resting
        } else if level <= self.low_max {
            StressBand::Low
        } else if level <= self.medium_max {
            StressBand::Medium
        } else {
            StressBand::High
        }
    }
}

/// Heart-rate zone; `None` is zone 0, a reading outside every band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum HeartRateZone {
    None,
    Zone1,
    Zone2,
    Zone3,
    Zone4,
    Zone5,
}

impl HeartRateZone {
    pub const CLASSIFIED: [HeartRateZone; 5] = [
        HeartRateZone::Zone1,
        HeartRateZone::Zone2,
        HeartRateZone::Zone3,
        HeartRateZone::Zone4,
        HeartRateZone::Zone5,
    ];

    pub fn number(self) -> u8 {
        match self {
            HeartRateZone::None => 0,
            HeartRateZone::Zone1 => 1,
            HeartRateZone::Zone2 => 2,
            HeartRateZone::Zone3 => 3,
            HeartRateZone::Zone4 => 4,
            HeartRateZone::Zone5 => 5,
        }
    }
}

impl From<HeartRateZone> for u8 {
    fn from(zone: HeartRateZone) -> Self {
        zone.number()
    }
}

/// Upper edge of a zone band
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpperBound {
    /// Fraction of max heart rate
    Fraction(f64),
    /// Absolute bpm above max heart rate
    AboveMax(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ZoneBand {
    /// Fraction of max heart rate, inclusive
    pub lower: f64,
    pub upper: UpperBound,
}

impl ZoneBand {
    fn contains(&self, bpm: f64, max_hr: f64) -> bool {
        let upper = match self.upper {
            UpperBound::Fraction(f) => f * max_hr,
            UpperBound::AboveMax(offset) => max_hr + offset,
        };
        bpm >= self.lower * max_hr && bpm <= upper
    }
}

/// Zone 1..5 bands, evaluated in ascending order
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HeartRateZones {
    pub bands: [ZoneBand; 5],
}

impl Default for HeartRateZones {
    fn default() -> Self {
        let band = |lower, upper| ZoneBand {
            lower,
            upper: UpperBound::Fraction(upper),
        };
        Self {
            bands: [
                band(0.50, 0.59),
                band(0.60, 0.69),
                band(0.70, 0.79),
                band(0.80, 0.89),
                ZoneBand {
                    lower: 0.90,
                    upper: UpperBound::AboveMax(15.0),
                },
            ],
        }
    }
}

impl HeartRateZones {
    pub fn max_heart_rate(age: u32) -> f64 {
        220.0 - f64::from(age)
    }

    pub fn classify(&self, bpm: f64, age: u32) -> HeartRateZone {
        let max_hr = Self::max_heart_rate(age);
        self.bands
            .iter()
            .zip(HeartRateZone::CLASSIFIED)
            .find(|(band, _)| band.contains(bpm, max_hr))
            .map(|(_, zone)| zone)
            .unwrap_or(HeartRateZone::None)
    }
}
