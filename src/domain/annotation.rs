// Annotation domain models
use crate::domain::time::instant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier. Opaque: kept in whatever JSON shape the store used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnnotationId {
    Number(i64),
    Text(String),
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationId::Number(n) => write!(f, "{n}"),
            AnnotationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AnnotationId {
    fn from(raw: &str) -> Self {
        raw.parse::<i64>()
            .map(AnnotationId::Number)
            .unwrap_or_else(|_| AnnotationId::Text(raw.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    /// Externally caused occurrence that may affect stress
    Event,
    /// Deliberate coping action taken by the user
    Intervention,
}

impl AnnotationType {
    pub const ALL: [AnnotationType; 2] = [AnnotationType::Event, AnnotationType::Intervention];

    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationType::Event => "event",
            AnnotationType::Intervention => "intervention",
        }
    }
}

/// Time interval on the user's stress chart, `start_time <= end_time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRange {
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
}

impl SelectionRange {
    /// Drag gestures can run right to left; endpoints are ordered here.
    pub fn new(a: DateTime<Utc>, b: DateTime<Utc>) -> Self {
        if a <= b {
            Self {
                start_time: a,
                end_time: b,
            }
        } else {
            Self {
                start_time: b,
                end_time: a,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub username: String,
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
}

impl Annotation {
    pub fn duration_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }

    pub fn range(&self) -> SelectionRange {
        SelectionRange {
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Body of `POST /add-annotation`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationDraft {
    pub username: String,
    #[serde(with = "instant")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "instant")]
    pub end_time: DateTime<Utc>,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub description: String,
}

impl AnnotationDraft {
    pub fn new(
        username: String,
        range: &SelectionRange,
        kind: AnnotationType,
        label: String,
        description: String,
    ) -> Self {
        Self {
            username,
            start_time: range.start_time,
            end_time: range.end_time,
            label,
            kind,
            description,
        }
    }
}
