// Overlay service - stress chart with every saved annotation laid over it
use crate::application::charts::{ChartBuilder, StressChart};
use crate::application::error::PageError;
use crate::application::page_loader::PageLoader;
use crate::domain::annotation::{Annotation, AnnotationId, AnnotationType};
use chrono::{DateTime, Utc};
use serde::Serialize;

const HOVER_LINE_WIDTH: usize = 40;

/// Greedy word wrap: a word moves to the next line once the current one would
/// exceed `max_len` characters.
pub fn wrap_text(text: &str, max_len: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_len {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    lines.push(current);
    lines
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationOverlay {
    pub id: AnnotationId,
    pub kind: AnnotationType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub label_lines: Vec<String>,
    pub description_lines: Vec<String>,
}

impl From<&Annotation> for AnnotationOverlay {
    fn from(a: &Annotation) -> Self {
        Self {
            id: a.id.clone(),
            kind: a.kind,
            start_time: a.start_time,
            end_time: a.end_time,
            label_lines: wrap_text(&a.label, HOVER_LINE_WIDTH),
            description_lines: wrap_text(&a.description, HOVER_LINE_WIDTH),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedView {
    pub stress: StressChart,
    pub overlays: Vec<AnnotationOverlay>,
}

#[derive(Clone)]
pub struct OverlayService {
    loader: PageLoader,
    charts: ChartBuilder,
}

impl OverlayService {
    pub fn new(loader: PageLoader, charts: ChartBuilder) -> Self {
        Self { loader, charts }
    }

    pub async fn get_annotated(&self, username: &str) -> Result<AnnotatedView, PageError> {
        let data = self.loader.load(username).await?;
        Ok(AnnotatedView {
            stress: self.charts.stress_chart(&data.series),
            overlays: data.annotations.iter().map(AnnotationOverlay::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_breaks_on_word_boundaries() {
        let text = "Went for a long walk around the lake with the dog after lunch";
        let lines = wrap_text(text, 20);
        assert_eq!(
            lines,
            vec!["Went for a long walk", "around the lake with", "the dog after lunch"]
        );
        assert!(lines.iter().all(|l| l.len() <= 20));
    }

    #[test]
    fn test_wrap_text_short_and_empty() {
        assert_eq!(wrap_text("Meditate", 40), vec!["Meditate"]);
        assert_eq!(wrap_text("", 40), vec![""]);
    }

    #[test]
    fn test_overlong_word_gets_its_own_line() {
        let lines = wrap_text("a supercalifragilistic b", 10);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }
}
