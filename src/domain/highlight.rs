// Highlight state for the annotate chart
use crate::domain::annotation::{Annotation, AnnotationType, SelectionRange};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// What the single highlight rectangle currently represents
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HighlightState {
    #[default]
    Idle,
    Selecting(SelectionRange),
    Viewing(Annotation),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightKind {
    Selection,
    Event,
    Intervention,
}

/// Rectangle handed to the chart renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRect {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub kind: HighlightKind,
}

/// Owns the highlight state. Only one variant is live at a time, so a drag
/// selection and a viewed annotation can never both be drawn.
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    state: HighlightState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HighlightState {
        &self.state
    }

    /// A drag always wins, including over a viewed annotation.
    pub fn drag_select(&mut self, range: SelectionRange) {
        self.state = HighlightState::Selecting(range);
    }

    pub fn click_row(&mut self, annotation: Annotation) {
        self.state = HighlightState::Viewing(annotation);
    }

    /// Clicking outside the table only dismisses a viewed annotation.
    pub fn click_outside(&mut self) {
        if matches!(self.state, HighlightState::Viewing(_)) {
            self.state = HighlightState::Idle;
        }
    }

    /// Discard the pending selection, if any.
    pub fn cancel(&mut self) {
        if matches!(self.state, HighlightState::Selecting(_)) {
            self.state = HighlightState::Idle;
        }
    }

    pub fn pending_selection(&self) -> Option<&SelectionRange> {
        match &self.state {
            HighlightState::Selecting(range) => Some(range),
            _ => None,
        }
    }

    /// Called once the annotation for the pending selection was created and
    /// the store refetched. Returns false when nothing was pending.
    pub fn complete_submit(&mut self) -> bool {
        if matches!(self.state, HighlightState::Selecting(_)) {
            self.state = HighlightState::Idle;
            true
        } else {
            false
        }
    }

    /// After a refetch, point a viewed annotation at its fresh copy, or drop
    /// the highlight when it no longer exists.
    pub fn sync_viewed(&mut self, annotations: &[Annotation]) {
        if let HighlightState::Viewing(viewed) = &self.state {
            self.state = match annotations.iter().find(|a| a.id == viewed.id) {
                Some(fresh) => HighlightState::Viewing(fresh.clone()),
                None => HighlightState::Idle,
            };
        }
    }

    pub fn highlight(&self) -> Option<HighlightRect> {
        match &self.state {
            HighlightState::Idle => None,
            HighlightState::Selecting(range) => Some(HighlightRect {
                start_time: range.start_time,
                end_time: range.end_time,
                kind: HighlightKind::Selection,
            }),
            HighlightState::Viewing(a) => Some(HighlightRect {
                start_time: a.start_time,
                end_time: a.end_time,
                kind: match a.kind {
                    AnnotationType::Event => HighlightKind::Event,
                    AnnotationType::Intervention => HighlightKind::Intervention,
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::AnnotationId;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn event() -> Annotation {
        Annotation {
            id: AnnotationId::Number(1),
            username: "ana".into(),
            kind: AnnotationType::Event,
            label: "Party".into(),
            description: String::new(),
            start_time: at(20, 0),
            end_time: at(23, 0),
        }
    }

    #[test]
    fn test_idle_renders_nothing() {
        let controller = SelectionController::new();
        assert_eq!(controller.state(), &HighlightState::Idle);
        assert_eq!(controller.highlight(), None);
    }

    #[test]
    fn test_click_row_clears_pending_selection() {
        let mut controller = SelectionController::new();
        controller.drag_select(SelectionRange::new(at(9, 0), at(10, 0)));
        controller.click_row(event());

        assert_eq!(controller.pending_selection(), None);
        let rect = controller.highlight().unwrap();
        assert_eq!(rect.kind, HighlightKind::Event);
        assert_eq!(rect.start_time, at(20, 0));
    }

    #[test]
    fn test_drag_clears_viewed_annotation() {
        let mut controller = SelectionController::new();
        controller.click_row(event());
        controller.drag_select(SelectionRange::new(at(9, 0), at(10, 0)));

        assert!(matches!(controller.state(), HighlightState::Selecting(_)));
        assert_eq!(controller.highlight().unwrap().kind, HighlightKind::Selection);
    }

    #[test]
    fn test_click_outside_only_leaves_viewing() {
        let mut controller = SelectionController::new();
        controller.drag_select(SelectionRange::new(at(9, 0), at(10, 0)));
        controller.click_outside();
        assert!(controller.pending_selection().is_some());

        controller.click_row(event());
        controller.click_outside();
        assert_eq!(controller.state(), &HighlightState::Idle);
    }

    #[test]
    fn test_cancel_and_submit() {
        let mut controller = SelectionController::new();
        assert!(!controller.complete_submit());

        controller.drag_select(SelectionRange::new(at(9, 0), at(10, 0)));
        controller.cancel();
        assert_eq!(controller.state(), &HighlightState::Idle);

        controller.drag_select(SelectionRange::new(at(9, 0), at(10, 0)));
        assert!(controller.complete_submit());
        assert_eq!(controller.highlight(), None);

        controller.click_row(event());
        controller.cancel();
        assert!(matches!(controller.state(), HighlightState::Viewing(_)));
    }

    #[test]
    fn test_sync_viewed_follows_refetch() {
        let mut controller = SelectionController::new();
        controller.click_row(event());

        let mut renamed = event();
        renamed.label = "Wedding".into();
        controller.sync_viewed(&[renamed.clone()]);
        assert_eq!(controller.state(), &HighlightState::Viewing(renamed));

        controller.sync_viewed(&[]);
        assert_eq!(controller.state(), &HighlightState::Idle);

        let range = SelectionRange::new(at(9, 0), at(10, 0));
        controller.drag_select(range.clone());
        controller.sync_viewed(&[]);
        assert_eq!(controller.pending_selection(), Some(&range));
    }
}
