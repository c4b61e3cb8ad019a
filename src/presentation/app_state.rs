// Application state for HTTP handlers
use crate::application::annotate_service::AnnotateService;
use crate::application::overlay_service::OverlayService;
use crate::application::session::SessionRegistry;
use crate::application::summary_service::SummaryService;
use crate::application::visualize_service::VisualizeService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub visualize_service: VisualizeService,
    pub summary_service: SummaryService,
    pub overlay_service: OverlayService,
    pub annotate_service: AnnotateService,
}
