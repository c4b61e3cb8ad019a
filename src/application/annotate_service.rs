// Annotate service - selection, highlight and annotation edits for one user
use crate::application::charts::{ChartBuilder, StressChart};
use crate::application::error::PageError;
use crate::application::page_loader::PageLoader;
use crate::domain::annotation::{
    Annotation, AnnotationDraft, AnnotationId, AnnotationType, SelectionRange,
};
use crate::domain::highlight::{HighlightRect, SelectionController};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fields of the add-annotation form
#[derive(Debug, Clone, Deserialize)]
pub struct AnnotationForm {
    #[serde(rename = "type")]
    pub kind: AnnotationType,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnnotateView {
    pub stress: StressChart,
    pub annotations: Vec<Annotation>,
    pub highlight: Option<HighlightRect>,
    pub pending_selection: Option<SelectionRange>,
}

#[derive(Debug, Default)]
struct AnnotateWorkspace {
    stress: Option<StressChart>,
    annotations: Vec<Annotation>,
    selection: SelectionController,
}

impl AnnotateWorkspace {
    fn view(&self) -> AnnotateView {
        AnnotateView {
            stress: self
                .stress
                .clone()
                .unwrap_or(StressChart { points: Vec::new() }),
            annotations: self.annotations.clone(),
            highlight: self.selection.highlight(),
            pending_selection: self.selection.pending_selection().cloned(),
        }
    }

    fn replace_annotations(&mut self, annotations: Vec<Annotation>) {
        self.selection.sync_viewed(&annotations);
        self.annotations = annotations;
    }
}

type SharedWorkspace = Arc<Mutex<AnnotateWorkspace>>;

#[derive(Clone)]
pub struct AnnotateService {
    loader: PageLoader,
    charts: ChartBuilder,
    workspaces: Arc<Mutex<HashMap<String, SharedWorkspace>>>,
}

impl AnnotateService {
    pub fn new(loader: PageLoader, charts: ChartBuilder) -> Self {
        Self {
            loader,
            charts,
            workspaces: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    async fn workspace(&self, username: &str) -> Result<SharedWorkspace, PageError> {
        self.loader.ensure_uploaded(username).await?;
        let mut workspaces = self.workspaces.lock().await;
        Ok(workspaces.entry(username.to_string()).or_default().clone())
    }

    /// Full refetch of both annotation types after a mutation
    async fn refresh(&self, username: &str, workspace: &mut AnnotateWorkspace) -> Result<(), PageError> {
        let annotations = self
            .loader
            .store()
            .list_all(username)
            .await
            .inspect_err(|e| tracing::error!("Error refreshing annotations for {}: {}", username, e))?;
        workspace.replace_annotations(annotations);
        Ok(())
    }

    /// Page entry: fresh fetch, highlight back to idle. Whichever entry
    /// resolves last overwrites the workspace.
    pub async fn enter(&self, username: &str) -> Result<AnnotateView, PageError> {
        let data = self.loader.load(username).await?;
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        *workspace = AnnotateWorkspace {
            stress: Some(self.charts.stress_chart(&data.series)),
            annotations: data.annotations,
            selection: SelectionController::new(),
        };
        Ok(workspace.view())
    }

    pub async fn drag_select(&self, username: &str, range: SelectionRange) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        workspace.selection.drag_select(range);
        Ok(workspace.view())
    }

    pub async fn cancel_selection(&self, username: &str) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        workspace.selection.cancel();
        Ok(workspace.view())
    }

    pub async fn click_row(&self, username: &str, id: &AnnotationId) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        let annotation = workspace
            .annotations
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| PageError::UnknownAnnotation(id.clone()))?;
        workspace.selection.click_row(annotation);
        Ok(workspace.view())
    }

    pub async fn click_outside(&self, username: &str) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        workspace.selection.click_outside();
        Ok(workspace.view())
    }

    /// Drop the user's workspace so a new session never sees the previous
    /// session's annotations or highlight.
    pub async fn forget(&self, username: &str) {
        self.workspaces.lock().await.remove(username);
    }

    /// Create an annotation over the pending selection. A failed create keeps
    /// the selection pending so the form can be resubmitted. Once the create
    /// succeeds the selection is consumed even if the refetch fails.
    pub async fn submit(&self, username: &str, form: AnnotationForm) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        let range = workspace
            .selection
            .pending_selection()
            .cloned()
            .ok_or(PageError::NoPendingSelection)?;

        let draft = AnnotationDraft::new(
            username.to_string(),
            &range,
            form.kind,
            form.label,
            form.description,
        );
        self.loader
            .store()
            .create(&draft)
            .await
            .inspect_err(|e| tracing::error!("Failed to submit annotation for {}: {}", username, e))?;
        workspace.selection.complete_submit();

        self.refresh(username, &mut workspace).await?;
        Ok(workspace.view())
    }

    pub async fn update(&self, username: &str, annotation: Annotation) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        self.loader
            .store()
            .update(&annotation)
            .await
            .inspect_err(|e| tracing::error!("Failed to update annotation {}: {}", annotation.id, e))?;
        self.refresh(username, &mut workspace).await?;
        Ok(workspace.view())
    }

    /// Delete by the id as it appears in a URL path. The id is matched against
    /// the listed annotations first so text ids such as "007" keep their shape.
    pub async fn delete(&self, username: &str, raw_id: &str) -> Result<AnnotateView, PageError> {
        let shared = self.workspace(username).await?;
        let mut workspace = shared.lock().await;
        let id = workspace
            .annotations
            .iter()
            .map(|a| &a.id)
            .find(|id| id.to_string() == raw_id)
            .cloned()
            .unwrap_or_else(|| AnnotationId::from(raw_id));
        self.loader
            .store()
            .delete(&id)
            .await
            .inspect_err(|e| tracing::error!("Failed to delete annotation {}: {}", id, e))?;
        self.refresh(username, &mut workspace).await?;
        Ok(workspace.view())
    }
}
