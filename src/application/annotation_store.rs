// Annotation store - typed access to the user's saved intervals
//
// Nothing is cached here. After any mutation callers re-list both types to
// get a consistent view; there is no incremental merge.
use crate::application::error::RepositoryError;
use crate::application::wearables_repository::WearablesRepository;
use crate::domain::annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationType};
use std::sync::Arc;

#[derive(Clone)]
pub struct AnnotationStore {
    repository: Arc<dyn WearablesRepository>,
}

impl AnnotationStore {
    pub fn new(repository: Arc<dyn WearablesRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(
        &self,
        username: &str,
        kind: AnnotationType,
    ) -> Result<Vec<Annotation>, RepositoryError> {
        self.repository.list_annotations(username, kind).await
    }

    /// Both types fetched concurrently, events first then interventions
    pub async fn list_all(&self, username: &str) -> Result<Vec<Annotation>, RepositoryError> {
        let (mut events, interventions) = futures::try_join!(
            self.list(username, AnnotationType::Event),
            self.list(username, AnnotationType::Intervention),
        )?;
        events.extend(interventions);
        Ok(events)
    }

    /// `start_time <= end_time` is the caller's responsibility; an inverted
    /// draft is passed through unchanged.
    pub async fn create(&self, draft: &AnnotationDraft) -> Result<Annotation, RepositoryError> {
        let created = self.repository.create_annotation(draft).await?;
        tracing::info!(
            "Created {} annotation {} for {}",
            created.kind.as_str(),
            created.id,
            created.username
        );
        Ok(created)
    }

    pub async fn update(&self, annotation: &Annotation) -> Result<Annotation, RepositoryError> {
        self.repository.update_annotation(annotation).await
    }

    pub async fn delete(&self, id: &AnnotationId) -> Result<(), RepositoryError> {
        self.repository.delete_annotation(id).await?;
        tracing::info!("Deleted annotation {}", id);
        Ok(())
    }
}
