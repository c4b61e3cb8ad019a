// Repository trait for the external wearables store
use crate::application::error::RepositoryError;
use crate::domain::annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationType};
use crate::domain::sample::RawSeriesSet;
use async_trait::async_trait;

#[async_trait]
pub trait WearablesRepository: Send + Sync {
    /// Every raw series exported for a user (`GET /all-data/{username}`)
    async fn fetch_all_data(&self, username: &str) -> Result<RawSeriesSet, RepositoryError>;

    /// Annotations of one type for a user; the store is partitioned by type
    async fn list_annotations(
        &self,
        username: &str,
        kind: AnnotationType,
    ) -> Result<Vec<Annotation>, RepositoryError>;

    async fn create_annotation(&self, draft: &AnnotationDraft) -> Result<Annotation, RepositoryError>;

    /// Replace the stored annotation with the same id
    async fn update_annotation(&self, annotation: &Annotation) -> Result<Annotation, RepositoryError>;

    async fn delete_annotation(&self, id: &AnnotationId) -> Result<(), RepositoryError>;
}
