// Page entry - session gate plus the concurrent page-entry fetches
use crate::application::annotation_store::AnnotationStore;
use crate::application::error::PageError;
use crate::application::session::SessionRegistry;
use crate::application::wearables_repository::WearablesRepository;
use crate::domain::annotation::{Annotation, AnnotationType};
use crate::domain::sample::RawSeriesSet;
use std::sync::Arc;

/// Everything a page needs, fetched fresh on every entry
#[derive(Debug, Clone)]
pub struct PageData {
    pub series: RawSeriesSet,
    pub annotations: Vec<Annotation>,
}

#[derive(Clone)]
pub struct PageLoader {
    repository: Arc<dyn WearablesRepository>,
    store: AnnotationStore,
    sessions: Arc<SessionRegistry>,
}

impl PageLoader {
    pub fn new(repository: Arc<dyn WearablesRepository>, sessions: Arc<SessionRegistry>) -> Self {
        Self {
            store: AnnotationStore::new(repository.clone()),
            repository,
            sessions,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub async fn ensure_uploaded(&self, username: &str) -> Result<(), PageError> {
        if self.sessions.is_data_uploaded(username).await {
            Ok(())
        } else {
            Err(PageError::DataNotUploaded)
        }
    }

    /// Series plus both annotation types, all three requests in flight at
    /// once. The page is ready only when every one has resolved.
    pub async fn load(&self, username: &str) -> Result<PageData, PageError> {
        self.ensure_uploaded(username).await?;

        let (series, mut annotations, interventions) = futures::try_join!(
            self.repository.fetch_all_data(username),
            self.store.list(username, AnnotationType::Event),
            self.store.list(username, AnnotationType::Intervention),
        )
        .inspect_err(|e| tracing::error!("Error loading page data for {}: {}", username, e))?;

        annotations.extend(interventions);
        Ok(PageData {
            series,
            annotations,
        })
    }

    pub async fn load_series(&self, username: &str) -> Result<RawSeriesSet, PageError> {
        self.ensure_uploaded(username).await?;

        let series = self
            .repository
            .fetch_all_data(username)
            .await
            .inspect_err(|e| tracing::error!("Error fetching series for {}: {}", username, e))?;
        Ok(series)
    }
}
