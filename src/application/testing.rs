// In-memory store used by application tests
use crate::application::error::RepositoryError;
use crate::application::wearables_repository::WearablesRepository;
use crate::domain::annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationType};
use crate::domain::sample::RawSeriesSet;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

#[derive(Default)]
pub struct InMemoryRepository {
    pub series: Mutex<RawSeriesSet>,
    pub annotations: Mutex<Vec<Annotation>>,
    next_id: AtomicUsize,
    pub fail_requests: AtomicBool,
    pub fail_listing: AtomicBool,
    pub list_calls: AtomicUsize,
    pub data_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn with_series(series: RawSeriesSet) -> Self {
        let repo = Self::default();
        *repo.series.lock().unwrap() = series;
        repo
    }

    pub fn fail(&self, on: bool) {
        self.fail_requests.store(on, Ordering::SeqCst);
    }

    /// Fail annotation listing only, leaving writes working
    pub fn fail_lists(&self, on: bool) {
        self.fail_listing.store(on, Ordering::SeqCst);
    }

    fn check(&self, endpoint: &str) -> Result<(), RepositoryError> {
        if self.fail_requests.load(Ordering::SeqCst) {
            return Err(RepositoryError::Status {
                endpoint: endpoint.to_string(),
                status: 500,
                body: "boom".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl WearablesRepository for InMemoryRepository {
    async fn fetch_all_data(&self, _username: &str) -> Result<RawSeriesSet, RepositoryError> {
        self.data_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/all-data")?;
        Ok(self.series.lock().unwrap().clone())
    }

    async fn list_annotations(
        &self,
        username: &str,
        kind: AnnotationType,
    ) -> Result<Vec<Annotation>, RepositoryError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check("/annotations")?;
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(RepositoryError::Transport {
                endpoint: "/annotations".into(),
                message: "down".into(),
            });
        }
        Ok(self
            .annotations
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.username == username && a.kind == kind)
            .cloned()
            .collect())
    }

    async fn create_annotation(&self, draft: &AnnotationDraft) -> Result<Annotation, RepositoryError> {
        self.check("/add-annotation")?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) as i64 + 1;
        let created = Annotation {
            id: AnnotationId::Number(id),
            username: draft.username.clone(),
            kind: draft.kind,
            label: draft.label.clone(),
            description: draft.description.clone(),
            start_time: draft.start_time,
            end_time: draft.end_time,
        };
        self.annotations.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_annotation(&self, annotation: &Annotation) -> Result<Annotation, RepositoryError> {
        self.check("/update-annotation")?;
        let mut stored = self.annotations.lock().unwrap();
        match stored.iter_mut().find(|a| a.id == annotation.id) {
            Some(slot) => {
                *slot = annotation.clone();
                Ok(annotation.clone())
            }
            None => Err(RepositoryError::Status {
                endpoint: "/update-annotation".into(),
                status: 404,
                body: String::new(),
            }),
        }
    }

    async fn delete_annotation(&self, id: &AnnotationId) -> Result<(), RepositoryError> {
        self.check("/delete-annotation")?;
        self.annotations.lock().unwrap().retain(|a| &a.id != id);
        Ok(())
    }
}
