// HTTP repository implementation for the external wearables service
use crate::application::error::RepositoryError;
use crate::application::wearables_repository::WearablesRepository;
use crate::domain::annotation::{Annotation, AnnotationDraft, AnnotationId, AnnotationType};
use crate::domain::sample::RawSeriesSet;
use crate::infrastructure::wire::series_from_payload;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Replace `${name}` placeholders in a path template with URL-encoded values
pub fn prepare_path(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

/// No request timeout is set: a hung request leaves the page loading.
#[derive(Debug, Clone)]
pub struct HttpWearablesRepository {
    base_url: String,
    client: reqwest::Client,
}

impl HttpWearablesRepository {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<reqwest::Response, RepositoryError> {
        let response = request
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| RepositoryError::Transport {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Status {
                endpoint: endpoint.to_string(),
                status,
                body,
            });
        }

        Ok(response)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, RepositoryError> {
        self.send(request, endpoint)
            .await?
            .json::<T>()
            .await
            .map_err(|e| RepositoryError::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl WearablesRepository for HttpWearablesRepository {
    async fn fetch_all_data(&self, username: &str) -> Result<RawSeriesSet, RepositoryError> {
        let vars = HashMap::from([("username", username.to_string())]);
        let path = prepare_path("/all-data/${username}", &vars);

        tracing::debug!("Fetching all series for {}", username);
        let payload: serde_json::Map<String, serde_json::Value> =
            self.execute(self.client.get(self.url(&path)), &path).await?;
        Ok(series_from_payload(&payload))
    }

    async fn list_annotations(
        &self,
        username: &str,
        kind: AnnotationType,
    ) -> Result<Vec<Annotation>, RepositoryError> {
        let vars = HashMap::from([
            ("username", username.to_string()),
            ("type", kind.as_str().to_string()),
        ]);
        let path = prepare_path("/annotations/${username}/${type}", &vars);
        self.execute(self.client.get(self.url(&path)), &path).await
    }

    async fn create_annotation(&self, draft: &AnnotationDraft) -> Result<Annotation, RepositoryError> {
        let path = "/add-annotation";
        self.execute(self.client.post(self.url(path)).json(draft), path)
            .await
    }

    async fn update_annotation(&self, annotation: &Annotation) -> Result<Annotation, RepositoryError> {
        let path = "/update-annotation";
        self.execute(self.client.put(self.url(path)).json(annotation), path)
            .await
    }

    async fn delete_annotation(&self, id: &AnnotationId) -> Result<(), RepositoryError> {
        let vars = HashMap::from([("id", id.to_string())]);
        let path = prepare_path("/delete-annotation/${id}", &vars);
        self.send(self.client.delete(self.url(&path)), &path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::SelectionRange;
    use crate::domain::sample::SeriesKind;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{delete, get, post, put};
    use axum::{Json, Router};
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    type Store = Arc<Mutex<Vec<Annotation>>>;

    async fn all_data(Path(username): Path<String>) -> Result<Json<Value>, StatusCode> {
        if username != "ana smith" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "stress": [
                { "timestamp_cleaned": "2024-01-01T00:05:00Z", "stressLevel": 60 },
                { "timestamp_cleaned": "2024-01-01T00:00:00Z", "stressLevel": 10 }
            ],
            "respiration": []
        })))
    }

    async fn list(
        State(store): State<Store>,
        Path((username, kind)): Path<(String, String)>,
    ) -> Json<Vec<Annotation>> {
        let store = store.lock().unwrap();
        Json(
            store
                .iter()
                .filter(|a| a.username == username && a.kind.as_str() == kind)
                .cloned()
                .collect(),
        )
    }

    async fn add(State(store): State<Store>, Json(body): Json<Value>) -> Json<Annotation> {
        let mut store = store.lock().unwrap();
        let mut body = body;
        body["id"] = json!(store.len() + 1);
        let created: Annotation = serde_json::from_value(body).unwrap();
        store.push(created.clone());
        Json(created)
    }

    async fn update(State(store): State<Store>, Json(body): Json<Annotation>) -> Json<Annotation> {
        let mut store = store.lock().unwrap();
        if let Some(slot) = store.iter_mut().find(|a| a.id == body.id) {
            *slot = body.clone();
        }
        Json(body)
    }

    async fn remove(State(store): State<Store>, Path(id): Path<String>) -> StatusCode {
        let mut store = store.lock().unwrap();
        let before = store.len();
        store.retain(|a| a.id.to_string() != id);
        if store.len() < before {
            StatusCode::OK
        } else {
            StatusCode::NOT_FOUND
        }
    }

    async fn spawn_fake_service() -> HttpWearablesRepository {
        let store: Store = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new()
            .route("/all-data/:username", get(all_data))
            .route("/annotations/:username/:kind", get(list))
            .route("/add-annotation", post(add))
            .route("/update-annotation", put(update))
            .route("/delete-annotation/:id", delete(remove))
            .with_state(store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        HttpWearablesRepository::new(format!("http://{}/", addr))
    }

    fn draft(kind: AnnotationType) -> AnnotationDraft {
        let range = SelectionRange::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 30, 0).unwrap(),
        );
        AnnotationDraft::new("ana smith".into(), &range, kind, "Exam".into(), "Hard one".into())
    }

    #[test]
    fn test_prepare_path() {
        let vars = HashMap::from([
            ("username", "ana smith".to_string()),
            ("type", "event".to_string()),
        ]);
        let result = prepare_path("/annotations/${username}/${type}", &vars);
        assert_eq!(result, "/annotations/ana%20smith/event");
    }

    #[tokio::test]
    async fn test_fetch_all_data() {
        let repo = spawn_fake_service().await;

        let set = repo.fetch_all_data("ana smith").await.unwrap();
        assert_eq!(set.records(SeriesKind::Stress).len(), 2);
        assert!(set.records(SeriesKind::Respiration).is_empty());

        let err = repo.fetch_all_data("nobody").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_annotation_round_trip() {
        let repo = spawn_fake_service().await;

        let created = repo.create_annotation(&draft(AnnotationType::Event)).await.unwrap();
        assert_eq!(created.id, AnnotationId::Number(1));

        let events = repo
            .list_annotations("ana smith", AnnotationType::Event)
            .await
            .unwrap();
        assert_eq!(events, vec![created.clone()]);
        assert_eq!(events[0].start_time, draft(AnnotationType::Event).start_time);
        assert!(repo
            .list_annotations("ana smith", AnnotationType::Intervention)
            .await
            .unwrap()
            .is_empty());

        let mut edited = created.clone();
        edited.description = "Easier than expected".into();
        let updated = repo.update_annotation(&edited).await.unwrap();
        assert_eq!(updated.description, "Easier than expected");

        repo.delete_annotation(&created.id).await.unwrap();
        assert!(repo
            .list_annotations("ana smith", AnnotationType::Event)
            .await
            .unwrap()
            .is_empty());
        assert!(repo.delete_annotation(&created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let repo = HttpWearablesRepository::new("http://127.0.0.1:1".into());
        let err = repo.fetch_all_data("ana").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Transport { .. }));
    }
}
