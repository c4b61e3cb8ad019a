// HTTP request handlers
use crate::application::annotate_service::AnnotationForm;
use crate::domain::annotation::{Annotation, AnnotationId, SelectionRange};
use crate::infrastructure::http_response::json_response;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RowClick {
    pub id: AnnotationId,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/sessions/:username", post(start_session).delete(end_session))
        .route("/sessions/:username/uploaded", post(mark_uploaded))
        .route("/users/:username/visualize", get(visualize))
        .route("/users/:username/summary", get(summary))
        .route("/users/:username/annotated", get(annotated))
        .route("/users/:username/annotate", get(enter_annotate))
        .route(
            "/users/:username/annotate/selection",
            post(drag_select).delete(cancel_selection),
        )
        .route("/users/:username/annotate/selection/submit", post(submit_selection))
        .route(
            "/users/:username/annotate/highlight",
            post(click_row).delete(click_outside),
        )
        .route("/users/:username/annotate/annotations", put(update_annotation))
        .route("/users/:username/annotate/annotations/:id", delete(delete_annotation))
        .with_state(state)
}

fn respond<T: serde::Serialize, E: IntoResponse>(result: Result<T, E>) -> Response {
    match result {
        Ok(view) => json_response(StatusCode::OK, &view),
        Err(e) => e.into_response(),
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// New session: the upload flag starts cleared
pub async fn start_session(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> StatusCode {
    state.sessions.start(&username).await;
    state.annotate_service.forget(&username).await;
    StatusCode::NO_CONTENT
}

pub async fn end_session(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> StatusCode {
    state.sessions.reset(&username).await;
    state.annotate_service.forget(&username).await;
    StatusCode::NO_CONTENT
}

/// Recorded once the export archive was accepted upstream
pub async fn mark_uploaded(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> StatusCode {
    state.sessions.mark_uploaded(&username).await;
    StatusCode::NO_CONTENT
}

pub async fn visualize(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.visualize_service.get_charts(&username).await)
}

pub async fn summary(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.summary_service.get_summary(&username).await)
}

pub async fn annotated(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.overlay_service.get_annotated(&username).await)
}

pub async fn enter_annotate(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.annotate_service.enter(&username).await)
}

pub async fn drag_select(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(range): Json<SelectionRange>,
) -> Response {
    // Drag direction is irrelevant; normalize the endpoints
    let range = SelectionRange::new(range.start_time, range.end_time);
    respond(state.annotate_service.drag_select(&username, range).await)
}

pub async fn cancel_selection(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.annotate_service.cancel_selection(&username).await)
}

pub async fn submit_selection(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(form): Json<AnnotationForm>,
) -> Response {
    respond(state.annotate_service.submit(&username, form).await)
}

pub async fn click_row(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(click): Json<RowClick>,
) -> Response {
    respond(state.annotate_service.click_row(&username, &click.id).await)
}

pub async fn click_outside(Path(username): Path<String>, State(state): State<Arc<AppState>>) -> Response {
    respond(state.annotate_service.click_outside(&username).await)
}

pub async fn update_annotation(
    Path(username): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(annotation): Json<Annotation>,
) -> Response {
    respond(state.annotate_service.update(&username, annotation).await)
}

pub async fn delete_annotation(
    Path((username, id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Response {
    respond(state.annotate_service.delete(&username, &id).await)
}
