// HTTP response utilities for JSON view models and page errors
use crate::application::error::PageError;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};
use serde::Serialize;

/// Body sent for anything that is not a ready view model
#[derive(Debug, Serialize)]
pub struct Notice {
    pub status: &'static str,
    pub message: &'static str,
}

/// Serialize a view model to a JSON response with the given status
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response<Body> {
    let bytes = match serde_json::to_vec(data) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("JSON serialization error: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
        .header(header::CONTENT_LENGTH, bytes.len())
        .body(Body::from(bytes))
        .unwrap_or_else(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        })
}

impl PageError {
    fn status_and_notice(&self) -> (StatusCode, Notice) {
        match self {
            PageError::DataNotUploaded => (
                StatusCode::PRECONDITION_FAILED,
                Notice {
                    status: "not_uploaded",
                    message: "Please upload data before viewing this page.",
                },
            ),
            PageError::FetchFailure(_) => (
                StatusCode::BAD_GATEWAY,
                Notice {
                    status: "fetch_failed",
                    message: "Could not load your data. Please try again.",
                },
            ),
            // Not an error from the user's point of view
            PageError::EmptyDataset => (
                StatusCode::OK,
                Notice {
                    status: "no_data",
                    message: "No data found. Please upload data and refresh this page.",
                },
            ),
            PageError::UnknownAnnotation(_) => (
                StatusCode::NOT_FOUND,
                Notice {
                    status: "unknown_annotation",
                    message: "That annotation no longer exists.",
                },
            ),
            PageError::NoPendingSelection => (
                StatusCode::CONFLICT,
                Notice {
                    status: "no_selection",
                    message: "Select a time range on the chart first.",
                },
            ),
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> axum::response::Response {
        let (status, notice) = self.status_and_notice();
        json_response(status, &notice)
    }
}
