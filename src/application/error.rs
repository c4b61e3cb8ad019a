// Error taxonomy for store access and page loading
use crate::domain::annotation::AnnotationId;
use thiserror::Error;

/// Failure talking to the external wearables store
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },

    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Errors local to one page. None of them are fatal: navigating to the page
/// again re-issues every fetch from scratch.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("no data has been uploaded in this session")]
    DataNotUploaded,

    #[error("fetch failed: {0}")]
    FetchFailure(#[from] RepositoryError),

    #[error("the uploaded export contains no data")]
    EmptyDataset,

    #[error("no annotation with id {0}")]
    UnknownAnnotation(AnnotationId),

    #[error("no time range is selected")]
    NoPendingSelection,
}
