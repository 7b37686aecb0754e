//! Pipeline error types.

use thiserror::Error;
use vsplit_media::MediaError;
use vsplit_storage::StorageError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors produced while running a segmentation request.
///
/// Store and driver failures keep their kind and gain stage context, so a
/// caller can tell a failed download from a failed upload of segment N.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("download failed: {0}")]
    Download(#[source] StorageError),

    #[error("segmentation failed: {}", .0.diagnostic())]
    Segmentation(#[source] MediaError),

    #[error("segment {index} upload failed: {source}")]
    SegmentUpload {
        index: u64,
        #[source]
        source: StorageError,
    },

    #[error("workspace IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// True when the failure is the caller's fault rather than a backend
    /// or local fault.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest(_))
    }
}
