//! Segmentation handler.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::info;

use vsplit_models::{SegmentRequest, SegmentationResult, DEFAULT_SEGMENT_DURATION_SECS};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Inbound body for `POST /segment`.
///
/// All fields are optional at the wire level so that a missing `bucket`
/// or `path` surfaces as a 400 with a named-parameter message rather than
/// a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SegmentBody {
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "segmentDuration")]
    pub segment_duration: Option<u32>,
}

impl SegmentBody {
    fn into_request(self) -> SegmentRequest {
        SegmentRequest {
            bucket: self.bucket.unwrap_or_default(),
            path: self.path.unwrap_or_default(),
            segment_duration_secs: self
                .segment_duration
                .unwrap_or(DEFAULT_SEGMENT_DURATION_SECS),
        }
    }
}

/// Split a stored video into fixed-duration segments and publish them
/// back to the source bucket.
pub async fn segment_video(
    State(state): State<AppState>,
    Json(body): Json<SegmentBody>,
) -> ApiResult<Json<SegmentationResult>> {
    let request = body.into_request();
    request.validate().map_err(ApiError::BadRequest)?;

    let pipeline = state
        .pipeline
        .as_ref()
        .ok_or_else(|| ApiError::config("storage backend not configured"))?;

    info!(
        "Segmentation request: bucket={}, path={}, duration={}s",
        request.bucket, request.path, request.segment_duration_secs
    );

    let result = pipeline.run(&request).await?;

    info!(
        "Segmentation complete: {} segments for {}/{}",
        result.len(),
        request.bucket,
        request.path
    );

    Ok(Json(result))
}
