//! End-to-end request orchestration.

use std::sync::Arc;

use tokio::fs;
use tracing::{info, instrument};

use vsplit_models::{RequestId, SegmentRequest, SegmentationResult};

use crate::discover::publish_segments;
use crate::error::{PipelineError, PipelineResult};
use crate::traits::{ObjectStore, Segmenter};
use crate::workspace::{Workspace, WorkspaceManager};

/// Composes the store, the segmenter, and the workspace arena into the
/// full request flow.
///
/// Stages run strictly in order: validate, download, write local, segment,
/// discover/publish. Whatever stage fails, the workspace is released
/// exactly once before the result is returned.
pub struct SegmentPipeline<S, R> {
    store: Arc<S>,
    segmenter: Arc<R>,
    workspaces: Arc<WorkspaceManager>,
}

impl<S, R> SegmentPipeline<S, R>
where
    S: ObjectStore,
    R: Segmenter,
{
    /// Create a pipeline over shared collaborators.
    pub fn new(store: Arc<S>, segmenter: Arc<R>, workspaces: Arc<WorkspaceManager>) -> Self {
        Self {
            store,
            segmenter,
            workspaces,
        }
    }

    /// Run a segmentation request end to end.
    ///
    /// Validation failures return before any filesystem or store access.
    #[instrument(skip(self, request), fields(bucket = %request.bucket, key = %request.path))]
    pub async fn run(&self, request: &SegmentRequest) -> PipelineResult<SegmentationResult> {
        request
            .validate()
            .map_err(PipelineError::InvalidRequest)?;

        let request_id = RequestId::new();
        let workspace = self.workspaces.acquire(&request_id).await?;

        let result = self.run_in_workspace(&workspace, request).await;

        // Scoped acquisition: released on success and on every failure
        // stage alike. If this future is dropped before reaching here,
        // the workspace's drop handler schedules the removal instead.
        self.workspaces.release(workspace).await;

        result
    }

    async fn run_in_workspace(
        &self,
        workspace: &Workspace,
        request: &SegmentRequest,
    ) -> PipelineResult<SegmentationResult> {
        let bytes = self
            .store
            .download(&request.bucket, &request.path)
            .await
            .map_err(PipelineError::Download)?;

        info!(
            "Downloaded source {}/{} ({} bytes)",
            request.bucket,
            request.path,
            bytes.len()
        );

        let input_path = workspace.input_path();
        fs::write(&input_path, &bytes).await?;
        drop(bytes);

        self.segmenter
            .segment(
                &input_path,
                &workspace.output_pattern(),
                request.segment_duration_secs,
            )
            .await
            .map_err(PipelineError::Segmentation)?;

        let segments =
            publish_segments(self.store.as_ref(), workspace, &request.bucket, &request.path)
                .await?;

        Ok(SegmentationResult { segments })
    }
}
