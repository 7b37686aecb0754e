//! Application state.

use std::sync::Arc;

use tracing::warn;

use vsplit_media::FfmpegSegmenter;
use vsplit_pipeline::{SegmentPipeline, WorkspaceManager};
use vsplit_storage::S3Client;

use crate::config::ApiConfig;

/// The concrete pipeline the service runs.
pub type ServicePipeline = SegmentPipeline<S3Client, FfmpegSegmenter>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    /// `None` when the storage backend is unconfigured; the service still
    /// serves `/health`, and `/segment` fails with a configuration error.
    pub pipeline: Option<Arc<ServicePipeline>>,
    pub workspaces: Arc<WorkspaceManager>,
}

impl AppState {
    /// Create application state; storage configuration is resolved from
    /// the environment.
    pub fn new(config: ApiConfig) -> Self {
        let workspaces = Arc::new(WorkspaceManager::new(&config.work_dir));

        let pipeline = match S3Client::from_env() {
            Ok(client) => {
                let segmenter = Arc::new(
                    FfmpegSegmenter::new().with_timeout(config.segment_timeout.as_secs()),
                );
                Some(Arc::new(SegmentPipeline::new(
                    Arc::new(client),
                    segmenter,
                    Arc::clone(&workspaces),
                )))
            }
            Err(e) => {
                warn!("Storage backend not configured, /segment will fail: {}", e);
                None
            }
        };

        Self {
            config,
            pipeline,
            workspaces,
        }
    }
}
