//! Segmentation orchestration pipeline.
//!
//! This crate composes the object store and the FFmpeg driver into the
//! end-to-end request flow: acquire a per-request workspace, download the
//! source, segment it, discover and publish the produced files in index
//! order, and release the workspace on every exit path.
//!
//! The store and the segmenter sit behind capability traits so the
//! discovery/publish logic is testable without a real backend or a real
//! FFmpeg binary.

pub mod discover;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod traits;
pub mod workspace;

pub use discover::{publish_segments, SegmentCandidate, SegmentProbe};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::SegmentPipeline;
pub use retry::{retry_async, RetryConfig};
pub use traits::{ObjectStore, Segmenter};
pub use workspace::{Workspace, WorkspaceManager};
