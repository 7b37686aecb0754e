//! Segment discovery and publish loop.
//!
//! Discovery walks the deterministic output naming sequence
//! (`segment_0.webm`, `segment_1.webm`, ...) by probing each index in turn
//! rather than listing the directory. The tool's naming is a known
//! sequence, and probing avoids depending on filesystem listing order.
//! Absence of the next index is the only termination signal; there is no
//! assumed maximum segment count.

use std::path::PathBuf;

use tokio::fs;
use tracing::{debug, info, warn};

use vsplit_models::{derive_segment_key, SEGMENT_CONTENT_TYPE};

use crate::error::{PipelineError, PipelineResult};
use crate::retry::{retry_async, RetryConfig};
use crate::traits::ObjectStore;
use crate::workspace::Workspace;

/// A locally produced segment file at a given index, not yet published.
#[derive(Debug, Clone)]
pub struct SegmentCandidate {
    /// Position in the output sequence.
    pub index: u64,
    /// Local file path.
    pub path: PathBuf,
    /// File size; zero-byte candidates are skipped, not published.
    pub size_bytes: u64,
}

impl SegmentCandidate {
    /// Whether this candidate carries any data worth publishing.
    pub fn is_empty(&self) -> bool {
        self.size_bytes == 0
    }
}

/// Lazy generator over the segment output sequence.
///
/// Each call to [`next`](Self::next) stats the file at the current index:
/// `Some` if it exists (empty or not), `None` at the first absent index.
/// The probe is restartable; a fresh probe over the same workspace walks
/// the same sequence.
#[derive(Debug)]
pub struct SegmentProbe<'a> {
    workspace: &'a Workspace,
    next_index: u64,
}

impl<'a> SegmentProbe<'a> {
    /// Start probing at index 0.
    pub fn new(workspace: &'a Workspace) -> Self {
        Self {
            workspace,
            next_index: 0,
        }
    }

    /// Probe the next index in the sequence.
    pub async fn next(&mut self) -> std::io::Result<Option<SegmentCandidate>> {
        let index = self.next_index;
        let path = self.workspace.segment_path(index);

        match fs::metadata(&path).await {
            Ok(metadata) => {
                self.next_index += 1;
                Ok(Some(SegmentCandidate {
                    index,
                    path,
                    size_bytes: metadata.len(),
                }))
            }
            // End of the sequence, not an error.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Discover produced segments and publish the non-empty ones in index
/// order.
///
/// Zero-byte files (a known artifact of trailing boundary segments) are
/// deleted and skipped; they do not break discovery of later indices. An
/// upload failure aborts the loop after bounded retries; segments already
/// published stay published, and a re-run overwrites the same keys.
pub async fn publish_segments<S>(
    store: &S,
    workspace: &Workspace,
    bucket: &str,
    source_key: &str,
) -> PipelineResult<Vec<String>>
where
    S: ObjectStore + ?Sized,
{
    let mut probe = SegmentProbe::new(workspace);
    let mut published = Vec::new();

    while let Some(candidate) = probe.next().await? {
        if candidate.is_empty() {
            debug!("Skipping empty segment {}", candidate.index);
            remove_local(&candidate.path).await;
            continue;
        }

        let bytes = fs::read(&candidate.path).await?;
        let key = derive_segment_key(source_key, candidate.index);

        debug!(
            "Uploading segment {} ({} bytes) to {}/{}",
            candidate.index, candidate.size_bytes, bucket, key
        );

        let retry = RetryConfig::new(format!("upload segment {}", candidate.index));
        retry_async(&retry, || {
            store.upload(bucket, &key, bytes.clone(), SEGMENT_CONTENT_TYPE)
        })
        .await
        .map_err(|source| PipelineError::SegmentUpload {
            index: candidate.index,
            source,
        })?;

        remove_local(&candidate.path).await;
        published.push(key);
    }

    info!(
        "Discovery complete: {} segments published to {}",
        published.len(),
        bucket
    );
    Ok(published)
}

/// Best-effort local delete; release sweeps the directory anyway.
async fn remove_local(path: &std::path::Path) {
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove local file {}: {}", path.display(), e);
    }
}
