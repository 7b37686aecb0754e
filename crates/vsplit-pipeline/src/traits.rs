//! Capability traits at the pipeline's effect boundaries.
//!
//! The object store and the segmenter process are the two external effects
//! the pipeline drives. Both are injectable so tests can substitute a fake
//! store and a fake driver that deposits fixture files.

use std::path::Path;

use async_trait::async_trait;

use vsplit_media::{FfmpegSegmenter, MediaResult, SegmentCommand};
use vsplit_storage::{S3Client, StorageResult};

/// Download/upload capability against an object storage namespace.
///
/// Implementations must be stateless and safe to share across concurrent
/// requests. `upload` must have upsert semantics: writing the same key
/// twice overwrites rather than failing or versioning.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download an object as bytes. Fails with a `NotFound`-kinded error
    /// if the key does not exist.
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>>;

    /// Upload bytes, overwriting any existing object at the key.
    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()>;
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn download(&self, bucket: &str, key: &str) -> StorageResult<Vec<u8>> {
        self.download_bytes(bucket, key).await
    }

    async fn upload(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<()> {
        self.upload_bytes(bucket, key, data, content_type).await
    }
}

/// The external segmentation process.
///
/// A successful return means the tool exited zero; it says nothing about
/// how many output files exist. Discovery decides that afterwards.
#[async_trait]
pub trait Segmenter: Send + Sync {
    async fn segment(
        &self,
        input: &Path,
        output_pattern: &Path,
        segment_duration_secs: u32,
    ) -> MediaResult<()>;
}

#[async_trait]
impl Segmenter for FfmpegSegmenter {
    async fn segment(
        &self,
        input: &Path,
        output_pattern: &Path,
        segment_duration_secs: u32,
    ) -> MediaResult<()> {
        let cmd = SegmentCommand::new(input, output_pattern).segment_time(segment_duration_secs);
        self.run(&cmd).await
    }
}
