//! FFmpeg segment-mode command builder.

use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};

/// Builder for an FFmpeg invocation targeting the segment muxer.
///
/// The encode target is fixed to VP8 video and Opus audio in WebM, a
/// container/codec pair that supports clean time-based segmentation. All
/// input streams are passed through (`-map 0`), and output files are
/// written as a sequentially numbered pattern (`segment_%d.webm`).
#[derive(Debug, Clone)]
pub struct SegmentCommand {
    /// Input file path
    input: PathBuf,
    /// Numbered output pattern
    output_pattern: PathBuf,
    /// Segment duration in seconds
    segment_time_secs: u32,
    /// Audio bitrate
    audio_bitrate: String,
    /// Log level
    log_level: String,
}

impl SegmentCommand {
    /// Create a new segment command.
    pub fn new(input: impl AsRef<Path>, output_pattern: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output_pattern: output_pattern.as_ref().to_path_buf(),
            segment_time_secs: 120,
            audio_bitrate: "128k".to_string(),
            log_level: "error".to_string(),
        }
    }

    /// Set the segment duration in seconds.
    pub fn segment_time(mut self, secs: u32) -> Self {
        self.segment_time_secs = secs;
        self
    }

    /// Set the audio bitrate (default "128k").
    pub fn audio_bitrate(mut self, bitrate: impl Into<String>) -> Self {
        self.audio_bitrate = bitrate.into();
        self
    }

    /// Set the FFmpeg log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-v".to_string(),
            self.log_level.clone(),
            "-i".to_string(),
            self.input.to_string_lossy().to_string(),
            "-c:v".to_string(),
            "libvpx".to_string(),
            "-c:a".to_string(),
            "libopus".to_string(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
            "-map".to_string(),
            "0".to_string(),
            "-f".to_string(),
            "segment".to_string(),
            "-segment_time".to_string(),
            self.segment_time_secs.to_string(),
            self.output_pattern.to_string_lossy().to_string(),
        ]
    }
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> MediaResult<PathBuf> {
    which::which("ffmpeg").map_err(|_| MediaError::FfmpegNotFound)
}
