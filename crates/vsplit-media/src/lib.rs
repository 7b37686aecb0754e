//! FFmpeg CLI wrapper for time-based video segmentation.
//!
//! This crate provides:
//! - Type-safe command building for FFmpeg's segment muxer
//! - Bounded capture of FFmpeg's output streams for diagnostics
//! - Timeout handling with forced process termination

pub mod command;
pub mod error;
pub mod segmenter;

pub use command::{check_ffmpeg, SegmentCommand};
pub use error::{MediaError, MediaResult};
pub use segmenter::FfmpegSegmenter;
