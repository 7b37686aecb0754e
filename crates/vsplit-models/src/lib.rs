//! Shared data models for the vsplit segmentation service.
//!
//! This crate provides Serde-serializable types for:
//! - The inbound segmentation request and its validation
//! - The per-request identifier used to name workspaces
//! - The published-segment key convention

pub mod keys;
pub mod request;
pub mod result;

pub use keys::{derive_segment_key, SEGMENT_CONTENT_TYPE, SEGMENT_EXTENSION};
pub use request::{RequestId, SegmentRequest, DEFAULT_SEGMENT_DURATION_SECS};
pub use result::SegmentationResult;
