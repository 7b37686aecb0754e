//! Inbound segmentation request.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Default segment duration when the caller does not specify one.
pub const DEFAULT_SEGMENT_DURATION_SECS: u32 = 120;

/// Unique identifier for one in-flight segmentation request.
///
/// Used to name the request's scratch directory so concurrent requests
/// never share input/output paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub String);

impl RequestId {
    /// Generate a new random request ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to split a stored video into fixed-duration segments.
///
/// Immutable for the request's lifetime. `bucket`/`path` name the source
/// object; segments are published back to the same bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentRequest {
    /// Storage namespace holding the source video.
    pub bucket: String,
    /// Object key of the source video within the bucket.
    pub path: String,
    /// Segment duration in seconds.
    #[serde(
        rename = "segmentDuration",
        default = "default_segment_duration"
    )]
    pub segment_duration_secs: u32,
}

fn default_segment_duration() -> u32 {
    DEFAULT_SEGMENT_DURATION_SECS
}

impl SegmentRequest {
    /// Check the request for missing or out-of-range parameters.
    ///
    /// Returns a human-readable description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("'bucket' is required".to_string());
        }
        if self.path.trim().is_empty() {
            return Err("'path' is required".to_string());
        }
        if self.segment_duration_secs == 0 {
            return Err("'segmentDuration' must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_applied() {
        let req: SegmentRequest =
            serde_json::from_str(r#"{"bucket":"videos","path":"talk.webm"}"#).unwrap();
        assert_eq!(req.segment_duration_secs, DEFAULT_SEGMENT_DURATION_SECS);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_explicit_duration() {
        let req: SegmentRequest = serde_json::from_str(
            r#"{"bucket":"videos","path":"talk.webm","segmentDuration":30}"#,
        )
        .unwrap();
        assert_eq!(req.segment_duration_secs, 30);
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        let req = SegmentRequest {
            bucket: "".to_string(),
            path: "talk.webm".to_string(),
            segment_duration_secs: 120,
        };
        assert!(req.validate().unwrap_err().contains("bucket"));

        let req = SegmentRequest {
            bucket: "videos".to_string(),
            path: "  ".to_string(),
            segment_duration_secs: 120,
        };
        assert!(req.validate().unwrap_err().contains("path"));
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let req = SegmentRequest {
            bucket: "videos".to_string(),
            path: "talk.webm".to_string(),
            segment_duration_secs: 0,
        };
        assert!(req.validate().unwrap_err().contains("segmentDuration"));
    }

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }
}
