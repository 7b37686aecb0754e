//! Segmentation result.

use serde::{Deserialize, Serialize};

/// The durable outcome of a segmentation request: the storage keys of all
/// published segments, ordered by ascending segment index.
///
/// The ordering is load-bearing: downstream consumers reconstruct timeline
/// order from sequence order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SegmentationResult {
    /// Published segment keys in ascending index order.
    pub segments: Vec<String>,
}

impl SegmentationResult {
    /// Number of published segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the source produced no non-empty segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_segments_array() {
        let result = SegmentationResult {
            segments: vec!["a_segment_0.webm".into(), "a_segment_1.webm".into()],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"segments": ["a_segment_0.webm", "a_segment_1.webm"]})
        );
    }
}
