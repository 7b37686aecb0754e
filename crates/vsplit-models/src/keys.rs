//! Published-segment key convention.

/// File extension for produced segments. Fixed because the encode target
/// is always VP8/Opus in WebM.
pub const SEGMENT_EXTENSION: &str = "webm";

/// Content type used when publishing segments.
pub const SEGMENT_CONTENT_TYPE: &str = "video/webm";

/// Derive the storage key for a published segment.
///
/// The key is `<source key without extension>_segment_<index>.webm`, in the
/// same bucket as the source. The derivation is pure, so re-running a
/// request targets the same keys and overwrites them (upsert semantics).
///
/// Only the final path component is considered when stripping the
/// extension; a dot in a directory name is left alone.
pub fn derive_segment_key(source_key: &str, index: u64) -> String {
    let base = strip_extension(source_key);
    format!("{}_segment_{}.{}", base, index, SEGMENT_EXTENSION)
}

fn strip_extension(key: &str) -> &str {
    let file_start = key.rfind('/').map(|i| i + 1).unwrap_or(0);
    match key[file_start..].rfind('.') {
        // Leading dot in the filename is a hidden file, not an extension.
        Some(0) => key,
        Some(dot) => &key[..file_start + dot],
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_derivation() {
        assert_eq!(
            derive_segment_key("uploads/talk.webm", 0),
            "uploads/talk_segment_0.webm"
        );
        assert_eq!(
            derive_segment_key("uploads/talk.webm", 12),
            "uploads/talk_segment_12.webm"
        );
    }

    #[test]
    fn test_non_webm_source_extension_is_stripped() {
        assert_eq!(
            derive_segment_key("raw/lecture.mp4", 3),
            "raw/lecture_segment_3.webm"
        );
    }

    #[test]
    fn test_source_without_extension() {
        assert_eq!(derive_segment_key("raw/lecture", 1), "raw/lecture_segment_1.webm");
    }

    #[test]
    fn test_dot_in_directory_is_not_an_extension() {
        assert_eq!(
            derive_segment_key("v1.2/lecture", 0),
            "v1.2/lecture_segment_0.webm"
        );
    }

    #[test]
    fn test_hidden_file_keeps_name() {
        assert_eq!(derive_segment_key(".staging", 0), ".staging_segment_0.webm");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_segment_key("uploads/talk.webm", 5);
        let b = derive_segment_key("uploads/talk.webm", 5);
        assert_eq!(a, b);
    }
}
