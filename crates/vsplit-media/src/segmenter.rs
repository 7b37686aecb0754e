//! FFmpeg process driver.

use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::command::{check_ffmpeg, SegmentCommand};
use crate::error::{MediaError, MediaResult};

/// Maximum bytes of process output retained per stream. FFmpeg can be very
/// chatty on malformed inputs; only the tail is useful for diagnostics.
const OUTPUT_CAPTURE_CAP: usize = 64 * 1024;

/// Runner for FFmpeg segment commands.
///
/// Stateless apart from its timeout; safe to share across concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct FfmpegSegmenter {
    /// Timeout in seconds
    timeout_secs: Option<u64>,
}

impl Default for FfmpegSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegSegmenter {
    /// Create a new segmenter with no timeout.
    pub fn new() -> Self {
        Self { timeout_secs: None }
    }

    /// Set a timeout for the whole invocation.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Run a segment command to completion.
    ///
    /// Captures both output streams (bounded), waits for the process to
    /// terminate, and maps a non-zero exit status to
    /// [`MediaError::FfmpegFailed`] carrying the captured stderr. A zero
    /// exit is success regardless of how many segments were produced; an
    /// all-silent or zero-duration input legitimately yields none.
    pub async fn run(&self, cmd: &SegmentCommand) -> MediaResult<()> {
        check_ffmpeg()?;

        let args = cmd.build_args();
        debug!("Running FFmpeg: ffmpeg {}", args.join(" "));

        let mut child = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // The child must not outlive a dropped request future.
            .kill_on_drop(true)
            .spawn()?;

        let stdout = child.stdout.take().expect("stdout not captured");
        let stderr = child.stderr.take().expect("stderr not captured");
        let stdout_task = tokio::spawn(capture_tail(stdout));
        let stderr_task = tokio::spawn(capture_tail(stderr));

        let wait_result = if let Some(timeout_secs) = self.timeout_secs {
            let timeout = tokio::time::timeout(
                std::time::Duration::from_secs(timeout_secs),
                child.wait(),
            );
            match timeout.await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        "FFmpeg timed out after {} seconds, killing process",
                        timeout_secs
                    );
                    let _ = child.kill().await;
                    let _ = stdout_task.await;
                    let _ = stderr_task.await;
                    return Err(MediaError::Timeout(timeout_secs));
                }
            }
        } else {
            child.wait().await
        };

        let stdout_text = stdout_task.await.unwrap_or_default();
        let stderr_text = stderr_task.await.unwrap_or_default();
        let status = wait_result?;

        if status.success() {
            if !stdout_text.trim().is_empty() {
                debug!("FFmpeg stdout: {}", stdout_text.trim());
            }
            Ok(())
        } else {
            Err(MediaError::ffmpeg_failed(
                format!(
                    "FFmpeg exited with status {}",
                    status.code().map_or("signal".to_string(), |c| c.to_string())
                ),
                Some(stderr_text),
                status.code(),
            ))
        }
    }
}

/// Drain a stream, keeping only the most recent [`OUTPUT_CAPTURE_CAP`]
/// bytes.
///
/// Reads fixed-size chunks so the bound holds even when the stream never
/// emits a newline (FFmpeg rewrites its progress line with `\r`).
async fn capture_tail<R: AsyncRead + Unpin>(mut reader: R) -> String {
    let mut chunk = vec![0u8; 8 * 1024];
    let mut tail: Vec<u8> = Vec::with_capacity(8 * 1024);

    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                tail.extend_from_slice(&chunk[..n]);
                if tail.len() > OUTPUT_CAPTURE_CAP {
                    let excess = tail.len() - OUTPUT_CAPTURE_CAP;
                    tail.drain(..excess);
                }
            }
        }
    }

    String::from_utf8_lossy(&tail).trim_end().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_capture_tail_keeps_short_output() {
        let text = capture_tail("line one\nline two\n".as_bytes()).await;
        assert_eq!(text, "line one\nline two");
    }

    #[tokio::test]
    async fn test_capture_tail_is_bounded() {
        let mut input = String::new();
        for i in 0..10_000 {
            input.push_str(&format!("diagnostic line number {}\n", i));
        }
        let text = capture_tail(input.as_bytes()).await;
        assert!(text.len() <= OUTPUT_CAPTURE_CAP);
        // Tail is kept, head is dropped.
        assert!(text.contains("diagnostic line number 9999"));
        assert!(!text.contains("diagnostic line number 0\n"));
    }

    #[tokio::test]
    async fn test_capture_tail_bounds_output_without_newlines() {
        // A carriage-return progress stream never yields a completed line.
        let input = "frame= 100 fps=25 \r".repeat(20_000);
        let text = capture_tail(input.as_bytes()).await;
        assert!(text.len() <= OUTPUT_CAPTURE_CAP);
        assert!(text.contains("fps=25"));
    }
}
