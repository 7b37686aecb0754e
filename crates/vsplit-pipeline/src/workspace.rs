//! Per-request scratch workspace management.
//!
//! Each in-flight request owns a unique subdirectory under the manager's
//! root, named by its request ID, so concurrent requests never collide on
//! input or output paths. Release is best-effort: a file that cannot be
//! deleted is logged and left for the stale sweep, never surfaced as the
//! request's error.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tokio::fs;
use tracing::{debug, warn};

use vsplit_models::RequestId;

/// Fixed input filename within a workspace. Unique per request because the
/// workspace directory itself is unique.
const INPUT_FILE: &str = "input.webm";

/// Owner of the scratch root; hands out per-request workspaces.
#[derive(Debug, Clone)]
pub struct WorkspaceManager {
    root: PathBuf,
}

impl WorkspaceManager {
    /// Create a manager rooted at `root`. The directory is created lazily
    /// on first acquire.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scratch root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the scratch directory for one request.
    pub async fn acquire(&self, id: &RequestId) -> std::io::Result<Workspace> {
        let dir = self.root.join(id.as_str());
        fs::create_dir_all(&dir).await?;
        debug!("Acquired workspace {}", dir.display());
        Ok(Workspace {
            dir,
            released: false,
        })
    }

    /// Delete a request's workspace and everything in it.
    ///
    /// Failures are logged and swallowed; a residual directory is
    /// reclaimed later by [`sweep_stale`](Self::sweep_stale).
    pub async fn release(&self, mut workspace: Workspace) {
        workspace.released = true;
        remove_workspace_dir(&workspace.dir).await;
    }

    /// Remove request directories older than `max_age`.
    ///
    /// Covers workspaces orphaned by crashes or failed releases. Returns
    /// the number of directories removed.
    pub async fn sweep_stale(&self, max_age: Duration) -> std::io::Result<usize> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let cutoff = SystemTime::now()
            .checked_sub(max_age)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        let mut removed = 0usize;

        while let Some(entry) = entries.next_entry().await? {
            let metadata = match entry.metadata().await {
                Ok(m) => m,
                Err(_) => continue,
            };
            if !metadata.is_dir() {
                continue;
            }
            let modified = match metadata.modified() {
                Ok(t) => t,
                Err(_) => continue,
            };
            if modified < cutoff {
                match fs::remove_dir_all(entry.path()).await {
                    Ok(()) => {
                        warn!("Swept stale workspace {}", entry.path().display());
                        removed += 1;
                    }
                    Err(e) => warn!(
                        "Failed to sweep stale workspace {}: {}",
                        entry.path().display(),
                        e
                    ),
                }
            }
        }

        Ok(removed)
    }
}

async fn remove_workspace_dir(dir: &Path) {
    match fs::remove_dir_all(dir).await {
        Ok(()) => debug!("Released workspace {}", dir.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to release workspace {}: {}", dir.display(), e),
    }
}

/// One request's scratch area: the downloaded input plus the numbered
/// segment files FFmpeg produces.
///
/// Dropping a workspace that was never released schedules its removal on
/// the runtime. This covers the cancellation path: when a request future
/// is dropped at a client disconnect, the scratch directory must not wait
/// for the stale sweep.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
    released: bool,
}

impl Workspace {
    /// Workspace directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the source video is written to.
    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_FILE)
    }

    /// FFmpeg output naming pattern (`segment_%d.webm`).
    pub fn output_pattern(&self) -> PathBuf {
        self.dir.join("segment_%d.webm")
    }

    /// Path of the segment file at a given index, per the output pattern.
    pub fn segment_path(&self, index: u64) -> PathBuf {
        self.dir.join(format!("segment_{}.webm", index))
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let dir = std::mem::take(&mut self.dir);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    remove_workspace_dir(&dir).await;
                });
            }
            // No runtime left (process teardown); the sweep or the next
            // start reclaims the directory.
            Err(_) => {
                let _ = std::fs::remove_dir_all(&dir);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_acquire_creates_unique_directories() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());

        let a = manager.acquire(&RequestId::new()).await.unwrap();
        let b = manager.acquire(&RequestId::new()).await.unwrap();

        assert!(a.dir().is_dir());
        assert!(b.dir().is_dir());
        assert_ne!(a.dir(), b.dir());
        assert_ne!(a.input_path(), b.input_path());
    }

    #[tokio::test]
    async fn test_release_removes_all_files() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());

        let ws = manager.acquire(&RequestId::new()).await.unwrap();
        let dir = ws.dir().to_path_buf();
        fs::write(ws.input_path(), b"input").await.unwrap();
        fs::write(ws.segment_path(0), b"seg").await.unwrap();

        manager.release(ws).await;
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_release_of_missing_workspace_is_silent() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());

        let ws = manager.acquire(&RequestId::new()).await.unwrap();
        fs::remove_dir_all(ws.dir()).await.unwrap();
        // Releasing an already-removed workspace must not panic or error.
        manager.release(ws).await;
    }

    #[tokio::test]
    async fn test_dropped_workspace_is_cleaned_up() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());

        let ws = manager.acquire(&RequestId::new()).await.unwrap();
        let dir = ws.dir().to_path_buf();
        fs::write(ws.input_path(), b"input").await.unwrap();

        drop(ws);

        // Removal is scheduled on the runtime; yield until it lands.
        for _ in 0..100 {
            if !dir.exists() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(!dir.exists(), "dropped workspace must be removed");
    }

    #[tokio::test]
    async fn test_segment_path_matches_output_pattern() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());
        let ws = manager.acquire(&RequestId::new()).await.unwrap();

        let pattern = ws.output_pattern().to_string_lossy().to_string();
        let expected = pattern.replace("%d", "7");
        assert_eq!(ws.segment_path(7).to_string_lossy(), expected);
    }

    #[tokio::test]
    async fn test_sweep_removes_only_stale_directories() {
        let root = TempDir::new().unwrap();
        let manager = WorkspaceManager::new(root.path());

        let stale = manager.acquire(&RequestId::new()).await.unwrap();
        let fresh = manager.acquire(&RequestId::new()).await.unwrap();
        let stale_dir = stale.dir().to_path_buf();
        let fresh_dir = fresh.dir().to_path_buf();

        // Everything is newer than a one-hour bound.
        let removed = manager.sweep_stale(Duration::from_secs(3600)).await.unwrap();
        assert_eq!(removed, 0);

        // A zero bound makes everything stale.
        let removed = manager.sweep_stale(Duration::ZERO).await.unwrap();
        assert_eq!(removed, 2);
        assert!(!stale_dir.exists());
        assert!(!fresh_dir.exists());

        manager.release(stale).await;
        manager.release(fresh).await;
    }

    #[tokio::test]
    async fn test_sweep_with_missing_root_is_noop() {
        let manager = WorkspaceManager::new("/nonexistent/vsplit-test-root");
        let removed = manager.sweep_stale(Duration::ZERO).await.unwrap();
        assert_eq!(removed, 0);
    }
}
