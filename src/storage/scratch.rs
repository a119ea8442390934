//! Transient storage for in-flight downloads.
//!
//! One shared scratch root, one subdirectory per request. Every request writes
//! only inside its own [`RequestScope`], so concurrent requests can't overwrite
//! or delete each other's files even when media titles collide.

use std::io;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::core::config;

/// Shared scratch root. The directory itself outlives every request.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scratch root from `DOWNLOAD_FOLDER`.
    pub fn from_config() -> Self {
        Self::new(config::DOWNLOAD_FOLDER.clone())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the root if it is missing. Safe to call any number of times.
    pub async fn ensure(&self) -> io::Result<()> {
        fs_err::tokio::create_dir_all(&self.root).await
    }

    /// Creates `<root>/<request_id>/` (and the root, lazily).
    pub async fn open_scope(&self, request_id: Uuid) -> io::Result<RequestScope> {
        self.ensure().await?;
        let dir = self.root.join(request_id.to_string());
        fs_err::tokio::create_dir_all(&dir).await?;
        log::debug!("Opened request scope {}", dir.display());
        Ok(RequestScope { request_id, dir })
    }
}

/// Per-request naming scope inside the scratch root.
#[derive(Debug, Clone)]
pub struct RequestScope {
    request_id: Uuid,
    dir: PathBuf,
}

impl RequestScope {
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where the archive for a multi-item result goes.
    pub fn archive_path(&self) -> PathBuf {
        self.dir.join(config::download::ARCHIVE_FILE_NAME)
    }

    /// Removes the scope directory with anything still inside it
    /// (partial downloads, fragments, thumbnails). Idempotent.
    pub async fn dispose(&self) -> bool {
        match fs_err::tokio::remove_dir_all(&self.dir).await {
            Ok(()) => true,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => {
                log::warn!("[{}] Failed to remove request scope: {}", self.request_id, e);
                false
            }
        }
    }
}

/// Removes a file if it exists.
///
/// Returns `true` when the path is gone afterwards, including when it never
/// existed. Other failures are logged and reported as `false`.
pub async fn remove_if_present(path: &Path) -> bool {
    match fs_err::tokio::remove_file(path).await {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            log::warn!("Failed to delete file: {}", e);
            false
        }
    }
}
