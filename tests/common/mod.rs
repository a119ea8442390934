//! Common test utilities
//!
//! Builds a coordinator over mocks with its scratch directory in a tempdir.

#![allow(dead_code)]

use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tubeparcel::download::RequestCoordinator;
use tubeparcel::storage::ScratchDir;

use crate::mocks::{MockFetcher, MockFetcherConfig, MockTransport};

pub const SHORT_URL: &str = "https://youtu.be/abc123";
pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
pub const PLAYLIST_URL: &str = "https://www.youtube.com/playlist?list=PL590L5WQmH8fJ54F369BLDSqIwcs-TCfs";

/// Coordinator plus handles on its mocks
pub struct TestEnvironment {
    pub coordinator: RequestCoordinator,
    pub fetcher: Arc<MockFetcher>,
    pub transport: Arc<MockTransport>,
    pub scratch_root: TempDir,
}

impl TestEnvironment {
    pub fn new(config: MockFetcherConfig) -> Self {
        Self::with_transport(config, MockTransport::new())
    }

    pub fn with_transport(config: MockFetcherConfig, transport: MockTransport) -> Self {
        let scratch_root = tempfile::tempdir().unwrap();
        let fetcher = Arc::new(MockFetcher::new(config));
        let transport = Arc::new(transport);
        let coordinator = RequestCoordinator::new(
            fetcher.clone(),
            transport.clone(),
            ScratchDir::new(scratch_root.path()),
        );
        Self {
            coordinator,
            fetcher,
            transport,
            scratch_root,
        }
    }

    /// Number of entries left in the scratch root
    pub fn leftovers(&self) -> usize {
        count_entries(self.scratch_root.path())
    }
}

pub fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// (name, contents) of each entry of a ZIP archive, in archive order
pub fn zip_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).unwrap();
        entries.push((file.name().to_string(), contents));
    }
    entries
}
