//! Scripted fetcher
//!
//! Writes the configured files into the destination directory, optionally
//! failing afterwards to simulate a download that broke halfway.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tubeparcel::download::{DownloadError, DownloadRequest, FormatIntent, MediaFetcher};

/// What the mock does on each call
#[derive(Debug, Clone, Default)]
pub struct MockFetcherConfig {
    /// Files to write, as (name, contents)
    pub files: Vec<(String, Vec<u8>)>,
    /// Names reported as downloaded without being written
    pub missing: Vec<String>,
    /// Error returned after the files are written
    pub fail_with: Option<DownloadError>,
    /// Delay before writing anything
    pub delay: Option<Duration>,
}

impl MockFetcherConfig {
    /// One file named `name`
    pub fn single(name: &str, contents: &[u8]) -> Self {
        Self {
            files: vec![(name.to_string(), contents.to_vec())],
            ..Default::default()
        }
    }

    /// Several files, in playlist order
    pub fn playlist(items: &[(&str, &[u8])]) -> Self {
        Self {
            files: items
                .iter()
                .map(|(name, contents)| (name.to_string(), contents.to_vec()))
                .collect(),
            ..Default::default()
        }
    }

    /// Writes nothing and fails
    pub fn failing(err: DownloadError) -> Self {
        Self {
            fail_with: Some(err),
            ..Default::default()
        }
    }

    /// Also report `name` in the result without creating it
    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    /// Fail after the configured files are written
    pub fn then_fail(mut self, err: DownloadError) -> Self {
        self.fail_with = Some(err);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request as the fetcher saw it
#[derive(Debug, Clone, PartialEq)]
pub struct SeenRequest {
    pub url: String,
    pub intent: FormatIntent,
    pub playlist: bool,
    pub dest_dir: PathBuf,
}

#[derive(Debug, Default)]
pub struct MockFetcher {
    config: MockFetcherConfig,
    calls: AtomicU64,
    seen: Mutex<Vec<SeenRequest>>,
}

impl MockFetcher {
    pub fn new(config: MockFetcherConfig) -> Self {
        Self {
            config,
            calls: AtomicU64::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for MockFetcher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, request: &DownloadRequest, dest_dir: &Path) -> Result<Vec<PathBuf>, DownloadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(SeenRequest {
            url: request.url().to_string(),
            intent: request.intent(),
            playlist: request.is_playlist(),
            dest_dir: dest_dir.to_path_buf(),
        });

        if let Some(delay) = self.config.delay {
            tokio::time::sleep(delay).await;
        }

        let mut paths = Vec::with_capacity(self.config.files.len());
        for (name, contents) in &self.config.files {
            let path = dest_dir.join(name);
            tokio::fs::write(&path, contents)
                .await
                .map_err(|e| DownloadError::Fetch(e.to_string()))?;
            paths.push(path);
        }

        paths.extend(self.config.missing.iter().map(|name| dest_dir.join(name)));

        match &self.config.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(paths),
        }
    }
}
