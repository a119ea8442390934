//! yt-dlp backed media fetcher.
//!
//! yt-dlp does all the extraction, stream selection and transcoding. We only
//! build its command line, run it inside the request's directory and read the
//! final file paths it prints after post-processing.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::core::config;
use crate::core::error::AppError;
use crate::core::process::run_with_timeout;
use crate::download::error::DownloadError;
use crate::download::fetcher::MediaFetcher;
use crate::download::request::{DownloadRequest, FormatIntent};
use crate::download::ytdlp_errors::{analyze_ytdlp_error, summarize_ytdlp_error};

/// Output template, relative to the request directory
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Format selector for video downloads
const VIDEO_FORMAT: &str = "bestvideo+bestaudio/best";

/// Format selector for audio downloads
const AUDIO_FORMAT: &str = "bestaudio/best";

/// Fetcher that shells out to yt-dlp.
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    bin: String,
    cookies_file: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl YtDlpFetcher {
    pub fn new(bin: impl Into<String>, cookies_file: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            bin: bin.into(),
            cookies_file,
            timeout,
        }
    }

    /// Fetcher using `YTDL_BIN`, `YTDL_COOKIES_FILE` and `YTDLP_TIMEOUT_SECS`.
    pub fn from_config() -> Self {
        Self::new(
            config::YTDL_BIN.clone(),
            config::YTDL_COOKIES_FILE.clone(),
            config::download::ytdlp_timeout(),
        )
    }
}

#[async_trait]
impl MediaFetcher for YtDlpFetcher {
    fn name(&self) -> &str {
        "yt-dlp"
    }

    async fn fetch(&self, request: &DownloadRequest, dest_dir: &Path) -> Result<Vec<PathBuf>, DownloadError> {
        let args = build_ytdlp_args(request, dest_dir, self.cookies_file.as_deref());
        log::info!(
            "[{}] Running {} for {} ({}, playlist: {})",
            request.id(),
            self.bin,
            request.url(),
            request.intent(),
            request.is_playlist()
        );

        let mut cmd = Command::new(&self.bin);
        cmd.args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = run_with_timeout(&mut cmd, self.timeout).await.map_err(|e| match e {
            AppError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                DownloadError::Fetch(format!("{} is not installed", self.bin))
            }
            AppError::Io(io) => DownloadError::Fetch(format!("Failed to run {}: {}", self.bin, io)),
            other => DownloadError::Fetch(other.to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::error!(
                "[{}] yt-dlp failed ({:?}, {:?}): {}",
                request.id(),
                output.status.code(),
                analyze_ytdlp_error(&stderr),
                stderr.trim()
            );
            return Err(DownloadError::Fetch(summarize_ytdlp_error(&stderr, output.status.code())));
        }

        let paths = parse_printed_paths(&String::from_utf8_lossy(&output.stdout));
        if paths.is_empty() {
            return Err(DownloadError::Fetch("yt-dlp produced no files".to_string()));
        }

        for path in &paths {
            if !tokio::fs::try_exists(path).await.unwrap_or(false) {
                let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                return Err(DownloadError::Fetch(format!("Downloaded file is missing: {}", name)));
            }
        }

        log::info!("[{}] yt-dlp produced {} file(s)", request.id(), paths.len());
        Ok(paths)
    }
}

/// Builds the yt-dlp argument list for a request.
pub fn build_ytdlp_args(request: &DownloadRequest, dest_dir: &Path, cookies_file: Option<&Path>) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    let mut push = |arg: &str| args.push(OsString::from(arg));

    push(if request.is_playlist() {
        "--yes-playlist"
    } else {
        "--no-playlist"
    });
    push("--no-progress");
    push("--socket-timeout");
    push(&config::download::SOCKET_TIMEOUT_SECS.to_string());
    // Final path of every item, after merging/extraction, one per line
    push("--print");
    push("after_move:filepath");

    match request.intent() {
        FormatIntent::Video => {
            push("-f");
            push(VIDEO_FORMAT);
            push("--merge-output-format");
            push("mp4");
        }
        FormatIntent::Audio => {
            push("-f");
            push(AUDIO_FORMAT);
            push("--extract-audio");
            push("--audio-format");
            push("mp3");
            push("--audio-quality");
            push("0");
        }
    }

    args.push(OsString::from("-o"));
    args.push(dest_dir.join(OUTPUT_TEMPLATE).into_os_string());

    if let Some(cookies) = cookies_file {
        args.push(OsString::from("--cookies"));
        args.push(cookies.as_os_str().to_owned());
    }

    args.push(OsString::from("--"));
    args.push(OsString::from(request.url().as_str()));
    args
}

/// Parses the `--print after_move:filepath` output, keeping order and dropping duplicates.
pub fn parse_printed_paths(stdout: &str) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();
    for line in stdout.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let path = PathBuf::from(line);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

/// Returns the installed yt-dlp version.
pub async fn ytdlp_version(bin: &str) -> Result<String, AppError> {
    log::info!("Checking yt-dlp version...");

    let mut cmd = Command::new(bin);
    cmd.arg("--version").stdin(Stdio::null()).kill_on_drop(true);
    let output = run_with_timeout(&mut cmd, Some(Duration::from_secs(30))).await?;

    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if !output.status.success() || version.is_empty() {
        return Err(AppError::Download(
            "yt-dlp is not installed or --version produced no output".to_string(),
        ));
    }

    log::info!("yt-dlp version: {}", version);
    Ok(version)
}
