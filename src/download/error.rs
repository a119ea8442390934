use thiserror::Error;

use crate::core::error::AppError;
use crate::core::validation::ValidationError;

/// Structured error type for one download request.
///
/// Each variant is a failure class of the request lifecycle. The message is what
/// the user sees after "An error occurred: ", so it stays short and free of
/// internal paths where possible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// Input is not a recognizable YouTube URL; nothing was fetched
    #[error("{0}")]
    InvalidUrl(String),
    /// yt-dlp failed (network, extraction, unsupported URL, throttling, timeout)
    #[error("{0}")]
    Fetch(String),
    /// Local storage failure (archive creation, scratch directory, disk full)
    #[error("{0}")]
    Packaging(String),
    /// The chat transport could not deliver the attachment
    #[error("{0}")]
    Transmission(String),
}

impl DownloadError {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            DownloadError::InvalidUrl(_) => "invalid_url",
            DownloadError::Fetch(_) => "fetch",
            DownloadError::Packaging(_) => "packaging",
            DownloadError::Transmission(_) => "transmission",
        }
    }
}

impl From<ValidationError> for DownloadError {
    fn from(err: ValidationError) -> Self {
        DownloadError::InvalidUrl(err.to_string())
    }
}

impl From<zip::result::ZipError> for DownloadError {
    fn from(err: zip::result::ZipError) -> Self {
        DownloadError::Packaging(format!("Failed to create archive: {}", err))
    }
}

/// Transport failures surface as transmission errors at the request boundary.
/// Validation messages are already user-facing and pass through unprefixed.
impl From<AppError> for DownloadError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(msg) => DownloadError::Transmission(msg),
            other => DownloadError::Transmission(other.to_string()),
        }
    }
}
