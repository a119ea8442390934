use thiserror::Error;

/// Centralized error types for the application
///
/// Infrastructure errors (filesystem, Telegram API, child processes) are converted
/// to this enum. Request-level failures shown to users live in
/// [`crate::download::error::DownloadError`].
///
/// # Example
///
/// ```no_run
/// use tubeparcel::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// Download/yt-dlp errors
    #[error("Download error: {0}")]
    Download(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
