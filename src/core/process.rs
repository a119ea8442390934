//! Process execution utilities with optional timeout
//!
//! yt-dlp runs for as long as the media takes to download, so a timeout is
//! opt-in. Commands should be built with `kill_on_drop(true)` so an expired
//! timeout also terminates the child.

use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

use crate::core::error::AppError;

/// Run an async Command, optionally bounded by a timeout.
///
/// Returns the process Output on success, or an AppError on timeout/IO failure.
/// A non-zero exit status is not an error here; callers inspect `output.status`.
pub async fn run_with_timeout(cmd: &mut Command, timeout: Option<Duration>) -> Result<Output, AppError> {
    let Some(timeout) = timeout else {
        return cmd.output().await.map_err(AppError::Io);
    };

    match tokio::time::timeout(timeout, cmd.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(AppError::Io(e)),
        Err(_) => Err(AppError::Download(format!(
            "Process timed out after {}s",
            timeout.as_secs()
        ))),
    }
}
