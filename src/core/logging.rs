//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A startup summary of the effective configuration

use anyhow::Result;
use simplelog::*;
use std::fs::File;

use crate::core::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to initialize logger
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at application startup
///
/// Reports the yt-dlp binary, the scratch directory, the cookies file (and whether
/// it exists), the upload limit and the fetch timeout.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("yt-dlp binary: {}", *config::YTDL_BIN);
    log::info!("Scratch directory: {}", config::DOWNLOAD_FOLDER.display());

    match config::YTDL_COOKIES_FILE.as_ref() {
        Some(path) if path.exists() => log::info!("✅ YTDL_COOKIES_FILE: {}", path.display()),
        Some(path) => {
            log::error!("❌ YTDL_COOKIES_FILE: {} (FILE NOT FOUND!)", path.display());
            log::error!("   Current directory: {:?}", std::env::current_dir());
        }
        None => log::warn!("⚠️  YTDL_COOKIES_FILE: not set, age-restricted videos will fail"),
    }

    match config::BOT_API_URL.as_deref() {
        Some(url) => log::info!("Bot API: {} (local server)", url),
        None => log::info!("Bot API: api.telegram.org"),
    }
    log::info!("Upload limit: {} MB", *config::upload::MAX_UPLOAD_MB);

    match config::download::ytdlp_timeout() {
        Some(timeout) => log::info!("yt-dlp timeout: {}s", timeout.as_secs()),
        None => log::info!("yt-dlp timeout: none"),
    }
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
