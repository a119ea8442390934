//! Configuration constants for the bot, read once from the environment

use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<SecretString> = Lazy::new(|| {
    let raw = env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_default();
    SecretString::from(raw)
});

/// Custom Bot API server (local `telegram-bot-api`)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Cached yt-dlp binary path
/// Read once at startup from YTDL_BIN environment variable or defaults to "yt-dlp"
pub static YTDL_BIN: Lazy<String> = Lazy::new(|| env::var("YTDL_BIN").unwrap_or_else(|_| "yt-dlp".to_string()));

/// Path to cookies file for YouTube authentication
/// Read from YTDL_COOKIES_FILE environment variable, supports tilde (~) expansion
pub static YTDL_COOKIES_FILE: Lazy<Option<PathBuf>> =
    Lazy::new(|| non_empty_var("YTDL_COOKIES_FILE").map(|raw| expand_path(&raw)));

/// Scratch directory for in-flight downloads and archives
/// Read from DOWNLOAD_FOLDER environment variable
/// Default: ./downloads, supports tilde (~) expansion
pub static DOWNLOAD_FOLDER: Lazy<PathBuf> = Lazy::new(|| {
    let raw = env::var("DOWNLOAD_FOLDER").unwrap_or_else(|_| "./downloads".to_string());
    expand_path(&raw)
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Download configuration
pub mod download {
    use super::Duration;
    use once_cell::sync::Lazy;

    /// Optional hard limit for one yt-dlp run (in seconds)
    /// Read from YTDLP_TIMEOUT_SECS; unset or 0 means wait for yt-dlp indefinitely
    pub static YTDLP_TIMEOUT_SECS: Lazy<Option<u64>> = Lazy::new(|| {
        super::non_empty_var("YTDLP_TIMEOUT_SECS")
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
    });

    /// Socket timeout passed to yt-dlp (in seconds)
    pub const SOCKET_TIMEOUT_SECS: u64 = 30;

    /// Name of the archive built for multi-item results, inside the request scope
    pub const ARCHIVE_FILE_NAME: &str = "playlist.zip";

    /// yt-dlp command timeout duration, if one is configured
    pub fn ytdlp_timeout() -> Option<Duration> {
        YTDLP_TIMEOUT_SECS.map(Duration::from_secs)
    }
}

/// Upload limits
pub mod upload {
    use once_cell::sync::Lazy;

    /// Telegram cloud Bot API limit for documents sent by bots
    pub const CLOUD_API_LIMIT_MB: u64 = 50;

    /// Limit of a self-hosted Bot API server
    pub const LOCAL_API_LIMIT_MB: u64 = 2000;

    /// Maximum attachment size in megabytes
    /// Read from MAX_UPLOAD_MB; defaults depend on whether BOT_API_URL is set
    pub static MAX_UPLOAD_MB: Lazy<u64> = Lazy::new(|| {
        super::non_empty_var("MAX_UPLOAD_MB")
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(if super::BOT_API_URL.is_some() {
                LOCAL_API_LIMIT_MB
            } else {
                CLOUD_API_LIMIT_MB
            })
    });

    /// Maximum attachment size in bytes
    pub fn max_bytes() -> u64 {
        *MAX_UPLOAD_MB * 1024 * 1024
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Large enough for multi-hundred-megabyte uploads through a local Bot API server
    pub const REQUEST_TIMEOUT_SECS: u64 = 900; // 15 minutes

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Inline keyboard callback configuration
pub mod callback {
    use super::Duration;

    /// Telegram's hard limit for `callback_data`
    pub const MAX_DATA_BYTES: usize = 64;

    /// How long a long URL stays resolvable after the format prompt was shown
    pub const PENDING_URL_TTL_SECS: u64 = 3600;

    /// Upper bound on long URLs kept at once
    pub const PENDING_URL_CAPACITY: u64 = 10_000;

    pub fn pending_url_ttl() -> Duration {
        Duration::from_secs(PENDING_URL_TTL_SECS)
    }
}
