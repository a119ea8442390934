//! tubeparcel - Telegram bot that downloads YouTube media and sends it back
//!
//! A user sends a YouTube link, picks "Video" or "Audio", and receives the file
//! as a document. Playlists arrive as one ZIP archive. yt-dlp does the actual
//! extraction; this crate sequences the request and cleans up after it.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, logging, URL classification
//! - `storage`: scratch directory and per-request scopes
//! - `download`: fetcher, archive packager and the request lifecycle
//! - `telegram`: bot setup, transport adapter and dispatcher handlers

pub mod cli;
pub mod core;
pub mod download;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use download::{DownloadError, FormatIntent, RequestCoordinator, RequestOutcome, RequestState};
pub use storage::ScratchDir;
