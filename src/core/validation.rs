//! URL validation and classification
//!
//! Turns free text typed by a user into a typed [`UrlClass`]:
//! - whitelist of YouTube hosts, HTTP/HTTPS only
//! - playlist detection (`list=` parameter, `/playlist`, channel pages)
//!
//! The classifier knows nothing about Telegram; handlers and the request
//! coordinator both call it.

use thiserror::Error;
use url::Url;

/// Validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid URL format or non-YouTube domain
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),
}

/// Classification of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlClass {
    /// One video (`watch?v=`, `youtu.be/<id>`, shorts, ...)
    Single(Url),
    /// Anything yt-dlp expands to several entries
    Playlist(Url),
    /// Not a YouTube URL
    Invalid,
}

impl UrlClass {
    /// The parsed URL, if the input was valid.
    pub fn url(&self) -> Option<&Url> {
        match self {
            UrlClass::Single(url) | UrlClass::Playlist(url) => Some(url),
            UrlClass::Invalid => None,
        }
    }

    pub fn is_playlist(&self) -> bool {
        matches!(self, UrlClass::Playlist(_))
    }
}

/// Classifies free text as a single YouTube video, a playlist, or invalid input.
///
/// Surrounding whitespace is ignored and a missing scheme is tolerated
/// (`youtu.be/abc123` is treated as `https://youtu.be/abc123`).
///
/// # Examples
/// ```
/// use tubeparcel::core::validation::{classify_url, UrlClass};
///
/// assert!(matches!(classify_url("https://youtu.be/abc123"), UrlClass::Single(_)));
/// assert!(matches!(
///     classify_url("https://www.youtube.com/playlist?list=PL123"),
///     UrlClass::Playlist(_)
/// ));
/// assert_eq!(classify_url("not a link"), UrlClass::Invalid);
/// ```
pub fn classify_url(input: &str) -> UrlClass {
    let Ok(url) = validate_youtube_url(input) else {
        return UrlClass::Invalid;
    };

    if is_playlist_url(&url) {
        UrlClass::Playlist(url)
    } else {
        UrlClass::Single(url)
    }
}

/// Validates that the input is a YouTube URL and returns it parsed.
///
/// # Security
/// Uses whitelist approach:
/// - Only HTTP/HTTPS schemes allowed
/// - Only youtube.com, youtu.be, youtube-nocookie.com domains (+ subdomains)
pub fn validate_youtube_url(input: &str) -> Result<Url, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidUrl(trimmed.to_string()));
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(&format!("https://{}", trimmed))
            .map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?,
        Err(_) => return Err(ValidationError::InvalidUrl(trimmed.to_string())),
    };

    // Only HTTP and HTTPS are allowed
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (invalid scheme: {})",
            trimmed,
            parsed.scheme()
        )));
    }

    let host = parsed
        .host_str()
        .ok_or_else(|| ValidationError::InvalidUrl(format!("{} (no host)", trimmed)))?
        .to_ascii_lowercase();

    if !is_youtube_host(&host) {
        return Err(ValidationError::InvalidUrl(format!(
            "{} (not a YouTube domain: {})",
            trimmed, host
        )));
    }

    Ok(parsed)
}

fn is_youtube_host(host: &str) -> bool {
    host == "youtube.com"
        || host.ends_with(".youtube.com")
        || host == "youtu.be"
        || host == "youtube-nocookie.com"
        || host.ends_with(".youtube-nocookie.com")
}

/// Checks if a YouTube URL expands to several entries.
fn is_playlist_url(url: &Url) -> bool {
    // Has list parameter (also `watch?v=..&list=..`, which yt-dlp expands by default)
    if url.query_pairs().any(|(key, value)| key == "list" && !value.is_empty()) {
        return true;
    }

    let path = url.path().to_ascii_lowercase();
    path.starts_with("/playlist")
        || path.starts_with("/channel/")
        || path.starts_with("/c/")
        || path.starts_with("/user/")
        || path.starts_with("/@")
}
