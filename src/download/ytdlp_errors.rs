//! yt-dlp error analysis
//!
//! Classifies yt-dlp's stderr and reduces it to one line a user can read.

/// Maximum length of the stderr excerpt shown to users
const MAX_USER_MESSAGE_CHARS: usize = 300;

/// yt-dlp error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YtDlpErrorType {
    /// YouTube asks to sign in / detected a bot; cookies are missing or stale
    BotDetection,
    /// Video is private, removed, or region-locked
    VideoUnavailable,
    /// Timeouts, DNS, refused connections
    NetworkError,
    /// Anything else
    Unknown,
}

/// Analyzes yt-dlp stderr and determines the error type
pub fn analyze_ytdlp_error(stderr: &str) -> YtDlpErrorType {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("sign in to confirm you're not a bot")
        || stderr_lower.contains("please sign in")
        || stderr_lower.contains("cookies are no longer valid")
        || stderr_lower.contains("use --cookies")
        || stderr_lower.contains("http error 403")
    {
        return YtDlpErrorType::BotDetection;
    }

    if stderr_lower.contains("private video")
        || stderr_lower.contains("video unavailable")
        || stderr_lower.contains("this video is not available")
        || stderr_lower.contains("video has been removed")
        || stderr_lower.contains("this video does not exist")
        || stderr_lower.contains("not available in your country")
    {
        return YtDlpErrorType::VideoUnavailable;
    }

    if stderr_lower.contains("timed out")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("network is unreachable")
        || stderr_lower.contains("name or service not known")
        || stderr_lower.contains("temporary failure in name resolution")
    {
        return YtDlpErrorType::NetworkError;
    }

    YtDlpErrorType::Unknown
}

/// Builds the user-facing description of a failed yt-dlp run.
///
/// Prefers the last `ERROR:` line, falls back to the last non-empty line, and
/// truncates to a readable length.
pub fn summarize_ytdlp_error(stderr: &str, exit_code: Option<i32>) -> String {
    let lines: Vec<&str> = stderr.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let line = lines
        .iter()
        .rev()
        .find(|l| l.starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.trim_start_matches("ERROR:").trim().to_string());

    let summary = match line {
        Some(line) if !line.is_empty() => line,
        _ => match exit_code {
            Some(code) => format!("yt-dlp exited with code {}", code),
            None => "yt-dlp was terminated".to_string(),
        },
    };

    truncate_chars(&summary, MAX_USER_MESSAGE_CHARS)
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}
