//! Request types: what the user asked for.

use strum::{AsRefStr, Display, EnumIter, EnumString};
use url::Url;
use uuid::Uuid;

use crate::core::validation::{classify_url, UrlClass};
use crate::download::error::DownloadError;

/// What the user wants out of a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum FormatIntent {
    /// Best video merged with best audio
    Video,
    /// Best audio, extracted to mp3
    Audio,
}

impl FormatIntent {
    /// Button caption
    pub fn label(self) -> &'static str {
        match self {
            FormatIntent::Video => "Video",
            FormatIntent::Audio => "Audio",
        }
    }
}

/// One button of the format prompt, bound to the URL it was offered for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatChoice {
    pub intent: FormatIntent,
    pub url: String,
}

impl FormatChoice {
    /// Both choices for a URL, video first.
    pub fn both(url: &str) -> [FormatChoice; 2] {
        [FormatIntent::Video, FormatIntent::Audio].map(|intent| FormatChoice {
            intent,
            url: url.to_string(),
        })
    }
}

/// One download, from a classified URL and a chosen format. Immutable.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    id: Uuid,
    url: Url,
    playlist: bool,
    intent: FormatIntent,
}

impl DownloadRequest {
    /// Builds a request, rejecting anything that isn't a YouTube URL.
    pub fn new(raw_url: &str, intent: FormatIntent) -> Result<Self, DownloadError> {
        let (url, playlist) = match classify_url(raw_url) {
            UrlClass::Single(url) => (url, false),
            UrlClass::Playlist(url) => (url, true),
            UrlClass::Invalid => {
                return Err(DownloadError::InvalidUrl(format!("not a YouTube URL: {}", raw_url.trim())));
            }
        };

        Ok(Self {
            id: Uuid::new_v4(),
            url,
            playlist,
            intent,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn is_playlist(&self) -> bool {
        self.playlist
    }

    pub fn intent(&self) -> FormatIntent {
        self.intent
    }
}
