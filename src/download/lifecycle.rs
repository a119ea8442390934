//! Request lifecycle: format prompt, fetch, packaging, delivery, cleanup.
//!
//! One `handle_format_selection` call drives one request through
//! `AwaitingFormat → Processing → Delivered | Failed`. Whatever happens, every
//! file the request produced is deleted before the call returns, and the user
//! gets exactly one terminal message.

use std::path::PathBuf;
use std::sync::Arc;
use teloxide::types::{ChatId, MessageId};

use crate::core::validation::{classify_url, UrlClass};
use crate::download::archive::{package_output, PackagedOutput};
use crate::download::error::DownloadError;
use crate::download::fetcher::MediaFetcher;
use crate::download::request::{DownloadRequest, FormatChoice, FormatIntent};
use crate::storage::{remove_if_present, RequestScope, ScratchDir};
use crate::telegram::transport::{ChatTransport, ReplyTarget};

/// User-facing texts
pub mod messages {
    use crate::download::error::DownloadError;

    pub const WELCOME: &str = "Welcome to YouTube Downloader Bot!\nSend me a YouTube URL to get started.";
    pub const CHOOSE_FORMAT: &str = "Choose the format you want to download:";
    pub const INVALID_URL: &str = "Please send a valid YouTube URL.";
    pub const PROCESSING: &str = "Processing your request. Please wait...";
    pub const SINGLE_READY: &str = "Download complete. Sending file...";
    pub const PLAYLIST_READY: &str = "Playlist download complete. Sending ZIP file...";

    pub fn error_notice(err: &DownloadError) -> String {
        format!("An error occurred: {}", err)
    }
}

/// Lifecycle state of one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum RequestState {
    AwaitingFormat,
    Processing,
    Delivered,
    Failed,
}

impl RequestState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestState::Delivered | RequestState::Failed)
    }
}

/// How a request ended.
#[derive(Debug)]
pub enum RequestOutcome {
    /// The attachment reached the chat
    Delivered {
        /// Name of the sent document
        file_name: String,
        /// Whether it was a playlist archive
        archived: bool,
    },
    /// A notice was sent instead
    Failed(DownloadError),
}

impl RequestOutcome {
    pub fn state(&self) -> RequestState {
        match self {
            RequestOutcome::Delivered { .. } => RequestState::Delivered,
            RequestOutcome::Failed(_) => RequestState::Failed,
        }
    }

    pub fn error(&self) -> Option<&DownloadError> {
        match self {
            RequestOutcome::Delivered { .. } => None,
            RequestOutcome::Failed(err) => Some(err),
        }
    }
}

/// Files a request has put on disk so far.
#[derive(Debug, Default)]
struct Artifacts {
    fetched: Vec<PathBuf>,
    archive: Option<PathBuf>,
}

/// Drives requests from format selection to delivery.
///
/// Cheap to clone; every request runs independently on the caller's task, with
/// its own scratch subdirectory.
#[derive(Clone)]
pub struct RequestCoordinator {
    fetcher: Arc<dyn MediaFetcher>,
    transport: Arc<dyn ChatTransport>,
    scratch: ScratchDir,
}

impl RequestCoordinator {
    pub fn new(fetcher: Arc<dyn MediaFetcher>, transport: Arc<dyn ChatTransport>, scratch: ScratchDir) -> Self {
        Self {
            fetcher,
            transport,
            scratch,
        }
    }

    /// Answers free text: a format prompt for a YouTube URL, a notice otherwise.
    ///
    /// Never downloads anything. Returns the classification and the prompt's
    /// message id when one was shown.
    pub async fn present_format_choice(
        &self,
        chat_id: ChatId,
        text: &str,
    ) -> Result<(UrlClass, Option<MessageId>), DownloadError> {
        let class = classify_url(text);

        match class {
            UrlClass::Invalid => {
                log::info!("Chat {}: not a YouTube URL", chat_id);
                self.transport.send_text(chat_id, messages::INVALID_URL).await?;
                Ok((class, None))
            }
            UrlClass::Single(_) | UrlClass::Playlist(_) => {
                let choices = FormatChoice::both(text.trim());
                let prompt = self
                    .transport
                    .send_choice_prompt(chat_id, messages::CHOOSE_FORMAT, &choices)
                    .await?;
                if let Some(url) = class.url() {
                    log::info!(
                        "Chat {}: offered formats for {} (playlist: {})",
                        chat_id,
                        url,
                        class.is_playlist()
                    );
                }
                Ok((class, Some(prompt)))
            }
        }
    }

    /// Runs one request to a terminal state. Never returns an error: failures
    /// are reported to the chat and carried in the outcome.
    pub async fn handle_format_selection(&self, intent: FormatIntent, url: &str, reply: ReplyTarget) -> RequestOutcome {
        let request = match DownloadRequest::new(url, intent) {
            Ok(request) => request,
            Err(err) => {
                log::warn!("Chat {}: rejected selection for {:?}: {}", reply.chat_id, url, err);
                self.notify_terminal(&reply, messages::INVALID_URL).await;
                return RequestOutcome::Failed(err);
            }
        };

        log::info!(
            "[{}] {} → {} for chat {} ({})",
            request.id(),
            RequestState::AwaitingFormat,
            RequestState::Processing,
            reply.chat_id,
            request.url()
        );
        self.notify(&reply, messages::PROCESSING).await;

        let result = match self.scratch.open_scope(request.id()).await {
            Ok(scope) => {
                let mut artifacts = Artifacts::default();
                let result = self.process(&request, &scope, &reply, &mut artifacts).await;
                self.cleanup(&request, &scope, &artifacts).await;
                result
            }
            Err(e) => Err(DownloadError::Packaging(format!("Failed to prepare download directory: {}", e))),
        };

        match result {
            Ok(output) => {
                let file_name = output
                    .path()
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                log::info!("[{}] {}: {}", request.id(), RequestState::Delivered, file_name);
                RequestOutcome::Delivered {
                    file_name,
                    archived: output.is_archive(),
                }
            }
            Err(err) => {
                log::error!("[{}] {} ({}): {}", request.id(), RequestState::Failed, err.kind(), err);
                self.notify_terminal(&reply, &messages::error_notice(&err)).await;
                RequestOutcome::Failed(err)
            }
        }
    }

    /// fetch → package → announce → transmit, recording every file it creates.
    async fn process(
        &self,
        request: &DownloadRequest,
        scope: &RequestScope,
        reply: &ReplyTarget,
        artifacts: &mut Artifacts,
    ) -> Result<PackagedOutput, DownloadError> {
        log::debug!("[{}] fetching with {}", request.id(), self.fetcher.name());
        let files = self.fetcher.fetch(request, scope.dir()).await?;
        artifacts.fetched = files.clone();

        if files.len() > 1 {
            artifacts.archive = Some(scope.archive_path());
        }
        let output = package_output(&files, scope).await?;

        let ready = if output.is_archive() {
            messages::PLAYLIST_READY
        } else {
            messages::SINGLE_READY
        };
        self.notify(reply, ready).await;

        self.transport
            .send_file_attachment(reply.chat_id, output.path())
            .await
            .map_err(DownloadError::from)?;

        Ok(output)
    }

    /// Deletes fetched files, the archive and the request scope.
    async fn cleanup(&self, request: &DownloadRequest, scope: &RequestScope, artifacts: &Artifacts) {
        let mut failures = 0usize;
        for path in artifacts.fetched.iter().chain(artifacts.archive.iter()) {
            if !remove_if_present(path).await {
                failures += 1;
            }
        }
        if !scope.dispose().await {
            failures += 1;
        }

        if failures > 0 {
            log::warn!("[{}] cleanup left {} path(s) behind", request.id(), failures);
        } else {
            log::debug!("[{}] cleanup complete", request.id());
        }
    }

    /// Progress update: edits the status message, best effort.
    async fn notify(&self, reply: &ReplyTarget, text: &str) {
        let result = match reply.status_message {
            Some(message_id) => self.transport.edit_message(reply.chat_id, message_id, text).await,
            None => self.transport.send_text(reply.chat_id, text).await.map(|_| ()),
        };
        if let Err(e) = result {
            log::warn!("Failed to update status in chat {}: {}", reply.chat_id, e);
        }
    }

    /// Terminal notice: falls back to a new message when the edit fails.
    async fn notify_terminal(&self, reply: &ReplyTarget, text: &str) {
        if let Some(message_id) = reply.status_message {
            match self.transport.edit_message(reply.chat_id, message_id, text).await {
                Ok(()) => return,
                Err(e) => log::warn!("Failed to edit status in chat {}: {}", reply.chat_id, e),
            }
        }
        if let Err(e) = self.transport.send_text(reply.chat_id, text).await {
            log::error!("Failed to deliver notice to chat {}: {}", reply.chat_id, e);
        }
    }
}
