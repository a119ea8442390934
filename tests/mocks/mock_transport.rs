//! Recording chat transport
//!
//! Every call is appended to an in-memory log. Attachments are read at send
//! time so tests can inspect the file after the coordinator has deleted it.

#![allow(dead_code)]

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;
use teloxide::types::{ChatId, MessageId};
use tubeparcel::core::error::{AppError, AppResult};
use tubeparcel::download::FormatChoice;
use tubeparcel::telegram::ChatTransport;

#[derive(Debug, Clone, PartialEq)]
pub enum TransportCall {
    Text {
        chat_id: ChatId,
        text: String,
    },
    Prompt {
        chat_id: ChatId,
        text: String,
        choices: Vec<FormatChoice>,
    },
    Edit {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
    },
    Attachment {
        chat_id: ChatId,
        path: PathBuf,
        file_name: String,
        /// File contents at send time; `None` when the file did not exist
        contents: Option<Vec<u8>>,
    },
}

#[derive(Debug)]
pub struct MockTransport {
    calls: Mutex<Vec<TransportCall>>,
    next_message_id: AtomicI32,
    fail_attachments: AtomicBool,
    fail_edits: AtomicBool,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_message_id: AtomicI32::new(100),
            fail_attachments: AtomicBool::new(false),
            fail_edits: AtomicBool::new(false),
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `send_file_attachment` fails after recording the call
    pub fn failing_attachments(self) -> Self {
        self.fail_attachments.store(true, Ordering::SeqCst);
        self
    }

    /// Every `edit_message` fails after recording the call
    pub fn failing_edits(self) -> Self {
        self.fail_edits.store(true, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, chat: ChatId) -> Vec<TransportCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.chat_id() == chat)
            .collect()
    }

    pub fn attachments(&self) -> Vec<TransportCall> {
        self.calls()
            .into_iter()
            .filter(|call| matches!(call, TransportCall::Attachment { .. }))
            .collect()
    }

    /// Texts of sends and edits, in order
    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Text { text, .. } | TransportCall::Edit { text, .. } => Some(text),
                TransportCall::Prompt { text, .. } => Some(text),
                TransportCall::Attachment { .. } => None,
            })
            .collect()
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(&self) -> MessageId {
        MessageId(self.next_message_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl TransportCall {
    pub fn chat_id(&self) -> ChatId {
        match self {
            TransportCall::Text { chat_id, .. }
            | TransportCall::Prompt { chat_id, .. }
            | TransportCall::Edit { chat_id, .. }
            | TransportCall::Attachment { chat_id, .. } => *chat_id,
        }
    }
}

#[async_trait]
impl ChatTransport for MockTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> AppResult<MessageId> {
        self.record(TransportCall::Text {
            chat_id,
            text: text.to_string(),
        });
        Ok(self.next_id())
    }

    async fn send_choice_prompt(&self, chat_id: ChatId, text: &str, choices: &[FormatChoice]) -> AppResult<MessageId> {
        self.record(TransportCall::Prompt {
            chat_id,
            text: text.to_string(),
            choices: choices.to_vec(),
        });
        Ok(self.next_id())
    }

    async fn edit_message(&self, chat_id: ChatId, message_id: MessageId, text: &str) -> AppResult<()> {
        self.record(TransportCall::Edit {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        if self.fail_edits.load(Ordering::SeqCst) {
            return Err(AppError::Validation("message to edit not found".to_string()));
        }
        Ok(())
    }

    async fn send_file_attachment(&self, chat_id: ChatId, path: &Path) -> AppResult<()> {
        let contents = tokio::fs::read(path).await.ok();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.record(TransportCall::Attachment {
            chat_id,
            path: path.to_path_buf(),
            file_name,
            contents,
        });
        if self.fail_attachments.load(Ordering::SeqCst) {
            return Err(AppError::Download("network unreachable".to_string()));
        }
        Ok(())
    }
}
