//! Inline keyboard callback data for format choices.
//!
//! Telegram caps `callback_data` at 64 bytes. Short URLs travel inline as
//! `video|<url>`; longer ones are parked in a TTL cache and the button carries
//! `video#<token>` instead.

use moka::future::Cache;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::core::config;
use crate::download::request::{FormatChoice, FormatIntent};

/// Separator for data carrying the URL itself
const INLINE_SEPARATOR: char = '|';

/// Separator for data carrying a cache token
const TOKEN_SEPARATOR: char = '#';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CallbackError {
    /// Not produced by this codec
    #[error("Unrecognized callback data: {0}")]
    Malformed(String),
    /// Token evicted or from before a restart
    #[error("This button has expired. Please send the link again.")]
    Expired,
}

/// Encodes and decodes format-choice buttons.
#[derive(Clone)]
pub struct CallbackCodec {
    pending: Cache<String, String>,
}

impl Default for CallbackCodec {
    fn default() -> Self {
        Self::new(config::callback::pending_url_ttl(), config::callback::PENDING_URL_CAPACITY)
    }
}

impl CallbackCodec {
    pub fn new(ttl: Duration, capacity: u64) -> Self {
        Self {
            pending: Cache::builder().max_capacity(capacity).time_to_live(ttl).build(),
        }
    }

    /// Callback data for each choice, in order. Choices sharing a long URL share one token.
    pub async fn encode_choices(&self, choices: &[FormatChoice]) -> Vec<String> {
        let mut tokens: HashMap<&str, String> = HashMap::new();
        let mut encoded = Vec::with_capacity(choices.len());

        for choice in choices {
            let inline = format!("{}{}{}", choice.intent, INLINE_SEPARATOR, choice.url);
            if inline.len() <= config::callback::MAX_DATA_BYTES {
                encoded.push(inline);
                continue;
            }

            let token = match tokens.get(choice.url.as_str()) {
                Some(token) => token.clone(),
                None => {
                    let token = Uuid::new_v4().simple().to_string();
                    self.pending.insert(token.clone(), choice.url.clone()).await;
                    tokens.insert(choice.url.as_str(), token.clone());
                    token
                }
            };
            encoded.push(format!("{}{}{}", choice.intent, TOKEN_SEPARATOR, token));
        }

        encoded
    }

    /// Recovers the choice behind a button.
    pub async fn decode(&self, data: &str) -> Result<FormatChoice, CallbackError> {
        let malformed = || CallbackError::Malformed(data.to_string());

        let split = data.find([INLINE_SEPARATOR, TOKEN_SEPARATOR]).ok_or_else(malformed)?;
        let (intent, rest) = data.split_at(split);
        let intent = FormatIntent::from_str(intent).map_err(|_| malformed())?;
        let payload = &rest[1..];
        if payload.is_empty() {
            return Err(malformed());
        }

        let url = if rest.starts_with(INLINE_SEPARATOR) {
            payload.to_string()
        } else {
            self.pending.get(payload).await.ok_or(CallbackError::Expired)?
        };

        Ok(FormatChoice { intent, url })
    }
}
