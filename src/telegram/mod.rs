//! Telegram bot integration and handlers

pub mod bot;
pub mod callback;
pub mod handlers;
pub mod transport;

/// Bot type used across handlers
pub type Bot = teloxide::Bot;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands, Command};
pub use callback::CallbackCodec;
pub use handlers::{schema, HandlerDeps, HandlerError};
pub use transport::{ChatTransport, ReplyTarget, TeloxideTransport};
