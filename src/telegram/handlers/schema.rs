//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::commands::{handle_command, handle_format_callback, handle_text};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::Bot;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and can be used in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_messages = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // /start, /help
        .branch(command_handler())
        // Message handler for URLs and text
        .branch(message_handler(deps_messages))
        // Format button clicks
        .branch(callback_handler(deps_callback))
}

fn command_handler() -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(
        dptree::entry()
            .filter_command::<Command>()
            .endpoint(|bot: Bot, msg: Message, cmd: Command| async move { handle_command(&bot, &msg, cmd).await }),
    )
}

fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().map(|text| !text.starts_with('/')).unwrap_or(false))
        .endpoint(move |msg: Message| {
            let deps = deps.clone();
            async move { handle_text(&msg, &deps).await }
        })
}

fn callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
        let deps = deps.clone();
        async move { handle_format_callback(&bot, q, &deps).await }
    })
}
