//! Handler implementations: commands, URLs, format buttons

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};
use crate::download::lifecycle::messages;
use crate::telegram::bot::Command;
use crate::telegram::callback::CallbackError;
use crate::telegram::transport::ReplyTarget;
use crate::telegram::Bot;

/// Handle /start and /help
pub(super) async fn handle_command(bot: &Bot, msg: &Message, cmd: Command) -> Result<(), HandlerError> {
    log::info!("Received command {:?} from chat {}", cmd, msg.chat.id);
    match cmd {
        Command::Start | Command::Help => {
            bot.send_message(msg.chat.id, messages::WELCOME).await?;
        }
    }
    Ok(())
}

/// Handle free text: offer formats for a URL or ask for a valid one
pub(super) async fn handle_text(msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    deps.coordinator.present_format_choice(msg.chat.id, text).await?;
    Ok(())
}

/// Handle a click on a format button.
///
/// The download runs on its own task so the dispatcher keeps serving other
/// updates (including from the same chat) while yt-dlp works.
pub(super) async fn handle_format_callback(bot: &Bot, q: CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    // Stop the client's loading spinner
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        log::warn!("Failed to answer callback query: {}", e);
    }

    let Some(message) = q.message.as_ref() else {
        log::warn!("Callback query without a message, ignoring");
        return Ok(());
    };
    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();

    match deps.codec.decode(data).await {
        Ok(choice) => {
            let coordinator = deps.coordinator.clone();
            let reply = ReplyTarget::new(chat_id, Some(message_id));
            tokio::spawn(async move {
                let outcome = coordinator
                    .handle_format_selection(choice.intent, &choice.url, reply)
                    .await;
                log::info!("Chat {}: request finished in state {}", chat_id, outcome.state());
            });
        }
        Err(err @ CallbackError::Expired) => {
            log::info!("Chat {}: expired format button", chat_id);
            bot.edit_message_text(chat_id, message_id, err.to_string()).await?;
        }
        Err(err @ CallbackError::Malformed(_)) => {
            log::warn!("Chat {}: {}", chat_id, err);
        }
    }

    Ok(())
}
