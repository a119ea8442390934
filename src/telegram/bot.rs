//! Bot initialization
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use crate::core::config;
use crate::telegram::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "explain how to use the bot")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token, invalid URL, or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.expose_secret();
    if token.is_empty() {
        return Err(anyhow::anyhow!("BOT_TOKEN environment variable not set"));
    }

    let client = teloxide::net::default_reqwest_settings()
        .timeout(config::network::timeout())
        .build()?;
    let bot = Bot::with_client(token, client);

    // Check if local Bot API server is configured
    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = Command::bot_commands();
    bot.set_my_commands(commands).await?;
    Ok(())
}
