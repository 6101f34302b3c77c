//! Bot initialization and command registration

use reqwest::ClientBuilder;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// Bot type used throughout the crate.
pub type Bot = teloxide::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "What I can do:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
}

/// Greeting shown for /start and registered as the command description.
pub const START_TEXT: &str =
    "👋 Send me any video link (YouTube, Facebook, etc.) and I'll show you available resolutions to download.";

/// Creates a Bot instance from the BOT_TOKEN environment variable.
///
/// The HTTP client carries the upload-sized request timeout so large
/// send_video payloads don't get cut off.
///
/// # Errors
/// Fails when BOT_TOKEN is absent (fatal at startup) or the HTTP client
/// cannot be built.
pub fn create_bot() -> anyhow::Result<Bot> {
    let token =
        std::env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN environment variable not set"))?;
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    Ok(Bot::with_client(token, client))
}

/// Sets up bot commands in the Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    use teloxide::prelude::Requester;
    use teloxide::types::BotCommand;

    bot.set_my_commands(vec![BotCommand::new("start", "show the welcome message")])
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_descriptions() {
        let commands = Command::descriptions();
        let command_list = format!("{}", commands);
        assert!(command_list.contains("What I can do"));
        assert!(command_list.contains("start"));
    }
}
