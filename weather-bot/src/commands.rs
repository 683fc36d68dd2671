//! Slash commands registered with Telegram and parsed from message text.

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start the bot and show the menu")]
    Start,
    #[command(description = "show how to use the bot")]
    Help,
}

impl Command {
    /// Parses `text` as a command; `bot_username` allows the `/cmd@botname` form.
    pub fn from_text(text: &str, bot_username: Option<&str>) -> Option<Self> {
        Self::parse(text, bot_username.unwrap_or("")).ok()
    }
}
