//! Wraps teloxide::Bot and implements [`weather_core::Bot`]. Every message is sent in HTML parse mode.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    KeyboardMarkup, MessageId, ParseMode,
};
use weather_core::{Bot as CoreBot, BotError, ButtonGrid, Chat, Markup, ReplyKeyboard, Result};

fn reply_keyboard(keyboard: &ReplyKeyboard) -> KeyboardMarkup {
    let rows = keyboard
        .rows
        .iter()
        .map(|row| row.iter().map(KeyboardButton::new).collect::<Vec<_>>());
    let markup = KeyboardMarkup::new(rows).resize_keyboard();
    match &keyboard.placeholder {
        Some(placeholder) => markup.input_field_placeholder(placeholder.clone()),
        None => markup,
    }
}

fn inline_keyboard(grid: &ButtonGrid) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(grid.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.text.clone(), b.callback_data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Thin wrapper around teloxide::Bot that implements weather-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str, markup: Option<&Markup>) -> Result<()> {
        let request = self
            .bot
            .send_message(ChatId(chat.id), text.to_string())
            .parse_mode(ParseMode::Html);
        let request = match markup {
            Some(Markup::Reply(keyboard)) => request.reply_markup(reply_keyboard(keyboard)),
            Some(Markup::Inline(grid)) => request.reply_markup(inline_keyboard(grid)),
            None => request,
        };
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&ButtonGrid>,
    ) -> Result<()> {
        let id: i32 = message_id
            .parse()
            .map_err(|_| BotError::Bot(format!("Invalid message_id for edit: {}", message_id)))?;
        let request = self
            .bot
            .edit_message_text(ChatId(chat.id), MessageId(id), text)
            .parse_mode(ParseMode::Html);
        let request = match keyboard {
            Some(grid) => request.reply_markup(inline_keyboard(grid)),
            None => request,
        };
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let request = self
            .bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()));
        let request = match text {
            Some(text) => request.text(text).show_alert(show_alert),
            None => request,
        };
        request.await.map_err(|e| BotError::Bot(e.to_string()))?;
        Ok(())
    }
}
