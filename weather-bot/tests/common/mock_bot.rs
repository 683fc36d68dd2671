//! Mock implementation of [`weather_bot::Bot`] for integration tests.
//!
//! Records every send, edit and callback answer so tests can assert on reply text and keyboards
//! without hitting Telegram.

use async_trait::async_trait;
use std::sync::Mutex;
use weather_bot::{Bot, ButtonGrid, Chat, Markup, Result};

/// One recorded outgoing call.
#[derive(Debug, Clone, PartialEq)]
pub enum BotCall {
    Send {
        chat_id: i64,
        text: String,
        markup: Option<Markup>,
    },
    Edit {
        chat_id: i64,
        message_id: String,
        text: String,
        keyboard: Option<ButtonGrid>,
    },
    Answer {
        callback_id: String,
        text: Option<String>,
        show_alert: bool,
    },
}

#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
}

#[allow(dead_code)]
impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take(&self) -> Vec<BotCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    /// Texts of all sent messages, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_send(&self) -> Option<(String, Option<Markup>)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            BotCall::Send { text, markup, .. } => Some((text, markup)),
            _ => None,
        })
    }

    pub fn last_edit(&self) -> Option<(String, Option<ButtonGrid>)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            BotCall::Edit { text, keyboard, .. } => Some((text, keyboard)),
            _ => None,
        })
    }

    pub fn last_answer(&self) -> Option<(Option<String>, bool)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            BotCall::Answer {
                text, show_alert, ..
            } => Some((text, show_alert)),
            _ => None,
        })
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, chat: &Chat, text: &str, markup: Option<&Markup>) -> Result<()> {
        self.record(BotCall::Send {
            chat_id: chat.id,
            text: text.to_string(),
            markup: markup.cloned(),
        });
        Ok(())
    }

    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&ButtonGrid>,
    ) -> Result<()> {
        self.record(BotCall::Edit {
            chat_id: chat.id,
            message_id: message_id.to_string(),
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.record(BotCall::Answer {
            callback_id: callback_id.to_string(),
            text: text.map(str::to_string),
            show_alert,
        });
        Ok(())
    }
}
