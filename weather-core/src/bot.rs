//! Bot abstraction for sending and editing messages and answering button presses.
//!
//! [`Bot`] is transport-agnostic; the Telegram implementation lives in the weather-bot crate.
//! Message text is HTML formatted.

use crate::error::Result;
use crate::keyboard::{ButtonGrid, Markup};
use crate::types::Chat;
use async_trait::async_trait;

/// Abstraction for outgoing bot actions. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends an HTML message to the given chat, optionally with a keyboard.
    async fn send_message(&self, chat: &Chat, text: &str, markup: Option<&Markup>) -> Result<()>;

    /// Replaces the text (and inline keyboard) of an already-sent message. `message_id` is transport-specific.
    async fn edit_message(
        &self,
        chat: &Chat,
        message_id: &str,
        text: &str,
        keyboard: Option<&ButtonGrid>,
    ) -> Result<()>;

    /// Answers a button press; `text` is shown as a transient notice, or as an alert when `show_alert` is set.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()>;
}
