//! Presentation types for keyboards attached to outgoing messages.
//!
//! Transport-agnostic: the Telegram adapter maps [`ReplyKeyboard`] to a reply keyboard and
//! [`ButtonGrid`] to an inline keyboard.

use serde::{Deserialize, Serialize};

/// A button carrying an opaque callback token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    pub callback_data: String,
}

impl InlineButton {
    pub fn new(text: impl Into<String>, callback_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: callback_data.into(),
        }
    }
}

/// Inline buttons laid out in rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonGrid {
    pub rows: Vec<Vec<InlineButton>>,
}

impl ButtonGrid {
    /// Lays `buttons` out `per_row` to a row, preserving order; the last row may be shorter.
    pub fn from_buttons(buttons: Vec<InlineButton>, per_row: usize) -> Self {
        let per_row = per_row.max(1);
        let mut rows = Vec::new();
        let mut row = Vec::with_capacity(per_row);
        for button in buttons {
            row.push(button);
            if row.len() == per_row {
                rows.push(std::mem::take(&mut row));
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
        Self { rows }
    }

    /// All buttons in row-major order.
    pub fn buttons(&self) -> impl Iterator<Item = &InlineButton> {
        self.rows.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Persistent reply keyboard: rows of button labels sent back as plain text when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub rows: Vec<Vec<String>>,
    pub placeholder: Option<String>,
}

/// Markup attached to a new message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Markup {
    Reply(ReplyKeyboard),
    Inline(ButtonGrid),
}
