//! Keyboards attached to bot replies: the persistent main menu, the cancel-only menu while
//! waiting for an address, the saved-address list and the delete confirmation.

use storage::AddressRecord;
use weather_core::{ButtonGrid, InlineButton, Markup, ReplyKeyboard};

use crate::callback_data::CallbackAction;

/// Buttons per row of the address list.
const ADDRESS_BUTTONS_PER_ROW: usize = 2;

/// Reply-keyboard menu entries. Pressing one sends its label back as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuButton {
    GetWeather,
    MyAddresses,
    AddAddress,
    Help,
    Cancel,
}

impl MenuButton {
    pub const ALL: [MenuButton; 5] = [
        MenuButton::GetWeather,
        MenuButton::MyAddresses,
        MenuButton::AddAddress,
        MenuButton::Help,
        MenuButton::Cancel,
    ];

    /// Label shown on the keyboard.
    pub fn label(&self) -> &'static str {
        match self {
            MenuButton::GetWeather => "🌤 Get Weather",
            MenuButton::MyAddresses => "📍 My Addresses",
            MenuButton::AddAddress => "➕ Add Address",
            MenuButton::Help => "ℹ️ Help",
            MenuButton::Cancel => "❌ Cancel",
        }
    }

    /// Label without the leading emoji.
    pub fn name(&self) -> &'static str {
        match self {
            MenuButton::GetWeather => "Get Weather",
            MenuButton::MyAddresses => "My Addresses",
            MenuButton::AddAddress => "Add Address",
            MenuButton::Help => "Help",
            MenuButton::Cancel => "Cancel",
        }
    }

    /// Exact match against either the keyboard label or the bare name. Anything else is not a
    /// menu press and is treated as a city.
    pub fn from_text(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| text == b.label() || text == b.name())
    }
}

pub fn main_menu() -> Markup {
    Markup::Reply(ReplyKeyboard {
        rows: vec![
            vec![
                MenuButton::GetWeather.label().to_string(),
                MenuButton::MyAddresses.label().to_string(),
            ],
            vec![
                MenuButton::AddAddress.label().to_string(),
                MenuButton::Help.label().to_string(),
            ],
        ],
        placeholder: Some("Choose an action...".to_string()),
    })
}

pub fn cancel_menu() -> Markup {
    Markup::Reply(ReplyKeyboard {
        rows: vec![vec![MenuButton::Cancel.label().to_string()]],
        placeholder: Some("Enter address or cancel...".to_string()),
    })
}

/// One weather button and one delete button per address, two to a row, in input order.
pub fn render_address_list(addresses: &[AddressRecord]) -> ButtonGrid {
    let buttons = addresses
        .iter()
        .flat_map(|a| {
            [
                InlineButton::new(
                    format!("🌡 {}", a.address),
                    CallbackAction::Weather(a.id).encode(),
                ),
                InlineButton::new("🗑", CallbackAction::Delete(a.id).encode()),
            ]
        })
        .collect();
    ButtonGrid::from_buttons(buttons, ADDRESS_BUTTONS_PER_ROW)
}

pub fn confirmation(address_id: i64) -> ButtonGrid {
    ButtonGrid {
        rows: vec![vec![
            InlineButton::new(
                "✅ Yes, delete",
                CallbackAction::ConfirmDelete(address_id).encode(),
            ),
            InlineButton::new("❌ Cancel", CallbackAction::CancelDelete.encode()),
        ]],
    }
}
