//! Weather conversation: commands, menu buttons, free-text city lookups, the add-address flow
//! and the inline buttons of the saved-address list.
//!
//! Text is resolved in this order: command, exact menu label, then state. Anything that is not a
//! command or a menu label is a city. No lock is held while the weather API is called.

use async_trait::async_trait;
use std::sync::Arc;
use storage::{AddressRecord, AddressStore};
use teloxide::utils::html;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use weather_client::{format_message, WeatherClient};
use weather_core::{
    Bot, ButtonGrid, Callback, Chat, Handler, HandlerResponse, Markup, Message, Result, Update,
};

use crate::callback_data::CallbackAction;
use crate::commands::Command;
use crate::keyboards::{self, MenuButton};
use crate::state::{ConversationState, ConversationStates};

const HELP_TEXT: &str = "<b>How to use this bot:</b>\n\
<b>Get Weather</b> - Enter city name to get current weather\n\
<b>My Addresses</b> - View saved addresses and get weather\n\
<b>Add Address</b> - Save a new address for quick access\n\
<b>Delete Address</b> - Remove saved address (click trash icon)\n\
<i>Just type a city name to get weather instantly!</i>";

const GET_WEATHER_PROMPT: &str = "🌤 Enter city name to get weather:";
const ADD_ADDRESS_PROMPT: &str = "📝 Enter city or address to save:";
const EMPTY_ADDRESS_PROMPT: &str = "✏️ Please enter a city name or press Cancel.";
const NO_ADDRESSES: &str = "📭 You don't have any saved addresses yet.\n\n\
Use Add Address button to save your first address!";
const CANCELLED: &str = "Cancelled.";
const ALREADY_SAVED: &str = "This address is already saved.";
const SAVE_FAILED: &str = "❌ Failed to save address. Please try again later.";
const NAVIGATE_HINT: &str = "\n\nUse buttons to navigate.";
const CONFIRM_DELETE: &str = "⚠️ Are you sure you want to delete this address?";
const DELETED: &str = "✅ Address deleted successfully!";
const DELETE_FAILED: &str = "❌ Failed to delete address.";
const ADDRESS_NOT_FOUND: &str = "❌ Address not found!";

/// Telegram rejects callback answers longer than this.
const MAX_ALERT_CHARS: usize = 200;

fn welcome_text(first_name: Option<&str>) -> String {
    let name = first_name.filter(|n| !n.trim().is_empty()).unwrap_or("friend");
    format!(
        "👋 Hello, {}!\n\n\
         I'm a weather bot. I can show you the weather in any city.\n\n\
         📍 You can save addresses and quickly get weather for them.\n\n\
         Use buttons below to interact with me:",
        html::escape(name)
    )
}

fn address_list_text(count: usize) -> String {
    format!(
        "📍 Your saved addresses ({}):\n\nClick on address to get weather or 🗑 to delete:",
        count
    )
}

fn saved_text(city: &str) -> String {
    format!("✅ Address '{}' has been saved!", html::escape(city))
}

fn truncate_alert(text: &str) -> String {
    text.chars().take(MAX_ALERT_CHARS).collect()
}

/// Drives the weather conversation for every update that reaches it.
pub struct ConversationHandler {
    bot: Arc<dyn Bot>,
    store: Arc<dyn AddressStore>,
    weather: Arc<dyn WeatherClient>,
    states: ConversationStates,
    bot_username: Arc<RwLock<Option<String>>>,
}

impl ConversationHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        store: Arc<dyn AddressStore>,
        weather: Arc<dyn WeatherClient>,
        states: ConversationStates,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            store,
            weather,
            states,
            bot_username,
        }
    }

    pub fn states(&self) -> &ConversationStates {
        &self.states
    }

    async fn reply(&self, chat: &Chat, text: &str, markup: Option<Markup>) -> Result<HandlerResponse> {
        self.bot.send_message(chat, text, markup.as_ref()).await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }

    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn on_message(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.as_str();
        if text.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }

        let username = self.bot_username.read().await.clone();
        if let Some(command) = Command::from_text(text, username.as_deref()) {
            return self.on_command(message, command).await;
        }

        if let Some(button) = MenuButton::from_text(text) {
            return self.on_menu(message, button).await;
        }

        match self.states.get(message.user.id).await {
            ConversationState::AwaitingAddress => self.on_address(message).await,
            ConversationState::Idle => self.on_city_lookup(message).await,
        }
    }

    async fn on_command(&self, message: &Message, command: Command) -> Result<HandlerResponse> {
        match command {
            Command::Start => {
                self.states.clear(message.user.id).await;
                let text = welcome_text(message.user.first_name.as_deref());
                self.reply(&message.chat, &text, Some(keyboards::main_menu()))
                    .await
            }
            Command::Help => self.reply(&message.chat, HELP_TEXT, None).await,
        }
    }

    async fn on_menu(&self, message: &Message, button: MenuButton) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        info!(user_id, button = button.name(), "Menu button pressed");
        match button {
            MenuButton::GetWeather | MenuButton::AddAddress => {
                self.states
                    .set(user_id, ConversationState::AwaitingAddress)
                    .await;
                let prompt = if button == MenuButton::GetWeather {
                    GET_WEATHER_PROMPT
                } else {
                    ADD_ADDRESS_PROMPT
                };
                self.reply(&message.chat, prompt, Some(keyboards::cancel_menu()))
                    .await
            }
            MenuButton::MyAddresses => {
                let addresses = self.store.list_addresses(user_id).await;
                if addresses.is_empty() {
                    return self
                        .reply(&message.chat, NO_ADDRESSES, Some(keyboards::main_menu()))
                        .await;
                }
                let text = address_list_text(addresses.len());
                let grid = keyboards::render_address_list(&addresses);
                self.reply(&message.chat, &text, Some(Markup::Inline(grid)))
                    .await
            }
            MenuButton::Help => self.reply(&message.chat, HELP_TEXT, None).await,
            MenuButton::Cancel => {
                self.states.clear(user_id).await;
                self.reply(&message.chat, CANCELLED, Some(keyboards::main_menu()))
                    .await
            }
        }
    }

    /// One-shot lookup outside the add-address flow; never persisted.
    async fn on_city_lookup(&self, message: &Message) -> Result<HandlerResponse> {
        let city = message.content.trim();
        if city.is_empty() {
            return Ok(HandlerResponse::Ignore);
        }
        let result = self.weather.fetch_weather(city).await;
        let mut text = format_message(&result);
        if let Err(e) = &result {
            info!(user_id = message.user.id, city = %city, error = %e, "Weather lookup failed");
            text.push_str(NAVIGATE_HINT);
        }
        self.reply(&message.chat, &text, Some(keyboards::main_menu()))
            .await
    }

    /// Add-address flow: look the city up, then save it unless already saved.
    async fn on_address(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user.id;
        let city = message.content.trim();
        if city.is_empty() {
            return self
                .reply(&message.chat, EMPTY_ADDRESS_PROMPT, Some(keyboards::cancel_menu()))
                .await;
        }

        let result = self.weather.fetch_weather(city).await;
        let weather_text = format_message(&result);
        if let Err(e) = &result {
            info!(user_id, city = %city, error = %e, "Weather lookup failed, address not saved");
            self.states.clear(user_id).await;
            return self
                .reply(&message.chat, &weather_text, Some(keyboards::main_menu()))
                .await;
        }

        self.bot
            .send_message(&message.chat, &weather_text, None)
            .await?;

        let existing = self.store.list_addresses(user_id).await;
        let text = if existing.iter().any(|a| a.matches(city)) {
            ALREADY_SAVED.to_string()
        } else if self.store.add_address(user_id, city).await {
            info!(user_id, city = %city, "Address saved");
            saved_text(city)
        } else {
            SAVE_FAILED.to_string()
        };

        self.states.clear(user_id).await;
        self.reply(&message.chat, &text, Some(keyboards::main_menu()))
            .await
    }

    #[instrument(skip(self, callback), fields(user_id = callback.user.id, data = %callback.data))]
    async fn on_callback(&self, callback: &Callback) -> Result<HandlerResponse> {
        let action = match CallbackAction::parse(&callback.data) {
            Ok(action) => action,
            Err(e) => {
                warn!(user_id = callback.user.id, error = %e, "Callback ignored");
                self.bot.answer_callback(&callback.id, None, false).await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        match action {
            CallbackAction::Weather(id) => self.on_weather_button(callback, id).await,
            CallbackAction::Delete(id) => {
                self.show(callback, CONFIRM_DELETE, Some(keyboards::confirmation(id)))
                    .await?;
                self.bot.answer_callback(&callback.id, None, false).await?;
                Ok(HandlerResponse::Reply(CONFIRM_DELETE.to_string()))
            }
            CallbackAction::ConfirmDelete(id) => {
                let user_id = callback.user.id;
                if self.store.delete_address(id, user_id).await {
                    info!(user_id, address_id = id, "Address deleted");
                    self.show(callback, DELETED, None).await?;
                    self.bot
                        .answer_callback(&callback.id, Some("Deleted!"), false)
                        .await?;
                    Ok(HandlerResponse::Reply(DELETED.to_string()))
                } else {
                    warn!(user_id, address_id = id, "Address not deleted");
                    self.show(callback, DELETE_FAILED, None).await?;
                    self.bot
                        .answer_callback(&callback.id, Some("Error!"), true)
                        .await?;
                    Ok(HandlerResponse::Reply(DELETE_FAILED.to_string()))
                }
            }
            CallbackAction::CancelDelete => {
                let addresses = self.store.list_addresses(callback.user.id).await;
                let text = self.show_list(callback, &addresses).await?;
                self.bot
                    .answer_callback(&callback.id, Some("Cancelled"), false)
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
        }
    }

    /// Looks the id up among the caller's own addresses only.
    async fn on_weather_button(&self, callback: &Callback, address_id: i64) -> Result<HandlerResponse> {
        let addresses = self.store.list_addresses(callback.user.id).await;
        let Some(address) = addresses.into_iter().find(|a| a.id == address_id) else {
            self.bot
                .answer_callback(&callback.id, Some(ADDRESS_NOT_FOUND), true)
                .await?;
            return Ok(HandlerResponse::Stop);
        };

        let result = self.weather.fetch_weather(&address.address).await;
        match &result {
            Ok(_) => {
                let text = format_message(&result);
                self.bot
                    .send_message(&self.callback_chat(callback), &text, None)
                    .await?;
                self.bot.answer_callback(&callback.id, None, false).await?;
                Ok(HandlerResponse::Reply(text))
            }
            Err(e) => {
                info!(user_id = callback.user.id, address_id, error = %e, "Weather lookup failed");
                let alert = truncate_alert(&e.to_string());
                self.bot
                    .answer_callback(&callback.id, Some(&alert), true)
                    .await?;
                Ok(HandlerResponse::Stop)
            }
        }
    }

    async fn show_list(&self, callback: &Callback, addresses: &[AddressRecord]) -> Result<String> {
        if addresses.is_empty() {
            self.show(callback, NO_ADDRESSES, None).await?;
            return Ok(NO_ADDRESSES.to_string());
        }
        let text = address_list_text(addresses.len());
        self.show(callback, &text, Some(keyboards::render_address_list(addresses)))
            .await?;
        Ok(text)
    }

    /// Edits the message carrying the pressed button; sends a new message when it is no longer accessible.
    async fn show(&self, callback: &Callback, text: &str, keyboard: Option<ButtonGrid>) -> Result<()> {
        match (&callback.chat, &callback.message_id) {
            (Some(chat), Some(message_id)) => {
                self.bot
                    .edit_message(chat, message_id, text, keyboard.as_ref())
                    .await
            }
            _ => {
                let markup = keyboard.map(Markup::Inline);
                self.bot
                    .send_message(&self.callback_chat(callback), text, markup.as_ref())
                    .await
            }
        }
    }

    /// Chat of the pressed button, or the user's private chat.
    fn callback_chat(&self, callback: &Callback) -> Chat {
        callback.chat.clone().unwrap_or_else(|| Chat {
            id: callback.user.id,
            chat_type: "private".to_string(),
        })
    }
}

#[async_trait]
impl Handler for ConversationHandler {
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        match update {
            Update::Message(message) => self.on_message(message).await,
            Update::Callback(callback) => self.on_callback(callback).await,
        }
    }
}
