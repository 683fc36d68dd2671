//! # weather-core
//!
//! Core types and traits for the weather bot: [`Bot`], [`Handler`], updates (message / callback),
//! keyboard presentation types, errors and tracing initialization. Transport-agnostic; the
//! Telegram implementation lives in the weather-bot crate.

pub mod bot;
pub mod error;
pub mod keyboard;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{BotError, HandlerError, Result};
pub use keyboard::{ButtonGrid, InlineButton, Markup, ReplyKeyboard};
pub use logger::{init_tracing, mask_secret};
pub use types::{
    Callback, Chat, Handler, HandlerResponse, Message, ToCoreCallback, ToCoreMessage, ToCoreUser,
    Update, User,
};
