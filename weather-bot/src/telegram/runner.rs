//! Dispatcher runner: converts teloxide messages and callback queries to core updates and passes
//! them to HandlerChain. Registers the command list and caches the bot username before polling.
//!
//! The dispatcher's default distribution keys updates by chat, so one chat's updates are handled
//! in order while different chats run concurrently.

use crate::chain::HandlerChain;
use crate::commands::Command;
use std::sync::Arc;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument, warn};
use weather_core::{ToCoreCallback, ToCoreMessage, Update as CoreUpdate};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

async fn run_chain(chain: &HandlerChain, update: CoreUpdate) {
    if let Err(e) = chain.handle(&update).await {
        error!(
            error = %e,
            user_id = update.user().id,
            kind = update.kind(),
            "Handler chain failed"
        );
    }
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    if core_msg.content.is_empty() {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        );
    }
    run_chain(&chain, CoreUpdate::Message(core_msg)).await;
    Ok(())
}

async fn on_callback(q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    let callback = TelegramCallbackWrapper(&q).to_core();
    run_chain(&chain, CoreUpdate::Callback(callback)).await;
    Ok(())
}

/// Starts the dispatcher with the given teloxide Bot, HandlerChain, and bot_username cache.
/// Runs until Ctrl-C.
#[instrument(skip(bot, handler_chain, bot_username))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    bot_username: Arc<tokio::sync::RwLock<Option<String>>>,
) -> anyhow::Result<()> {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set before dispatch");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed, commands with @botname suffix will not match"),
    }

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler = dptree::entry()
        .branch(teloxide::types::Update::filter_message().endpoint(on_message))
        .branch(teloxide::types::Update::filter_callback_query().endpoint(on_callback));

    info!("Dispatcher started");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
