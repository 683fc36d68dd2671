use anyhow::Result;
use tracing::{info, instrument};
use weather_core::{init_tracing, mask_secret};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::telegram::run_dispatcher;

/// Main entry: validate config, init logging, build components and chain, then run the dispatcher.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    if let Some(dir) = std::path::Path::new(config.log_file()).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    init_tracing(config.log_file())?;

    info!(
        database_url = %config.database_url(),
        bot_token = %mask_secret(config.bot_token()),
        weather_api_key = %mask_secret(&config.weather().api_key),
        "Initializing bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);

    info!("Bot started successfully");

    run_dispatcher(
        components.teloxide_bot.clone(),
        handler_chain,
        components.bot_username.clone(),
    )
    .await
}
