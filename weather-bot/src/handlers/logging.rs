//! Logs each update in before() and the response in after().

use async_trait::async_trait;
use tracing::{debug, info, instrument};
use weather_core::{Handler, HandlerResponse, Result, Update};

/// Logs each update in before() and the response in after(); always continues.
pub struct LoggingHandler;

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user = update.user();
        let username = user.username.as_deref().unwrap_or("unknown");
        match update {
            Update::Message(m) => info!(
                user_id = user.id,
                username = %username,
                chat_id = m.chat.id,
                message_content = %m.content,
                "Received message"
            ),
            Update::Callback(c) => info!(
                user_id = user.id,
                username = %username,
                callback_data = %c.data,
                "Received callback"
            ),
        }
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            user_id = update.user().id,
            kind = update.kind(),
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}
