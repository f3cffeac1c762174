//! Logs each update in before() and the chain's response in after(); always continues.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Result, Update};
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl LoggingHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user = update.user();
        info!(
            user_id = user.id,
            username = %user.username.as_deref().unwrap_or("unknown"),
            chat_id = update.chat().id,
            kind = update.kind(),
            payload = %update.payload(),
            "Received update"
        );
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        let replies = match response {
            HandlerResponse::Reply(messages) => messages.len(),
            _ => 0,
        };
        debug!(
            update_id = %update.id(),
            replies,
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}
