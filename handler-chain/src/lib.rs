//! # Handler chain
//!
//! Runs a sequence of handlers for each update: every `before` in order (any may stop the chain),
//! then `handle` until the first Stop or Reply, then every `after` in reverse order.

use dbot_core::{Handler, HandlerResponse, Result, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers. Cheap to clone; handlers are shared.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler (runs in order; first Stop/Reply ends handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before hooks, then handlers; then after hooks in reverse. Returns first Stop or Reply, or Continue.
    #[instrument(skip(self, update))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        info!(
            user_id = update.user().id,
            chat_id = update.chat().id,
            update_id = %update.id(),
            kind = update.kind(),
            "step: handler_chain started"
        );

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(update).await? {
                info!(
                    user_id = update.user().id,
                    handler = %handler_name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(update).await?;
            debug!(
                handler = %handler_name,
                response = ?response,
                "Handler processed"
            );
            let (response_type, reply_count) = match &response {
                HandlerResponse::Continue => ("Continue", None),
                HandlerResponse::Stop => ("Stop", None),
                HandlerResponse::Ignore => ("Ignore", None),
                HandlerResponse::Reply(messages) => ("Reply", Some(messages.len())),
            };
            info!(
                user_id = update.user().id,
                handler = %handler_name,
                response_type = %response_type,
                reply_count = ?reply_count,
                "step: handler done"
            );

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(update, &final_response).await?;
        }

        info!(
            user_id = update.user().id,
            chat_id = update.chat().id,
            update_id = %update.id(),
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
