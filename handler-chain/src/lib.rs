//! # Handler chain
//!
//! Runs a sequence of handlers for each message. All `before` run in order (any false stops the
//! chain); then `handle` runs until a handler returns Stop or Reply; then all `after` run in reverse.
//! Command handlers advertise their commands through [`Handler::commands`]; the chain collects them
//! in registration order for the transport's command menu and the help text.

use ddbot_core::{BotCommand, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of handlers: before (all) → handle (until Stop/Reply) → after (reverse).
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Appends several handlers, keeping their order.
    pub fn add_handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        self.handlers.extend(handlers);
        self
    }

    /// Number of handlers in the chain.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Commands advertised by all handlers, in chain order.
    pub fn commands(&self) -> Vec<BotCommand> {
        self.handlers.iter().flat_map(|h| h.commands()).collect()
    }

    /// Runs all before → handle until Stop/Reply → all after in reverse.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let user_id = message.user_id();
        let mut final_response = HandlerResponse::Continue;

        debug!(
            user_id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for h in &self.handlers {
            if !h.before(message).await? {
                let name = std::any::type_name_of_val(h.as_ref());
                info!(user_id, handler = %name, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        for h in &self.handlers {
            let response = h.handle(message).await?;
            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    let name = std::any::type_name_of_val(h.as_ref());
                    debug!(user_id, handler = %name, response = ?response, "step: handler ended the chain");
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => {}
            }
        }

        for h in self.handlers.iter().rev() {
            h.after(message, &final_response).await?;
        }

        debug!(
            user_id,
            chat_id = message.chat.id,
            message_id = %message.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

// Tests live in tests/handler_chain_test.rs
