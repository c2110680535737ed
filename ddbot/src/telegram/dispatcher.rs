//! Long-polling dispatcher feeding every incoming message into the handler chain.

use ddbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::dptree;
use teloxide::prelude::*;
use tracing::{error, info, instrument};

use super::adapters::TelegramMessageWrapper;

/// Runs one text message through the chain and returns once every handler has finished.
///
/// Chain errors are logged, never returned, so a failing handler does not stop the dispatcher.
pub async fn handle_update(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    if msg.text().is_none() {
        return respond(());
    }

    let core_msg = TelegramMessageWrapper(&msg).to_core();
    if let Err(e) = chain.handle(&core_msg).await {
        error!(
            error = %e,
            user_id = core_msg.user_id(),
            chat_id = core_msg.chat.id,
            "Handler chain failed"
        );
    }
    respond(())
}

/// Polls updates until the returned future is dropped. Messages are handled concurrently across
/// chats and in arrival order within a chat.
///
/// No Ctrl-C handler is installed; shutdown signals are owned by the lifecycle manager.
#[instrument(skip(bot, chain))]
pub async fn dispatch(bot: teloxide::Bot, chain: HandlerChain) -> anyhow::Result<()> {
    let handler = Update::filter_message().endpoint(handle_update);

    info!("Starting update dispatcher");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![chain])
        .build()
        .dispatch()
        .await;

    Ok(())
}
