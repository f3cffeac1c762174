//! Dispatcher runner: converts teloxide messages and callback queries to core updates and passes them to HandlerChain.
//! Replies produced by the chain are sent back to the update's chat through the core [`Bot`](dbot_core::Bot).

use anyhow::Result;
use dbot_core::{Bot as CoreBot, HandlerResponse, ToCoreUpdate, Update};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Shared state handed to every dispatcher endpoint.
struct DispatchContext {
    chain: HandlerChain,
    bot: Arc<dyn CoreBot>,
}

/// Runs the chain for one update and sends any reply messages. Returns how many messages were sent.
/// Send failures are logged and do not stop the remaining messages. A photo that fails to send
/// is retried once as a text message carrying its caption.
#[instrument(skip(chain, bot, update), fields(update_id = %update.id(), kind = update.kind()))]
pub async fn deliver_update(
    chain: &HandlerChain,
    bot: &dyn CoreBot,
    update: &Update,
) -> dbot_core::Result<usize> {
    let response = chain.handle(update).await?;
    let messages = match response {
        HandlerResponse::Reply(messages) => messages,
        other => {
            debug!(response = ?other, "No reply for update");
            return Ok(0);
        }
    };

    let chat = update.chat();
    let mut sent = 0;
    for message in &messages {
        match bot.send(chat, message).await {
            Ok(()) => sent += 1,
            Err(e) => match message.caption_fallback() {
                Some(fallback) => {
                    warn!(error = %e, chat_id = chat.id, "Photo rejected, sending caption as text");
                    match bot.send(chat, &fallback).await {
                        Ok(()) => sent += 1,
                        Err(e) => error!(error = %e, chat_id = chat.id, "Failed to send reply"),
                    }
                }
                None => error!(error = %e, chat_id = chat.id, "Failed to send reply"),
            },
        }
    }
    info!(chat_id = chat.id, sent, total = messages.len(), "step: replies delivered");
    Ok(sent)
}

fn spawn_delivery(ctx: Arc<DispatchContext>, update: Update) {
    tokio::spawn(async move {
        info!(
            user_id = update.user().id,
            chat_id = update.chat().id,
            update_id = %update.id(),
            "step: processing update (handler chain started)"
        );
        if let Err(e) = deliver_update(&ctx.chain, ctx.bot.as_ref(), &update).await {
            error!(error = %e, user_id = update.user().id, "Handler chain failed");
        }
    });
}

async fn on_message(msg: teloxide::types::Message, ctx: Arc<DispatchContext>) -> ResponseResult<()> {
    match TelegramMessageWrapper(&msg).to_core() {
        Some(update) => {
            info!(
                user_id = update.user().id,
                chat_id = update.chat().id,
                message_content = %update.payload(),
                "Received message"
            );
            spawn_delivery(ctx, update);
        }
        None => debug!(chat_id = msg.chat.id.0, "Received non-text message"),
    }
    Ok(())
}

async fn on_callback(
    bot: Bot,
    query: teloxide::types::CallbackQuery,
    ctx: Arc<DispatchContext>,
) -> ResponseResult<()> {
    // Always answer so the client stops showing the loading spinner.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }
    match TelegramCallbackWrapper(&query).to_core() {
        Some(update) => {
            info!(
                user_id = update.user().id,
                chat_id = update.chat().id,
                data = %update.payload(),
                "Received callback"
            );
            spawn_delivery(ctx, update);
        }
        None => debug!("Received callback query without data"),
    }
    Ok(())
}

/// Starts long polling with the given teloxide Bot and HandlerChain until Ctrl-C.
/// Calls get_me() first so a bad token fails loudly; every update is handled in its own task.
#[instrument(skip(bot, handler_chain, core_bot))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    core_bot: Arc<dyn CoreBot>,
) -> Result<()> {
    let me = bot.get_me().await?;
    info!(
        username = %me.user.username.as_deref().unwrap_or("unknown"),
        "Bot identity resolved, starting dispatcher"
    );

    let ctx = Arc::new(DispatchContext {
        chain: handler_chain,
        bot: core_bot,
    });

    let handler = dptree::entry()
        .branch(teloxide::types::Update::filter_message().endpoint(on_message))
        .branch(teloxide::types::Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![ctx])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
