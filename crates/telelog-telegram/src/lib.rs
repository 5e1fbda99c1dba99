//! Telegram adapter (teloxide).
//!
//! This crate implements the `telelog-core` MessageTransport over the
//! Telegram Bot API and runs the long-polling loop that feeds `/start`
//! handshakes to the orchestrator.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::{
    dispatching::{Dispatcher, ShutdownToken},
    dptree,
    prelude::*,
};
use tokio::sync::Mutex;

use telelog_core::{
    domain::{ChatId, Handshake},
    logger::TeleLogger,
    transport::MessageTransport,
    Error, Result,
};

pub struct TelegramTransport {
    bot: Bot,
    shutdown: Mutex<Option<ShutdownToken>>,
}

impl TelegramTransport {
    pub fn new(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
            shutdown: Mutex::new(None),
        }
    }

    pub fn bot(&self) -> Bot {
        self.bot.clone()
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        match e {
            // The API declined the delivery (bad chat, blocked bot, ...):
            // the core requeues these for redelivery.
            teloxide::RequestError::Api(api) => {
                Error::SendRejected(format!("telegram rejected send: {api}"))
            }
            other => Error::Transport(format!("telegram error: {other}")),
        }
    }
}

#[async_trait]
impl MessageTransport for TelegramTransport {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        self.bot
            .send_message(teloxide::types::ChatId(chat_id.0), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn stop_polling(&self) {
        let token = { self.shutdown.lock().await.take() };
        if let Some(token) = token {
            if let Ok(done) = token.shutdown() {
                done.await;
            }
        }
    }
}

/// Run long polling until shutdown, routing `/start` messages to the
/// orchestrator's binding handshake.
pub async fn run_polling(
    logger: Arc<TeleLogger>,
    transport: Arc<TelegramTransport>,
) -> anyhow::Result<()> {
    let bot = transport.bot();

    if let Ok(me) = bot.get_me().await {
        println!("telelog started: @{}", me.username());
    }

    let handler = Update::filter_message().endpoint(handle_message);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![logger])
        .build();

    *transport.shutdown.lock().await = Some(dispatcher.shutdown_token());

    dispatcher.dispatch().await;
    Ok(())
}

async fn handle_message(msg: Message, logger: Arc<TeleLogger>) -> ResponseResult<()> {
    let is_start = msg
        .text()
        .map(|t| t == "/start" || t.starts_with("/start "))
        .unwrap_or(false);

    if is_start {
        let handshake = Handshake {
            username: msg.chat.username().map(str::to_string),
            chat_id: ChatId(msg.chat.id.0),
        };
        logger.handle_start(handshake).await;
    }

    Ok(())
}
