//! The orchestrator: leveled log calls fan out to the file sink and, at or
//! above the chat threshold, to the bound destination chat.
//!
//! Delivery problems never surface to the log-call caller: file writes are
//! best-effort and a failed chat send lands in the redelivery queue.

use std::sync::{
    atomic::{AtomicU8, Ordering},
    Arc,
};

use chrono::Local;

use crate::{
    binding::{BindOutcome, ChatBinding},
    config::Config,
    domain::{ChatId, Handshake},
    format,
    level::Level,
    queue::RedeliveryQueue,
    sink::FileSink,
    transport::MessageTransport,
    Error, Result,
};

pub struct TeleLogger {
    cfg: Arc<Config>,
    transport: Arc<dyn MessageTransport>,
    binding: Arc<ChatBinding>,
    sink: FileSink,
    queue: Arc<RedeliveryQueue>,
    threshold: AtomicU8,
}

impl TeleLogger {
    pub fn new(cfg: Arc<Config>, transport: Arc<dyn MessageTransport>) -> Result<Self> {
        let sink = FileSink::open(cfg.mode, &cfg.paths)?;
        let binding = Arc::new(ChatBinding::new(
            cfg.username.clone(),
            cfg.chat_id.map(ChatId),
        ));
        let queue = Arc::new(RedeliveryQueue::new(transport.clone(), binding.clone()));

        Ok(Self {
            threshold: AtomicU8::new(cfg.level),
            cfg,
            transport,
            binding,
            sink,
            queue,
        })
    }

    pub async fn debug(&self, message: &str) {
        self.record_log(Level::Debug, message).await;
    }

    pub async fn info(&self, message: &str) {
        self.record_log(Level::Info, message).await;
    }

    pub async fn warning(&self, message: &str) {
        self.record_log(Level::Warning, message).await;
    }

    pub async fn error(&self, message: &str) {
        self.record_log(Level::Error, message).await;
    }

    pub async fn critical(&self, message: &str) {
        self.record_log(Level::Critical, message).await;
    }

    /// Current chat threshold value.
    pub fn level(&self) -> u8 {
        self.threshold.load(Ordering::Relaxed)
    }

    pub fn set_level(&self, level: u8) -> Result<()> {
        if !Level::is_valid(level) {
            return Err(Error::UnknownLevel(level));
        }
        self.threshold.store(level, Ordering::Relaxed);
        Ok(())
    }

    pub async fn chat_id(&self) -> Option<ChatId> {
        self.binding.chat_id().await
    }

    async fn record_log(&self, level: Level, message: &str) {
        let now = Local::now();

        let entry = format::file_entry(level, message, now, &self.cfg.dtf);
        self.sink.write(level.name(), &entry);

        // Below the threshold the transport is never touched, bound or not.
        if level.value() < self.level() {
            return;
        }

        let emoji = self
            .cfg
            .emojis
            .get(level.name())
            .map(String::as_str)
            .unwrap_or("");
        let chat_entry =
            format::chat_entry(level, message, now, &self.cfg.project, emoji, &self.cfg.dtf);

        let delivered = match self.binding.chat_id().await {
            Some(chat_id) => self.transport.send_message(chat_id, &chat_entry).await.is_ok(),
            None => false,
        };

        if !delivered {
            self.queue.enqueue(chat_entry).await;
            self.queue.ensure_worker_running().await;
        }
    }

    /// Handle an inbound `/start` handshake from the transport adapter.
    ///
    /// The first handshake from the configured username binds the chat,
    /// appends the id to the config file and greets; anything else is
    /// ignored.
    pub async fn handle_start(&self, handshake: Handshake) {
        match self.binding.try_bind(&handshake).await {
            BindOutcome::Bound(chat_id) => {
                if let Err(e) = self.cfg.persist_chat_id(chat_id.0) {
                    eprintln!("[telelog] failed to persist chat_id: {e}");
                }
                if let Err(e) = self.transport.send_message(chat_id, &self.cfg.greeting).await {
                    eprintln!("[telelog] greeting failed: {e}");
                }
            }
            BindOutcome::AlreadyBound | BindOutcome::Rejected => {}
        }
    }

    /// Teardown: stop inbound polling, settle the redelivery worker, release
    /// the file streams. Safe to call more than once.
    ///
    /// `force` cancels the worker at its next checkpoint instead of waiting
    /// for the queue to drain.
    pub async fn stop(&self, force: bool) {
        self.transport.stop_polling().await;

        if force {
            self.queue.shutdown();
        } else {
            self.queue.join_worker().await;
        }

        self.sink.close();
    }
}
