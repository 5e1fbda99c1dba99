//! Failed-delivery requeue and redelivery.
//!
//! An unbounded FIFO of formatted chat entries plus at most one background
//! worker. The worker pops the head and retries that same entry until a send
//! succeeds, then moves on; when the queue is empty it exits. The emptiness
//! check and the worker-exit flag flip happen under the same lock `enqueue`
//! takes, so an entry enqueued concurrently with worker exit is either seen
//! by the exiting worker or observes no worker and spawns a fresh one.

use std::{sync::Arc, time::Duration};

use std::collections::VecDeque;

use tokio::{sync::Mutex, task::JoinHandle, time::sleep};
use tokio_util::sync::CancellationToken;

use crate::{binding::ChatBinding, transport::MessageTransport, Error};

/// Spacing between redelivery attempts. The retry is still unbounded in
/// count; the delay only keeps it from busy-spinning against the transport.
const RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Default)]
struct QueueState {
    items: VecDeque<String>,
    running: bool,
    handle: Option<JoinHandle<()>>,
    starts: u64,
}

pub struct RedeliveryQueue {
    transport: Arc<dyn MessageTransport>,
    binding: Arc<ChatBinding>,
    retry_delay: Duration,
    cancel: CancellationToken,
    state: Mutex<QueueState>,
}

impl RedeliveryQueue {
    pub fn new(transport: Arc<dyn MessageTransport>, binding: Arc<ChatBinding>) -> Self {
        Self::with_retry_delay(transport, binding, RETRY_DELAY)
    }

    pub fn with_retry_delay(
        transport: Arc<dyn MessageTransport>,
        binding: Arc<ChatBinding>,
        retry_delay: Duration,
    ) -> Self {
        Self {
            transport,
            binding,
            retry_delay,
            cancel: CancellationToken::new(),
            state: Mutex::new(QueueState::default()),
        }
    }

    /// Append a chat entry for redelivery. Callers must follow up with
    /// `ensure_worker_running`, since a previous worker may already have
    /// drained the queue and exited.
    pub async fn enqueue(&self, text: String) {
        self.state.lock().await.items.push_back(text);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.lock().await.items.is_empty()
    }

    pub async fn is_worker_running(&self) -> bool {
        self.state.lock().await.running
    }

    /// Total number of workers ever spawned; at most one is alive at a time.
    pub async fn worker_starts(&self) -> u64 {
        self.state.lock().await.starts
    }

    /// Guarded spawn: checks and flips the `running` flag under the queue
    /// lock, so two concurrent callers can never start two workers.
    pub async fn ensure_worker_running(self: &Arc<Self>) {
        if self.cancel.is_cancelled() {
            return;
        }

        let mut state = self.state.lock().await;
        if state.running {
            return;
        }
        state.running = true;
        state.starts += 1;

        let queue = Arc::clone(self);
        state.handle = Some(tokio::spawn(async move { queue.drain().await }));
    }

    async fn drain(self: Arc<Self>) {
        loop {
            let item = {
                let mut state = self.state.lock().await;
                match state.items.pop_front() {
                    Some(item) => item,
                    None => {
                        state.running = false;
                        state.handle = None;
                        return;
                    }
                }
            };

            if !self.send_until_delivered(&item).await {
                // Cancelled mid-retry: keep the entry at the head for a
                // future worker instead of dropping it.
                let mut state = self.state.lock().await;
                state.items.push_front(item);
                state.running = false;
                state.handle = None;
                return;
            }
        }
    }

    /// Blocking retry of one entry. Returns false only on cancellation.
    async fn send_until_delivered(&self, item: &str) -> bool {
        loop {
            if self.cancel.is_cancelled() {
                return false;
            }

            let attempt = match self.binding.chat_id().await {
                Some(chat_id) => self.transport.send_message(chat_id, item).await,
                None => Err(Error::SendRejected("destination chat not bound".to_string())),
            };

            match attempt {
                Ok(()) => return true,
                Err(_) => {
                    tokio::select! {
                        _ = sleep(self.retry_delay) => {}
                        _ = self.cancel.cancelled() => return false,
                    }
                }
            }
        }
    }

    /// Wait for the current worker (if any) to finish draining.
    pub async fn join_worker(&self) {
        let handle = { self.state.lock().await.handle.take() };
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    /// Ask the worker to stop at its next checkpoint. No new workers start
    /// after this.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}
