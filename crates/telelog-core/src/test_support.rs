//! Scripted transport for core tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};

use crate::{domain::ChatId, transport::MessageTransport, Error, Result};

pub(crate) struct MockTransport {
    /// Number of upcoming sends to reject.
    reject_first: AtomicUsize,
    /// Sends wait until the gate is open.
    gate: watch::Sender<bool>,
    pub(crate) sent: Mutex<Vec<(ChatId, String)>>,
    pub(crate) stop_calls: AtomicUsize,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::build(0, true)
    }

    /// Reject the first `n` sends with `SendRejected`, then accept.
    pub(crate) fn rejecting(n: usize) -> Self {
        Self::build(n, true)
    }

    /// Sends block until `open_gate` is called.
    pub(crate) fn gated() -> Self {
        Self::build(0, false)
    }

    fn build(reject_first: usize, gate_open: bool) -> Self {
        Self {
            reject_first: AtomicUsize::new(reject_first),
            gate: watch::channel(gate_open).0,
            sent: Mutex::new(Vec::new()),
            stop_calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn open_gate(&self) {
        let _ = self.gate.send(true);
    }

    pub(crate) async fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|(_, t)| t.clone()).collect()
    }

    fn take_rejection(&self) -> bool {
        self.reject_first
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl MessageTransport for MockTransport {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()> {
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;

        if self.take_rejection() {
            return Err(Error::SendRejected("scripted rejection".to_string()));
        }

        self.sent.lock().await.push((chat_id, text.to_string()));
        Ok(())
    }

    async fn stop_polling(&self) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
    }
}
