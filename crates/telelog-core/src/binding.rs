//! Destination chat identity.
//!
//! Starts unbound (unless a chat id was configured) and transitions to bound
//! at most once, on the first `/start` handshake from the configured
//! username. There is no transition back: later handshakes are ignored, which
//! keeps the greeting and the config write-back from repeating.

use tokio::sync::Mutex;

use crate::domain::{ChatId, Handshake};

/// Outcome of a handshake attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindOutcome {
    /// First accepted handshake; the caller should greet and persist.
    Bound(ChatId),
    /// Already bound; nothing to do.
    AlreadyBound,
    /// Principal does not match the configured username.
    Rejected,
}

pub struct ChatBinding {
    username: String,
    chat_id: Mutex<Option<ChatId>>,
}

impl ChatBinding {
    pub fn new(username: String, preset: Option<ChatId>) -> Self {
        Self {
            username,
            chat_id: Mutex::new(preset),
        }
    }

    /// Current destination, read by the send path and the redelivery worker.
    pub async fn chat_id(&self) -> Option<ChatId> {
        *self.chat_id.lock().await
    }

    pub async fn is_bound(&self) -> bool {
        self.chat_id.lock().await.is_some()
    }

    /// Unbound -> Bound transition. The identity check and the store happen
    /// under one lock so concurrent handshakes bind exactly once.
    pub async fn try_bind(&self, handshake: &Handshake) -> BindOutcome {
        if handshake.username.as_deref() != Some(self.username.as_str()) {
            return BindOutcome::Rejected;
        }

        let mut chat_id = self.chat_id.lock().await;
        if chat_id.is_some() {
            return BindOutcome::AlreadyBound;
        }
        *chat_id = Some(handshake.chat_id);
        BindOutcome::Bound(handshake.chat_id)
    }
}
