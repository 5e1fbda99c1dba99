use async_trait::async_trait;

use crate::{domain::ChatId, Result};

/// Outbound messaging port.
///
/// Telegram is the first implementation. Adapters must map a delivery
/// rejection (unknown/invalid chat and the like) to `Error::SendRejected`,
/// since that is what routes an entry into the redelivery queue; everything
/// else maps to `Error::Transport`.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_message(&self, chat_id: ChatId, text: &str) -> Result<()>;

    /// Stop inbound update polling, if running. Idempotent.
    async fn stop_polling(&self);
}
