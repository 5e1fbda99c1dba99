/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Inbound "start" handshake forwarded by the transport adapter.
///
/// Carries the principal identity (messenger username) and the chat the
/// command came from; the orchestrator decides whether it binds.
#[derive(Clone, Debug)]
pub struct Handshake {
    pub username: Option<String>,
    pub chat_id: ChatId,
}
