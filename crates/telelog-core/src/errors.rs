/// Core error type for the relay.
///
/// Adapter crates should map their specific errors into this type so the
/// delivery core can tell a rejected send (requeue it) from everything else.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("unknown logging level: {0}")]
    UnknownLevel(u8),

    #[error("unknown logging level name: {0}")]
    UnknownLevelName(String),

    #[error("send rejected: {0}")]
    SendRejected(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
