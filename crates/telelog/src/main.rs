use std::sync::Arc;

use telelog_core::{config::Config, logger::TeleLogger};
use telelog_telegram::TelegramTransport;

#[tokio::main]
async fn main() -> Result<(), telelog_core::Error> {
    telelog_core::logging::init("telelog")?;

    let cfg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "telelog.yaml".to_string());
    let cfg = Arc::new(Config::load(&cfg_path)?);

    let transport = Arc::new(TelegramTransport::new(&cfg.token));
    let logger = Arc::new(TeleLogger::new(cfg, transport.clone())?);

    telelog_telegram::run_polling(logger.clone(), transport)
        .await
        .map_err(|e| telelog_core::Error::Transport(format!("polling failed: {e}")))?;

    logger.stop(false).await;
    Ok(())
}
