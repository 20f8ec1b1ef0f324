pub mod stdout;
pub mod tg;

use std::time::Duration;

use async_trait::async_trait;
use env::Env;
use thiserror::Error;

pub use stdout::StdoutNotifier;
pub use tg::TgNotifier;

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short sink name for logs.
    fn name(&self) -> &'static str;

    async fn notify(&self, message: &str) -> Result<(), DeliveryError>;
}

/// Telegram when both the token and the chat are configured, stdout otherwise.
pub fn from_env(env: &Env) -> eyre::Result<Box<dyn Notifier>> {
    match env.telegram() {
        Some((token, chat_id)) => Ok(Box::new(TgNotifier::new(
            token,
            chat_id,
            env.tg_delay(),
        )?)),
        None => {
            log::warn!("Telegram config missing, reports go to stdout");
            Ok(Box::new(StdoutNotifier::new()))
        }
    }
}

/// Sends `blocks` in order, pausing `delay` between consecutive ones.
///
/// A failed block is logged and skipped. Returns the number delivered.
pub async fn deliver_all<N>(notifier: &N, blocks: &[String], delay: Duration) -> usize
where
    N: Notifier + ?Sized,
{
    let mut delivered = 0;
    for (idx, block) in blocks.iter().enumerate() {
        if idx > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        log::debug!("Sending report block {}/{}", idx + 1, blocks.len());
        match notifier.notify(block).await {
            Ok(()) => delivered += 1,
            Err(err) => log::error!(
                "Failed to deliver report block {}/{}: {}. Msg:[{}]",
                idx + 1,
                blocks.len(),
                err,
                block
            ),
        }
    }
    delivered
}
