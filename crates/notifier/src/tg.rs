use std::{future::Future, time::Duration};

use async_trait::async_trait;
use eyre::{Context as _, Error};
use teloxide::{prelude::Requester as _, types::ChatId, Bot};

use crate::{DeliveryError, Notifier};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Telegram rejects longer messages.
pub const MAX_MESSAGE_LEN: usize = 4096;

pub struct TgNotifier {
    bot: Bot,
    chat_id: ChatId,
    delay: Duration,
}

impl TgNotifier {
    /// `delay` separates the parts of a message that had to be split.
    pub fn new(token: &str, chat_id: i64, delay: Duration) -> Result<Self, Error> {
        let client = teloxide::net::default_reqwest_settings()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build telegram http client")?;
        Ok(TgNotifier {
            bot: Bot::with_client(token, client),
            chat_id: ChatId(chat_id),
            delay,
        })
    }
}

#[async_trait]
impl Notifier for TgNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> Result<(), DeliveryError> {
        send_in_parts(message, MAX_MESSAGE_LEN, self.delay, |part| async move {
            self.bot.send_message(self.chat_id, part).await?;
            Ok::<(), DeliveryError>(())
        })
        .await
    }
}

/// Splits `message` and sends every non-blank part, pausing `delay` between sends.
pub async fn send_in_parts<F, Fut>(
    message: &str,
    limit: usize,
    delay: Duration,
    mut send: F,
) -> Result<(), DeliveryError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<(), DeliveryError>>,
{
    let mut sent = 0;
    for part in split_message(message, limit) {
        // telegram refuses empty texts
        if part.trim().is_empty() {
            continue;
        }
        if sent > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        send(part).await?;
        sent += 1;
    }
    Ok(())
}

/// Splits `text` into parts of at most `limit` chars, on line breaks where possible.
///
/// Unless a single line is longer than `limit`, joining the parts with `\n`
/// gives back `text`.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut parts = Vec::new();
    let mut current: Option<(String, usize)> = None;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        if let Some((part, len)) = current.as_mut() {
            if *len + 1 + line_len <= limit {
                part.push('\n');
                part.push_str(line);
                *len += 1 + line_len;
                continue;
            }
        }
        if let Some((part, _)) = current.take() {
            parts.push(part);
        }

        let mut chunks = Vec::new();
        let mut chars = line.chars().peekable();
        while chars.peek().is_some() {
            chunks.push(chars.by_ref().take(limit).collect::<String>());
        }
        let last = chunks.pop().unwrap_or_default();
        parts.extend(chunks);
        let last_len = last.chars().count();
        current = Some((last, last_len));
    }

    if let Some((part, _)) = current {
        parts.push(part);
    }
    parts
}
