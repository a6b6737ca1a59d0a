use std::future::Future;
use std::time::Duration;

use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::{Bot, Requester};
use teloxide::types::{ChatId, MessageEntity};
use wlchecker_format::{Dialect, SplitOptions, split_text_with_entities};

use crate::config::MessageLimits;
use crate::convert::to_telegram_entities;
use crate::error::BotResult;

/// Sends one chunk of text with explicit entities.
pub trait ChunkSender {
    fn send_chunk(
        &self,
        chat_id: ChatId,
        text: String,
        entities: Vec<MessageEntity>,
    ) -> impl Future<Output = BotResult<()>> + Send;
}

impl ChunkSender for Bot {
    async fn send_chunk(
        &self,
        chat_id: ChatId,
        text: String,
        entities: Vec<MessageEntity>,
    ) -> BotResult<()> {
        self.send_message(chat_id, text).entities(entities).await?;
        Ok(())
    }
}

/// Parses `markup`, splits it to fit `limits` and sends the chunks in order.
///
/// A chunk that fails to send is logged and skipped. Returns how many chunks
/// were delivered.
pub async fn send_long_message<S: ChunkSender>(
    sender: &S,
    chat_id: ChatId,
    markup: &str,
    dialect: Dialect,
    limits: &MessageLimits,
) -> BotResult<usize> {
    let (text, entities) = dialect.parse(markup);
    if text.is_empty() {
        tracing::debug!(%chat_id, "nothing to send");
        return Ok(0);
    }

    let options = SplitOptions::new(limits.max_length, limits.max_entities)?;
    let chunks = split_text_with_entities(&text, &entities, &options)?;
    let total = chunks.len();
    let mut sent = 0;

    for (index, chunk) in chunks.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(Duration::from_millis(limits.chunk_delay_ms)).await;
        }

        let entities = to_telegram_entities(&chunk.entities);
        match sender.send_chunk(chat_id, chunk.text, entities).await {
            Ok(()) => sent += 1,
            Err(error) => {
                tracing::error!(%error, %chat_id, chunk = index, total, "Failed to send message chunk");
            }
        }
    }

    tracing::info!(%chat_id, sent, total, "message sent");

    Ok(sent)
}
