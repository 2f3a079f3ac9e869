use std::{collections::HashSet, path::PathBuf};

use crate::{clock, error::Result, record::Table};

use super::{Message, MessageKey, ReadReceipt};

/// Messages plus a keyed log of read receipts.
///
/// Neither file is ever rewritten: sending appends a message, marking read
/// appends a receipt, and listings fold the receipts over the messages.
#[derive(Debug)]
pub struct MessageStore {
    messages: Table<Message>,
    receipts: Table<ReadReceipt>,
}

impl MessageStore {
    pub fn new(messages: impl Into<PathBuf>, receipts: impl Into<PathBuf>) -> Self {
        Self {
            messages: Table::new(messages),
            receipts: Table::new(receipts),
        }
    }

    pub async fn init(&self) -> Result<()> {
        self.messages.init().await?;
        self.receipts.init().await
    }

    pub async fn send(&self, from_name: &str, to_name: &str, body: &str) -> Result<Message> {
        let msg = Message {
            from_name: from_name.to_owned(),
            to_name: to_name.to_owned(),
            body: body.to_owned(),
            timestamp: clock::timestamp(),
            is_read: false,
        };
        self.insert(&msg).await?;
        Ok(msg)
    }

    pub async fn insert(&self, msg: &Message) -> Result<()> {
        self.messages.append(msg).await?;
        tracing::info!(from = %msg.from_name, to = %msg.to_name, "message sent");
        Ok(())
    }

    async fn read_keys(&self) -> Result<HashSet<MessageKey>> {
        Ok(self
            .receipts
            .scan()
            .await?
            .into_iter()
            .map(|receipt| receipt.key)
            .collect())
    }

    /// Every message with its current read state, oldest first.
    pub async fn all(&self) -> Result<Vec<Message>> {
        let read = self.read_keys().await?;
        let mut messages = self.messages.scan().await?;
        for msg in &mut messages {
            msg.is_read |= read.contains(&msg.key());
        }
        Ok(messages)
    }

    /// Messages the traveler sent or received.
    pub async fn for_user(&self, name: &str) -> Result<Vec<Message>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|msg| msg.involves(name))
            .collect())
    }

    /// Marks every message under `key` read and returns how many matched.
    /// Nothing is written when no message matches.
    pub async fn mark_read(&self, key: MessageKey) -> Result<usize> {
        let matched = self
            .messages
            .scan()
            .await?
            .iter()
            .filter(|msg| msg.key() == key)
            .count();

        if matched > 0 {
            tracing::debug!(from = %key.from_name, to = %key.to_name, at = %key.timestamp, "marking read");
            self.receipts
                .append(&ReadReceipt { key, read_at: clock::timestamp() })
                .await?;
        }
        Ok(matched)
    }
}
