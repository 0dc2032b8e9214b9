use serde_json::Value;

use super::message::ChatMessage;
use super::normalize::normalize;

/// An ordered log of normalized messages with identity-keyed upsert: a
/// re-delivered message sharing a client-assigned identifier merges into
/// its original slot instead of appending a duplicate.
#[derive(Debug, Default)]
pub struct MessageLog {
    messages: Vec<ChatMessage>,
}

impl MessageLog {
    pub fn new() -> MessageLog {
        MessageLog::default()
    }

    /// Normalize a raw inbound payload and upsert it into the log.
    /// Every payload produces exactly one log event; returns the index
    /// of the entry that was appended or merged into.
    pub fn ingest(&mut self, payload: &Value) -> usize {
        self.upsert(normalize(payload))
    }

    /// Upsert an already-normalized message.
    pub fn upsert(&mut self, msg: ChatMessage) -> usize {
        if let Some(client_id) = msg.client_id.as_deref() {
            if let Some(idx) = self
                .messages
                .iter()
                .position(|m| m.client_id.as_deref() == Some(client_id))
            {
                self.messages[idx].merge(msg);
                return idx;
            }
        }
        self.messages.push(msg);
        self.messages.len() - 1
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
