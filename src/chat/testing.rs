//! In-process transport double for exercising the bot without a chat
//! backend.
//!
//! Records everything the bot sends, posts, and deletes, and lets tests
//! inject reaction-added events as if a user had pressed a reaction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::chat::{Author, ChannelId, ChatTransport, MessageId, ReactionAdded};
use crate::FicnotesError;

/// A message the bot sent through the double.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel: ChannelId,
    pub text: String,
}

/// Recording transport double.
pub struct InProcessTransport {
    next_message: AtomicU64,
    reactions_tx: broadcast::Sender<ReactionAdded>,
    sent: Mutex<Vec<SentMessage>>,
    reactions_posted: Mutex<Vec<(MessageId, String)>>,
    deleted: Mutex<Vec<MessageId>>,
}

impl InProcessTransport {
    pub fn new() -> Arc<Self> {
        let (reactions_tx, _) = broadcast::channel(64);
        Arc::new(Self {
            next_message: AtomicU64::new(0),
            reactions_tx,
            sent: Mutex::new(Vec::new()),
            reactions_posted: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
        })
    }

    /// Inject a reaction-added event, as if `user` pressed `symbol` on the
    /// given message.
    pub fn press(&self, message: MessageId, user: u64, symbol: &str) {
        let _ = self.reactions_tx.send(ReactionAdded {
            message,
            user,
            symbol: symbol.to_owned(),
        });
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().expect("sent lock").clone()
    }

    /// The most recently sent message, if any.
    pub fn last_sent(&self) -> Option<SentMessage> {
        self.sent.lock().expect("sent lock").last().cloned()
    }

    /// Reaction symbols the bot attached to the given message, in order.
    pub fn reactions_on(&self, message: MessageId) -> Vec<String> {
        self.reactions_posted
            .lock()
            .expect("reactions lock")
            .iter()
            .filter(|(id, _)| *id == message)
            .map(|(_, symbol)| symbol.clone())
            .collect()
    }

    /// Messages the bot deleted, in order.
    pub fn deleted_ids(&self) -> Vec<MessageId> {
        self.deleted.lock().expect("deleted lock").clone()
    }
}

#[async_trait]
impl ChatTransport for InProcessTransport {
    async fn send(&self, channel: ChannelId, text: &str) -> Result<MessageId, FicnotesError> {
        let id = MessageId(self.next_message.fetch_add(1, Ordering::SeqCst) + 1);
        self.sent.lock().expect("sent lock").push(SentMessage {
            id,
            channel,
            text: text.to_owned(),
        });
        Ok(id)
    }

    async fn react(
        &self,
        _channel: ChannelId,
        message: MessageId,
        symbol: &str,
    ) -> Result<(), FicnotesError> {
        self.reactions_posted
            .lock()
            .expect("reactions lock")
            .push((message, symbol.to_owned()));
        Ok(())
    }

    async fn delete(&self, _channel: ChannelId, message: MessageId) -> Result<(), FicnotesError> {
        self.deleted.lock().expect("deleted lock").push(message);
        Ok(())
    }

    fn reactions(&self) -> broadcast::Receiver<ReactionAdded> {
        self.reactions_tx.subscribe()
    }

    fn mention(&self, author: &Author) -> String {
        format!("@{}", author.name)
    }

    async fn set_activity(&self, _status: &str) -> Result<(), FicnotesError> {
        Ok(())
    }
}
