//! Chat transport contract.
//!
//! The bot core is transport-agnostic: it needs to receive text messages
//! with author identity, send replies, attach a small closed alphabet of
//! selector reactions, await reaction-added events, and delete messages.
//! Anything speaking those verbs can carry the bot; `console` is the
//! in-tree binding, `testing` the in-process double.

pub mod console;
pub mod testing;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::FicnotesError;

/// The fixed selector alphabet: the keycap emoji 1️⃣ through 6️⃣, written
/// with explicit variation-selector escapes. Selection prompts never offer
/// more candidates than this list holds.
pub const SELECTORS: [&str; 6] = [
    "1\u{fe0f}\u{20e3}",
    "2\u{fe0f}\u{20e3}",
    "3\u{fe0f}\u{20e3}",
    "4\u{fe0f}\u{20e3}",
    "5\u{fe0f}\u{20e3}",
    "6\u{fe0f}\u{20e3}",
];

/// Channel reference on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u64);

/// Message reference on the chat platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

/// Author identity attached to an inbound message.
#[derive(Debug, Clone)]
pub struct Author {
    /// Opaque platform account id.
    pub id: u64,
    /// Display name at the time the message was sent.
    pub name: String,
}

/// An inbound chat message.
#[derive(Debug, Clone)]
pub struct Inbound {
    pub channel: ChannelId,
    pub author: Author,
    pub content: String,
}

/// A reaction added to a previously sent message.
#[derive(Debug, Clone)]
pub struct ReactionAdded {
    pub message: MessageId,
    /// Platform account id of the reacting user.
    pub user: u64,
    pub symbol: String,
}

/// Outbound capabilities the bot requires from a chat platform.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text message, returning a reference usable for reactions and
    /// deletion.
    async fn send(&self, channel: ChannelId, text: &str) -> Result<MessageId, FicnotesError>;

    /// Attach a reaction symbol to a previously sent message.
    async fn react(
        &self,
        channel: ChannelId,
        message: MessageId,
        symbol: &str,
    ) -> Result<(), FicnotesError>;

    /// Delete a previously sent message.
    async fn delete(&self, channel: ChannelId, message: MessageId) -> Result<(), FicnotesError>;

    /// Subscribe to reaction-added events. Dropping the receiver retires the
    /// subscription; events sent afterwards are never observed.
    fn reactions(&self) -> broadcast::Receiver<ReactionAdded>;

    /// Platform-specific mention/handle for an author, used to prefix replies.
    fn mention(&self, author: &Author) -> String;

    /// Set the visible activity status (cosmetic).
    async fn set_activity(&self, status: &str) -> Result<(), FicnotesError>;
}
