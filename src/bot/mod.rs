//! Chat command engine: grammar, entity resolution, disambiguation, replies.

pub mod command;
pub mod disambiguation;
pub mod engine;
pub mod reply;
pub mod resolver;

use std::sync::Arc;
use std::time::Duration;

use crate::chat::ChatTransport;
use crate::repository::CatalogRepository;
use resolver::Resolver;

/// Runtime context the message handlers run against: the store behind the
/// resolver and the transport handle, both trait objects so tests can
/// substitute doubles.
pub struct BotContext {
    pub resolver: Resolver,
    pub transport: Arc<dyn ChatTransport>,
    /// How long a disambiguation prompt waits for a selection.
    pub selection_timeout: Duration,
}

impl BotContext {
    pub fn new(repo: Arc<dyn CatalogRepository>, transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            resolver: Resolver::new(repo),
            transport,
            selection_timeout: disambiguation::SELECTION_TIMEOUT,
        }
    }

    /// Override the selection deadline (tests shorten it).
    pub fn with_selection_timeout(mut self, wait: Duration) -> Self {
        self.selection_timeout = wait;
        self
    }
}
