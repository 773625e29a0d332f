//! Console transport: drives the bot from a local terminal.
//!
//! Each line typed on stdin is delivered as a chat message from a single
//! local author. While a selection prompt is open, typing `1`-`6` (or the
//! selector emoji itself) adds the corresponding reaction instead of
//! sending a message.

use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{broadcast, mpsc, Mutex};

use crate::chat::{
    Author, ChannelId, ChatTransport, Inbound, MessageId, ReactionAdded, SELECTORS,
};
use crate::FicnotesError;

/// The single channel a console session talks in.
const CONSOLE_CHANNEL: ChannelId = ChannelId(0);

#[derive(Default)]
struct ConsoleState {
    next_message: u64,
    /// Messages with attached reactions still on screen, oldest first.
    open_reactions: Vec<(MessageId, Vec<String>)>,
}

/// In-tree chat transport backed by stdin/stdout.
pub struct ConsoleTransport {
    author: Author,
    reactions_tx: broadcast::Sender<ReactionAdded>,
    state: Mutex<ConsoleState>,
}

impl ConsoleTransport {
    /// Start the transport and its stdin reader task.
    ///
    /// Returns the transport handle plus the inbound message stream the
    /// engine consumes. The stream closes when stdin reaches EOF.
    pub fn start(author: Author) -> (Arc<Self>, mpsc::Receiver<Inbound>) {
        let (reactions_tx, _) = broadcast::channel(64);
        let transport = Arc::new(Self {
            author,
            reactions_tx,
            state: Mutex::new(ConsoleState::default()),
        });
        let (inbound_tx, inbound_rx) = mpsc::channel(16);
        let reader = Arc::clone(&transport);
        tokio::spawn(async move { reader.read_stdin(inbound_tx).await });
        (transport, inbound_rx)
    }

    async fn read_stdin(self: Arc<Self>, inbound: mpsc::Sender<Inbound>) {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim_end().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    if let Some(reaction) = self.as_reaction(&line).await {
                        // Receiver-less sends just mean nobody is waiting.
                        let _ = self.reactions_tx.send(reaction);
                        continue;
                    }
                    let message = Inbound {
                        channel: CONSOLE_CHANNEL,
                        author: self.author.clone(),
                        content: line,
                    };
                    if inbound.send(message).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("stdin read failed: {}", e);
                    break;
                }
            }
        }
    }

    /// Interpret a typed line as a reaction to the newest on-screen message
    /// that offers the chosen selector.
    async fn as_reaction(&self, line: &str) -> Option<ReactionAdded> {
        let symbol = selector_from_input(line)?;
        let state = self.state.lock().await;
        let (message, _) = state
            .open_reactions
            .iter()
            .rev()
            .find(|(_, symbols)| symbols.iter().any(|s| s == symbol))?;
        Some(ReactionAdded {
            message: *message,
            user: self.author.id,
            symbol: symbol.to_string(),
        })
    }
}

/// Map `"1"`-`"6"` (or a selector emoji) to its selector symbol.
fn selector_from_input(line: &str) -> Option<&'static str> {
    if let Some(idx) = SELECTORS.iter().position(|s| *s == line) {
        return Some(SELECTORS[idx]);
    }
    let digit: usize = line.parse().ok()?;
    (1..=SELECTORS.len())
        .contains(&digit)
        .then(|| SELECTORS[digit - 1])
}

#[async_trait]
impl ChatTransport for ConsoleTransport {
    async fn send(&self, _channel: ChannelId, text: &str) -> Result<MessageId, FicnotesError> {
        let mut state = self.state.lock().await;
        state.next_message += 1;
        let id = MessageId(state.next_message);
        drop(state);
        println!("{}", text.cyan());
        Ok(id)
    }

    async fn react(
        &self,
        _channel: ChannelId,
        message: MessageId,
        symbol: &str,
    ) -> Result<(), FicnotesError> {
        let mut state = self.state.lock().await;
        if let Some((_, symbols)) = state
            .open_reactions
            .iter_mut()
            .find(|(id, _)| *id == message)
        {
            symbols.push(symbol.to_owned());
        } else {
            state.open_reactions.push((message, vec![symbol.to_owned()]));
        }
        Ok(())
    }

    async fn delete(&self, _channel: ChannelId, message: MessageId) -> Result<(), FicnotesError> {
        let mut state = self.state.lock().await;
        state.open_reactions.retain(|(id, _)| *id != message);
        drop(state);
        println!("{}", "(prompt dismissed)".dimmed());
        Ok(())
    }

    fn reactions(&self) -> broadcast::Receiver<ReactionAdded> {
        self.reactions_tx.subscribe()
    }

    fn mention(&self, author: &Author) -> String {
        format!("@{}", author.name)
    }

    async fn set_activity(&self, status: &str) -> Result<(), FicnotesError> {
        println!("{}", format!("* now playing: {status}").dimmed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_selectors() {
        assert_eq!(selector_from_input("1"), Some(SELECTORS[0]));
        assert_eq!(selector_from_input("6"), Some(SELECTORS[5]));
        assert_eq!(selector_from_input("7"), None);
        assert_eq!(selector_from_input("0"), None);
        assert_eq!(selector_from_input("add story X"), None);
    }

    #[test]
    fn selector_emoji_map_to_themselves() {
        for symbol in SELECTORS {
            assert_eq!(selector_from_input(symbol), Some(symbol));
        }
    }
}
