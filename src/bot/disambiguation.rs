//! Timed reaction selection for same-named elements.
//!
//! Each ambiguous note command runs one short-lived selection round:
//! prompt the author with a selector reaction per candidate kind, then
//! suspend until the author reacts or the deadline passes. Rounds hold no
//! shared state; concurrent rounds are independent and each only accepts
//! reactions on its own prompt message.

use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::time::{timeout_at, Instant};

use crate::chat::{Author, ChannelId, ChatTransport, SELECTORS};
use crate::models::ElementKind;
use crate::FicnotesError;
use super::reply;

/// How long the author has to pick a candidate, measured from prompt send.
pub const SELECTION_TIMEOUT: Duration = Duration::from_secs(60);

/// Terminal states of a selection round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Picked(ElementKind),
    TimedOut,
}

/// Run one selection round for an ambiguous element name.
///
/// Candidate `i` is assigned selector symbol `i + 1`, in the order the
/// caller supplies the kinds; only assigned symbols are attached to the
/// prompt. A qualifying event must carry the prompt's message id, an
/// assigned symbol, and the original author's id - everything else is
/// ignored. The reaction subscription is taken before the prompt is sent
/// and dropped before the prompt is deleted, so a late reaction can never
/// observe the prompt.
pub async fn select_kind(
    transport: &dyn ChatTransport,
    channel: ChannelId,
    author: &Author,
    element: &str,
    kinds: &[ElementKind],
    wait: Duration,
) -> Result<Selection, FicnotesError> {
    debug_assert!(kinds.len() <= SELECTORS.len());
    let assigned: Vec<(&'static str, ElementKind)> = SELECTORS
        .iter()
        .copied()
        .zip(kinds.iter().copied())
        .collect();

    let mut reactions = transport.reactions();
    let mention = transport.mention(author);
    let prompt = transport
        .send(channel, &reply::ambiguity_prompt(&mention, element, &assigned))
        .await?;
    let deadline = Instant::now() + wait;
    for (symbol, _) in &assigned {
        transport.react(channel, prompt, symbol).await?;
    }

    let selection = loop {
        match timeout_at(deadline, reactions.recv()).await {
            // Deadline expired with no qualifying reaction.
            Err(_) => break Selection::TimedOut,
            Ok(Err(RecvError::Closed)) => break Selection::TimedOut,
            Ok(Err(RecvError::Lagged(skipped))) => {
                tracing::warn!(skipped, "reaction subscription lagged");
                continue;
            }
            Ok(Ok(event)) => {
                if event.message != prompt || event.user != author.id {
                    continue;
                }
                if let Some((_, kind)) = assigned.iter().find(|(s, _)| *s == event.symbol) {
                    break Selection::Picked(*kind);
                }
            }
        }
    };
    drop(reactions);
    transport.delete(channel, prompt).await?;
    Ok(selection)
}
