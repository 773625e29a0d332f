//! Inbound message loop and per-message handling.
//!
//! One lightweight task per inbound message: handling may suspend during a
//! disambiguation wait without blocking the loop, and no ordering holds
//! between tasks for different messages. Store writes within one task are
//! strictly sequential.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::chat::Inbound;
use crate::FicnotesError;
use super::command::{self, Command};
use super::disambiguation::{self, Selection};
use super::reply;
use super::resolver::Outcome;
use super::BotContext;

/// Receive inbound messages and spawn a handler task for each.
///
/// Returns when the inbound stream closes. Handler failures are logged,
/// never propagated; only transport/store bootstrap problems are fatal.
pub async fn run(
    ctx: Arc<BotContext>,
    mut inbound: mpsc::Receiver<Inbound>,
) -> Result<(), FicnotesError> {
    ctx.transport.set_activity("!ficnotesbot help").await?;
    while let Some(message) = inbound.recv().await {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move {
            if let Err(e) = handle_message(&ctx, message).await {
                tracing::error!("message handling failed: {}", e);
            }
        });
    }
    Ok(())
}

/// Handle one inbound message end to end: parse, resolve, disambiguate if
/// needed, reply.
pub async fn handle_message(ctx: &BotContext, message: Inbound) -> Result<(), FicnotesError> {
    let Some(parsed) = command::parse(&message.content) else {
        tracing::debug!("ignoring non-command line");
        return Ok(());
    };

    let mention = ctx.transport.mention(&message.author);
    match ctx.resolver.dispatch(&parsed, &message.author).await? {
        Outcome::Done(resolution) => {
            ctx.transport
                .send(message.channel, &reply::success(&mention, &resolution))
                .await?;
        }
        Outcome::Rejected(error) => {
            ctx.transport
                .send(message.channel, &reply::rejection(&mention, &error))
                .await?;
        }
        Outcome::Ambiguous { element, kinds } => {
            // Only an unqualified note lookup can come back ambiguous.
            let Command::AddNote { text, story, .. } = parsed else {
                return Err(FicnotesError::Validation(
                    "ambiguous outcome from a non-note command".into(),
                ));
            };
            let selection = disambiguation::select_kind(
                ctx.transport.as_ref(),
                message.channel,
                &message.author,
                &element,
                &kinds,
                ctx.selection_timeout,
            )
            .await?;
            match selection {
                Selection::Picked(kind) => {
                    let retried = ctx
                        .resolver
                        .add_note_by_kind(&message.author, &text, &element, kind, &story)
                        .await?;
                    match retried {
                        Outcome::Done(resolution) => {
                            ctx.transport
                                .send(message.channel, &reply::success(&mention, &resolution))
                                .await?;
                        }
                        Outcome::Rejected(error) => {
                            ctx.transport
                                .send(message.channel, &reply::rejection(&mention, &error))
                                .await?;
                        }
                        Outcome::Ambiguous { .. } => {
                            // A kind-filtered lookup matches at most one element.
                            tracing::error!("kind-filtered note lookup reported ambiguity");
                        }
                    }
                }
                Selection::TimedOut => {
                    ctx.transport
                        .send(message.channel, &reply::timeout_notice(&mention))
                        .await?;
                }
            }
        }
    }
    Ok(())
}
