//! User-facing reply templates.
//!
//! One deterministic template per (command, outcome) pair. Every reply
//! leads with the platform mention of the invoking user.

use crate::models::ElementKind;
use super::command::COMMAND_PREFIX;
use super::resolver::{CommandError, Resolution};

/// Render a successful resolution.
pub fn success(mention: &str, resolution: &Resolution) -> String {
    match resolution {
        Resolution::StoryAdded { name } => {
            format!("{mention} {name} has been added to your stories.")
        }
        Resolution::ElementAdded { name, story } => {
            format!("{mention} {name} has been added to {story}.")
        }
        Resolution::PlotPointAdded { index, story } => {
            format!("{mention} {index} has been added to {story}.")
        }
        Resolution::NoteAdded { element } => {
            format!("{mention} Added a note to {element}.")
        }
        Resolution::StoryList { names } => {
            let mut text = format!("{mention} You have the following stories:\n");
            for name in names {
                text.push_str("* ");
                text.push_str(name);
                text.push('\n');
            }
            text
        }
    }
}

/// Render a domain rejection.
pub fn rejection(mention: &str, error: &CommandError) -> String {
    match error {
        CommandError::UserNotCreated => {
            format!("{mention} You have not created any stories yet.")
        }
        CommandError::StoryNotFound(story) => format!(
            "{mention} {story} not found. Try adding it first with \"{COMMAND_PREFIX}add story {story}\"."
        ),
        CommandError::ElementNotFound { element, story } => format!(
            "{mention} {element} not found in {story}. Try adding it first with \"{COMMAND_PREFIX}add [kind] {element} > {story}\"."
        ),
        CommandError::DuplicateStory(name) => format!("{mention} {name} already exists."),
        CommandError::DuplicateElement { element, story } => {
            format!("{mention} {element} is already in {story}.")
        }
    }
}

/// Render the disambiguation prompt: one `symbol - label` line per
/// assigned candidate.
pub fn ambiguity_prompt(
    mention: &str,
    element: &str,
    assigned: &[(&'static str, ElementKind)],
) -> String {
    let mut text = format!("{mention} Which {element} did you mean?\n");
    for (symbol, kind) in assigned {
        text.push(' ');
        text.push_str(symbol);
        text.push_str(" - ");
        text.push_str(kind.label());
        text.push('\n');
    }
    text
}

/// Render the notice sent when a selection round expires.
pub fn timeout_notice(mention: &str) -> String {
    format!("{mention} Timeout. Try again.")
}
