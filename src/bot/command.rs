//! Chat command grammar.
//!
//! One line of raw text in, one structured command out. Parsing is pure and
//! never touches the store. Lines that do not match the grammar yield
//! `None` and produce no reply.

use crate::models::ElementKind;

/// Prefix every bot command starts with.
pub const COMMAND_PREFIX: &str = "!ficnotesbot ";

/// A structured chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add story <name>`
    AddStory { name: String },
    /// `add <kind> <name> > <story>` for every kind except plot points
    AddElement {
        kind: ElementKind,
        name: String,
        story: String,
    },
    /// `add plotpoint "<index>" <header> > <story>`
    AddPlotPoint {
        index: String,
        header: String,
        story: String,
    },
    /// `add note <text> > <element> > <story>`
    AddNote {
        text: String,
        element: String,
        story: String,
    },
    /// `list stories`
    ListStories,
}

/// Parse one raw chat line.
///
/// Fields after the keyword prefix are separated by the literal ` > `
/// token; splitting is positional, so field values must not themselves
/// contain the separator (and a plot-point index must not contain `"`).
/// Malformed input - missing separator, wrong field count, empty field,
/// unterminated index - is treated the same as an unrecognized line.
pub fn parse(line: &str) -> Option<Command> {
    let rest = line.strip_prefix(COMMAND_PREFIX)?;

    if let Some(args) = rest.strip_prefix("add story ") {
        return (!args.is_empty()).then(|| Command::AddStory {
            name: args.to_string(),
        });
    }

    if let Some(args) = rest.strip_prefix("add plotpoint ") {
        return parse_plot_point(args);
    }

    if let Some(args) = rest.strip_prefix("add note ") {
        let [text, element, story] = split_fields(args)?;
        return Some(Command::AddNote {
            text: text.to_string(),
            element: element.to_string(),
            story: story.to_string(),
        });
    }

    for kind in ElementKind::ALL {
        if kind == ElementKind::PlotPoint {
            // Plot points have their own quoted-index grammar above.
            continue;
        }
        let keyword = format!("add {} ", kind.keyword());
        if let Some(args) = rest.strip_prefix(keyword.as_str()) {
            let [name, story] = split_fields(args)?;
            return Some(Command::AddElement {
                kind,
                name: name.to_string(),
                story: story.to_string(),
            });
        }
    }

    (rest.trim_end() == "list stories").then_some(Command::ListStories)
}

/// Split on the ` > ` separator into exactly `N` non-empty fields.
fn split_fields<const N: usize>(args: &str) -> Option<[&str; N]> {
    let parts: Vec<&str> = args.split(" > ").collect();
    let parts: [&str; N] = parts.try_into().ok()?;
    parts.iter().all(|part| !part.is_empty()).then_some(parts)
}

/// `"<index>" <header>` - index is the first double-quoted token, header is
/// everything after the closing quote and one space.
fn parse_plot_point(args: &str) -> Option<Command> {
    let [index_header, story] = split_fields(args)?;
    let quoted = index_header.strip_prefix('"')?;
    let (index, after_quote) = quoted.split_once('"')?;
    let header = after_quote.strip_prefix(' ')?;
    (!index.is_empty() && !header.is_empty()).then(|| Command::AddPlotPoint {
        index: index.to_string(),
        header: header.to_string(),
        story: story.to_string(),
    })
}
