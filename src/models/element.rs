//! Story elements: named entities of a fixed kind within one story.
//!
//! Element names are unique per (story, kind) but deliberately NOT across
//! kinds, so a story can hold both a character and an object named "Lea".
//! That collision is what the note disambiguation flow resolves.

use std::fmt;

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::db::connection::FicnotesDb;
use crate::db::is_unique_violation;
use crate::FicnotesError;

/// Closed set of element kinds.
///
/// Variant order is meaningful: it is the deterministic order candidates are
/// presented in when a name matches several kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Character,
    Object,
    Event,
    Place,
    Concept,
    PlotPoint,
}

impl ElementKind {
    /// All kinds, in presentation order.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Character,
        ElementKind::Object,
        ElementKind::Event,
        ElementKind::Place,
        ElementKind::Concept,
        ElementKind::PlotPoint,
    ];

    /// Keyword used in the `add <kind>` command grammar.
    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::Character => "character",
            ElementKind::Object => "object",
            ElementKind::Event => "event",
            ElementKind::Place => "place",
            ElementKind::Concept => "concept",
            ElementKind::PlotPoint => "plotpoint",
        }
    }

    /// Human-facing label used in prompts and replies.
    pub fn label(self) -> &'static str {
        match self {
            ElementKind::Character => "Character",
            ElementKind::Object => "Object",
            ElementKind::Event => "Event",
            ElementKind::Place => "Place",
            ElementKind::Concept => "Concept",
            ElementKind::PlotPoint => "Plot Point",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Story element as stored in database.
///
/// For plot points, `name` holds the user-chosen index label; the header
/// text lives in the 1:1 `plot_point` detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryElement {
    pub id: RecordId,
    pub story: RecordId,
    pub kind: ElementKind,
    pub name: String,
}

/// Data for creating a new story element.
#[derive(Debug, Clone, Serialize)]
pub struct StoryElementCreate {
    pub story: RecordId,
    pub kind: ElementKind,
    pub name: String,
}

/// Create a new story element.
///
/// Returns `DuplicateKey` if the story already has an element of the same
/// kind with the same name (`unique_element_name` index).
pub async fn create_element(
    db: &FicnotesDb,
    data: StoryElementCreate,
) -> Result<StoryElement, FicnotesError> {
    let result: Result<Option<StoryElement>, surrealdb::Error> =
        db.create("element").content(data).await;
    match result {
        Ok(Some(element)) => Ok(element),
        Ok(None) => Err(FicnotesError::Database("Failed to create element".into())),
        Err(e) if is_unique_violation(&e) => Err(FicnotesError::DuplicateKey(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Find all elements with the given name in a story, across every kind.
///
/// Matches are returned in `ElementKind` presentation order so that a
/// multi-kind collision always produces the same candidate list.
pub async fn find_elements_by_name(
    db: &FicnotesDb,
    story: &RecordId,
    name: &str,
) -> Result<Vec<StoryElement>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM element WHERE story = $story AND name = $name")
        .bind(("story", story.clone()))
        .bind(("name", name.to_owned()))
        .await?;
    let mut elements: Vec<StoryElement> = resp.take(0)?;
    elements.sort_by_key(|e| e.kind);
    Ok(elements)
}

/// Find one element by (story, kind, name).
pub async fn find_element(
    db: &FicnotesDb,
    story: &RecordId,
    kind: ElementKind,
    name: &str,
) -> Result<Option<StoryElement>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM element WHERE story = $story AND kind = $kind AND name = $name")
        .bind(("story", story.clone()))
        .bind(("kind", kind))
        .bind(("name", name.to_owned()))
        .await?;
    let elements: Vec<StoryElement> = resp.take(0)?;
    Ok(elements.into_iter().next())
}
