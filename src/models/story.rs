//! Stories: named narrative projects, each owned by one user.

use serde::{Deserialize, Serialize};
use surrealdb::{Datetime, RecordId};

use crate::db::connection::FicnotesDb;
use crate::db::is_unique_violation;
use crate::FicnotesError;

/// Story entity as stored in database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: RecordId,
    pub owner: RecordId,
    pub name: String,
    pub created_at: Datetime,
}

/// Data for creating a new story.
#[derive(Debug, Clone, Serialize)]
pub struct StoryCreate {
    pub owner: RecordId,
    pub name: String,
}

/// Create a new story.
///
/// Returns `DuplicateKey` if this owner already has a story with the same
/// name (exact, case-sensitive match via the `unique_story_name` index).
pub async fn create_story(db: &FicnotesDb, data: StoryCreate) -> Result<Story, FicnotesError> {
    let result: Result<Option<Story>, surrealdb::Error> = db.create("story").content(data).await;
    match result {
        Ok(Some(story)) => Ok(story),
        Ok(None) => Err(FicnotesError::Database("Failed to create story".into())),
        Err(e) if is_unique_violation(&e) => Err(FicnotesError::DuplicateKey(e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// Find a story by owner and exact name.
pub async fn find_story(
    db: &FicnotesDb,
    owner: &RecordId,
    name: &str,
) -> Result<Option<Story>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM story WHERE owner = $owner AND name = $name")
        .bind(("owner", owner.clone()))
        .bind(("name", name.to_owned()))
        .await?;
    let stories: Vec<Story> = resp.take(0)?;
    Ok(stories.into_iter().next())
}

/// List a user's stories in creation order (oldest first).
pub async fn list_stories(db: &FicnotesDb, owner: &RecordId) -> Result<Vec<Story>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM story WHERE owner = $owner ORDER BY created_at ASC")
        .bind(("owner", owner.clone()))
        .await?;
    let stories: Vec<Story> = resp.take(0)?;
    Ok(stories)
}
