//! Chat platform users.
//!
//! Users are created lazily: the first `add story` from an unseen platform
//! account id inserts a record. There is no delete path.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::db::connection::FicnotesDb;
use crate::db::is_unique_violation;
use crate::FicnotesError;

/// A chat user as stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: RecordId,
    /// Opaque platform account id, unique across users.
    pub user_id: u64,
    /// Display name captured from the first message seen from this account.
    pub name: String,
}

/// Data for creating a new user.
#[derive(Debug, Clone, Serialize)]
pub struct ChatUserCreate {
    pub user_id: u64,
    pub name: String,
}

/// Find a user by platform account id.
pub async fn find_user(db: &FicnotesDb, user_id: u64) -> Result<Option<ChatUser>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM user WHERE user_id = $user_id")
        .bind(("user_id", user_id))
        .await?;
    let users: Vec<ChatUser> = resp.take(0)?;
    Ok(users.into_iter().next())
}

/// Create a new user.
///
/// Returns `DuplicateKey` if the platform account id is already registered;
/// callers that lose a create race should re-find instead.
pub async fn create_user(db: &FicnotesDb, data: ChatUserCreate) -> Result<ChatUser, FicnotesError> {
    let result: Result<Option<ChatUser>, surrealdb::Error> = db.create("user").content(data).await;
    match result {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(FicnotesError::Database("Failed to create user".into())),
        Err(e) if is_unique_violation(&e) => Err(FicnotesError::DuplicateKey(e.to_string())),
        Err(e) => Err(e.into()),
    }
}
