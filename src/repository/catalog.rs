use std::sync::Arc;

use async_trait::async_trait;
use surrealdb::RecordId;

use crate::db::connection::FicnotesDb;
use crate::models::{
    ChatUser, ChatUserCreate, ElementKind, Note, NoteCreate, Story, StoryCreate, StoryElement,
    StoryElementCreate,
};
use crate::FicnotesError;

/// Repository trait for the catalog create/find operations the command
/// engine needs.
///
/// Covers: ChatUser, Story, StoryElement (incl. plot points), Note.
/// There are no update or delete operations; the bot only ever adds.
/// Creates surface uniqueness violations as `FicnotesError::DuplicateKey`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    // User operations
    async fn find_user(&self, user_id: u64) -> Result<Option<ChatUser>, FicnotesError>;
    async fn create_user(&self, data: ChatUserCreate) -> Result<ChatUser, FicnotesError>;

    // Story operations
    async fn find_story(
        &self,
        owner: &RecordId,
        name: &str,
    ) -> Result<Option<Story>, FicnotesError>;
    async fn create_story(&self, data: StoryCreate) -> Result<Story, FicnotesError>;
    async fn list_stories(&self, owner: &RecordId) -> Result<Vec<Story>, FicnotesError>;

    // Element operations
    async fn find_elements_by_name(
        &self,
        story: &RecordId,
        name: &str,
    ) -> Result<Vec<StoryElement>, FicnotesError>;
    async fn find_element(
        &self,
        story: &RecordId,
        kind: ElementKind,
        name: &str,
    ) -> Result<Option<StoryElement>, FicnotesError>;
    async fn create_element(
        &self,
        data: StoryElementCreate,
    ) -> Result<StoryElement, FicnotesError>;

    /// Create a plot-point element and its detail record atomically.
    async fn create_plot_point(
        &self,
        story: &RecordId,
        index: &str,
        header: &str,
    ) -> Result<StoryElement, FicnotesError>;

    // Note operations
    async fn create_note(&self, data: NoteCreate) -> Result<Note, FicnotesError>;
    async fn list_notes(&self, element: &RecordId) -> Result<Vec<Note>, FicnotesError>;
}

/// SurrealDB implementation of CatalogRepository.
///
/// Wraps the database connection and delegates to model functions.
pub struct SurrealCatalogRepository {
    db: Arc<FicnotesDb>,
}

impl SurrealCatalogRepository {
    /// Create a new repository with the given database connection.
    pub fn new(db: Arc<FicnotesDb>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CatalogRepository for SurrealCatalogRepository {
    async fn find_user(&self, user_id: u64) -> Result<Option<ChatUser>, FicnotesError> {
        crate::models::user::find_user(&self.db, user_id).await
    }

    async fn create_user(&self, data: ChatUserCreate) -> Result<ChatUser, FicnotesError> {
        crate::models::user::create_user(&self.db, data).await
    }

    async fn find_story(
        &self,
        owner: &RecordId,
        name: &str,
    ) -> Result<Option<Story>, FicnotesError> {
        crate::models::story::find_story(&self.db, owner, name).await
    }

    async fn create_story(&self, data: StoryCreate) -> Result<Story, FicnotesError> {
        crate::models::story::create_story(&self.db, data).await
    }

    async fn list_stories(&self, owner: &RecordId) -> Result<Vec<Story>, FicnotesError> {
        crate::models::story::list_stories(&self.db, owner).await
    }

    async fn find_elements_by_name(
        &self,
        story: &RecordId,
        name: &str,
    ) -> Result<Vec<StoryElement>, FicnotesError> {
        crate::models::element::find_elements_by_name(&self.db, story, name).await
    }

    async fn find_element(
        &self,
        story: &RecordId,
        kind: ElementKind,
        name: &str,
    ) -> Result<Option<StoryElement>, FicnotesError> {
        crate::models::element::find_element(&self.db, story, kind, name).await
    }

    async fn create_element(
        &self,
        data: StoryElementCreate,
    ) -> Result<StoryElement, FicnotesError> {
        crate::models::element::create_element(&self.db, data).await
    }

    async fn create_plot_point(
        &self,
        story: &RecordId,
        index: &str,
        header: &str,
    ) -> Result<StoryElement, FicnotesError> {
        crate::models::plot_point::create_plot_point(&self.db, story, index, header).await
    }

    async fn create_note(&self, data: NoteCreate) -> Result<Note, FicnotesError> {
        crate::models::note::create_note(&self.db, data).await
    }

    async fn list_notes(&self, element: &RecordId) -> Result<Vec<Note>, FicnotesError> {
        crate::models::note::list_notes(&self.db, element).await
    }
}
