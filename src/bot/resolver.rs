//! Entity resolution: the ordered lookup/create procedure behind each
//! command.
//!
//! Every procedure checks its context in the same precedence: author record
//! first, then the story, then the element. Uniqueness is not pre-checked;
//! the store's `DuplicateKey` signal on write is authoritative, which also
//! settles races between concurrent tasks.

use std::sync::Arc;

use thiserror::Error;

use crate::chat::Author;
use crate::models::{
    ChatUser, ChatUserCreate, ElementKind, NoteCreate, Story, StoryCreate, StoryElementCreate,
};
use crate::repository::CatalogRepository;
use crate::FicnotesError;
use super::command::Command;

/// Success payload of a completed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    StoryAdded { name: String },
    ElementAdded { name: String, story: String },
    PlotPointAdded { index: String, story: String },
    NoteAdded { element: String },
    StoryList { names: Vec<String> },
}

/// Domain failures. Each converts 1:1 into a reply; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The author has never created a story, so no catalog exists for them.
    #[error("author has not created any stories yet")]
    UserNotCreated,

    /// The named story does not exist for this owner.
    #[error("story '{0}' not found")]
    StoryNotFound(String),

    /// No element with that name (and kind, if given) in the story.
    #[error("element '{element}' not found in '{story}'")]
    ElementNotFound { element: String, story: String },

    /// The owner already has a story with this name.
    #[error("story '{0}' already exists")]
    DuplicateStory(String),

    /// The story already has an element of this kind with this name.
    #[error("element '{element}' is already in '{story}'")]
    DuplicateElement { element: String, story: String },
}

/// Three-way result of resolving a command.
#[derive(Debug, Clone)]
pub enum Outcome {
    Done(Resolution),
    Rejected(CommandError),
    /// Several elements share the name across kinds within the story. The
    /// caller must narrow the choice to one kind before the note can land.
    /// `kinds` is in `ElementKind` presentation order.
    Ambiguous {
        element: String,
        kinds: Vec<ElementKind>,
    },
}

/// Resolves parsed commands against the catalog store.
pub struct Resolver {
    repo: Arc<dyn CatalogRepository>,
}

impl Resolver {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self {
        Self { repo }
    }

    /// Run the lookup/create procedure for a parsed command.
    pub async fn dispatch(
        &self,
        command: &Command,
        author: &Author,
    ) -> Result<Outcome, FicnotesError> {
        match command {
            Command::AddStory { name } => self.add_story(author, name).await,
            Command::AddElement { kind, name, story } => {
                self.add_element(author, *kind, name, story).await
            }
            Command::AddPlotPoint {
                index,
                header,
                story,
            } => self.add_plot_point(author, index, header, story).await,
            Command::AddNote {
                text,
                element,
                story,
            } => self.add_note(author, text, element, story).await,
            Command::ListStories => self.list_stories(author).await,
        }
    }

    async fn add_story(&self, author: &Author, name: &str) -> Result<Outcome, FicnotesError> {
        let user = self.ensure_user(author).await?;
        let created = self
            .repo
            .create_story(StoryCreate {
                owner: user.id.clone(),
                name: name.to_owned(),
            })
            .await;
        match created {
            Ok(story) => Ok(Outcome::Done(Resolution::StoryAdded { name: story.name })),
            Err(FicnotesError::DuplicateKey(_)) => Ok(Outcome::Rejected(
                CommandError::DuplicateStory(name.to_owned()),
            )),
            Err(e) => Err(e),
        }
    }

    async fn add_element(
        &self,
        author: &Author,
        kind: ElementKind,
        name: &str,
        story: &str,
    ) -> Result<Outcome, FicnotesError> {
        let story_rec = match self.require_story(author, story).await? {
            Ok(story_rec) => story_rec,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        let created = self
            .repo
            .create_element(StoryElementCreate {
                story: story_rec.id.clone(),
                kind,
                name: name.to_owned(),
            })
            .await;
        match created {
            Ok(element) => Ok(Outcome::Done(Resolution::ElementAdded {
                name: element.name,
                story: story_rec.name,
            })),
            Err(FicnotesError::DuplicateKey(_)) => {
                Ok(Outcome::Rejected(CommandError::DuplicateElement {
                    element: name.to_owned(),
                    story: story_rec.name,
                }))
            }
            Err(e) => Err(e),
        }
    }

    async fn add_plot_point(
        &self,
        author: &Author,
        index: &str,
        header: &str,
        story: &str,
    ) -> Result<Outcome, FicnotesError> {
        let story_rec = match self.require_story(author, story).await? {
            Ok(story_rec) => story_rec,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        let created = self
            .repo
            .create_plot_point(&story_rec.id, index, header)
            .await;
        match created {
            Ok(element) => Ok(Outcome::Done(Resolution::PlotPointAdded {
                index: element.name,
                story: story_rec.name,
            })),
            Err(FicnotesError::DuplicateKey(_)) => {
                Ok(Outcome::Rejected(CommandError::DuplicateElement {
                    element: index.to_owned(),
                    story: story_rec.name,
                }))
            }
            Err(e) => Err(e),
        }
    }

    /// Note lookup without a kind filter. Zero matches reject, one match
    /// writes, several matches hand control to disambiguation.
    async fn add_note(
        &self,
        author: &Author,
        text: &str,
        element: &str,
        story: &str,
    ) -> Result<Outcome, FicnotesError> {
        let story_rec = match self.require_story(author, story).await? {
            Ok(story_rec) => story_rec,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        let mut matches = self
            .repo
            .find_elements_by_name(&story_rec.id, element)
            .await?;
        match matches.len() {
            0 => Ok(Outcome::Rejected(CommandError::ElementNotFound {
                element: element.to_owned(),
                story: story_rec.name,
            })),
            1 => {
                let target = matches.remove(0);
                self.repo
                    .create_note(NoteCreate {
                        element: target.id,
                        body: text.to_owned(),
                    })
                    .await?;
                Ok(Outcome::Done(Resolution::NoteAdded {
                    element: target.name,
                }))
            }
            _ => Ok(Outcome::Ambiguous {
                element: element.to_owned(),
                kinds: matches.iter().map(|m| m.kind).collect(),
            }),
        }
    }

    /// Note lookup narrowed to one kind, used after disambiguation.
    pub async fn add_note_by_kind(
        &self,
        author: &Author,
        text: &str,
        element: &str,
        kind: ElementKind,
        story: &str,
    ) -> Result<Outcome, FicnotesError> {
        let story_rec = match self.require_story(author, story).await? {
            Ok(story_rec) => story_rec,
            Err(rejection) => return Ok(Outcome::Rejected(rejection)),
        };
        let Some(target) = self
            .repo
            .find_element(&story_rec.id, kind, element)
            .await?
        else {
            return Ok(Outcome::Rejected(CommandError::ElementNotFound {
                element: element.to_owned(),
                story: story_rec.name,
            }));
        };
        self.repo
            .create_note(NoteCreate {
                element: target.id,
                body: text.to_owned(),
            })
            .await?;
        Ok(Outcome::Done(Resolution::NoteAdded {
            element: target.name,
        }))
    }

    async fn list_stories(&self, author: &Author) -> Result<Outcome, FicnotesError> {
        let Some(user) = self.repo.find_user(author.id).await? else {
            return Ok(Outcome::Rejected(CommandError::UserNotCreated));
        };
        let stories = self.repo.list_stories(&user.id).await?;
        Ok(Outcome::Done(Resolution::StoryList {
            names: stories.into_iter().map(|s| s.name).collect(),
        }))
    }

    /// Find the author's user record, creating it on first use. A lost
    /// create race falls back to the record the winner inserted.
    async fn ensure_user(&self, author: &Author) -> Result<ChatUser, FicnotesError> {
        if let Some(user) = self.repo.find_user(author.id).await? {
            return Ok(user);
        }
        let created = self
            .repo
            .create_user(ChatUserCreate {
                user_id: author.id,
                name: author.name.clone(),
            })
            .await;
        match created {
            Ok(user) => Ok(user),
            Err(FicnotesError::DuplicateKey(_)) => self
                .repo
                .find_user(author.id)
                .await?
                .ok_or_else(|| {
                    FicnotesError::Database("user missing after duplicate-key create".into())
                }),
            Err(e) => Err(e),
        }
    }

    /// Shared precondition of every command that targets an existing story:
    /// the author must be known and must own a story with that exact name.
    async fn require_story(
        &self,
        author: &Author,
        story: &str,
    ) -> Result<Result<Story, CommandError>, FicnotesError> {
        let Some(user) = self.repo.find_user(author.id).await? else {
            return Ok(Err(CommandError::UserNotCreated));
        };
        match self.repo.find_story(&user.id, story).await? {
            Some(story_rec) => Ok(Ok(story_rec)),
            None => Ok(Err(CommandError::StoryNotFound(story.to_owned()))),
        }
    }
}
