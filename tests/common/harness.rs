//! Test harness for database and bot lifecycle management.
//!
//! Provides isolated database instances per test using tempfile, plus a
//! fully wired bot (store + in-process transport) for workflow tests.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use ficnotes::bot::{engine, BotContext};
use ficnotes::chat::testing::{InProcessTransport, SentMessage};
use ficnotes::chat::{Author, ChannelId, Inbound};
use ficnotes::db::connection::{init_db, DbConfig, FicnotesDb};
use ficnotes::db::schema::apply_schema;
use ficnotes::repository::{CatalogRepository, SurrealCatalogRepository};

/// Test harness that manages database lifecycle.
///
/// Each TestHarness creates an isolated database in a temporary directory.
/// The database is automatically cleaned up when the harness is dropped.
pub struct TestHarness {
    /// Database connection wrapped in Arc for sharing
    pub db: Arc<FicnotesDb>,
    /// Temporary directory (kept alive while harness exists)
    pub temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with isolated database.
    ///
    /// Panics if database initialization fails (appropriate for tests).
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for test database");

        let db_path = temp_dir.path().join("test.db");
        let config = DbConfig::Embedded {
            path: Some(db_path.to_string_lossy().into_owned()),
        };
        let db = init_db(&config, temp_dir.path())
            .await
            .expect("Failed to initialize test database");

        apply_schema(&db)
            .await
            .expect("Failed to apply schema to test database");

        Self {
            db: Arc::new(db),
            temp_dir,
        }
    }
}

/// A bot wired to an isolated store and a recording transport double.
pub struct BotHarness {
    pub repo: Arc<SurrealCatalogRepository>,
    pub transport: Arc<InProcessTransport>,
    pub bot: Arc<BotContext>,
    harness: TestHarness,
}

impl BotHarness {
    pub async fn new() -> Self {
        Self::with_selection_timeout(ficnotes::bot::disambiguation::SELECTION_TIMEOUT).await
    }

    pub async fn with_selection_timeout(wait: Duration) -> Self {
        let harness = TestHarness::new().await;
        let repo = Arc::new(SurrealCatalogRepository::new(harness.db.clone()));
        let transport = InProcessTransport::new();
        let repo_dyn: Arc<dyn CatalogRepository> = repo.clone();
        let transport_dyn: Arc<dyn ficnotes::chat::ChatTransport> = transport.clone();
        let bot = Arc::new(BotContext::new(repo_dyn, transport_dyn).with_selection_timeout(wait));
        Self {
            repo,
            transport,
            bot,
            harness,
        }
    }

    pub fn db(&self) -> &Arc<FicnotesDb> {
        &self.harness.db
    }

    /// Deliver one chat line from the given author and wait for handling to
    /// finish. Panics on infrastructure errors (appropriate for tests).
    pub async fn say(&self, author: &Author, line: &str) {
        engine::handle_message(&self.bot, inbound(author, line))
            .await
            .expect("message handling failed");
    }

    /// Deliver one chat line in a background task, for flows that suspend
    /// (disambiguation). Returns the join handle.
    pub fn say_in_background(
        &self,
        author: &Author,
        line: &str,
    ) -> tokio::task::JoinHandle<()> {
        let bot = self.bot.clone();
        let message = inbound(author, line);
        tokio::spawn(async move {
            engine::handle_message(&bot, message)
                .await
                .expect("message handling failed");
        })
    }

    /// Poll the transport until a sent message contains `needle`.
    ///
    /// Panics after a few seconds so a missing reply fails the test instead
    /// of hanging it.
    pub async fn wait_for_message_containing(&self, needle: &str) -> SentMessage {
        for _ in 0..500 {
            if let Some(found) = self
                .transport
                .sent()
                .into_iter()
                .find(|m| m.text.contains(needle))
            {
                return found;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no sent message containing {needle:?}");
    }

    /// Poll the transport until `count` reactions are attached to `message`.
    ///
    /// The prompt becomes visible before its reactions finish attaching, so
    /// assertions about attached selectors go through here.
    pub async fn wait_for_reactions(&self, message: ficnotes::chat::MessageId, count: usize) {
        for _ in 0..500 {
            if self.transport.reactions_on(message).len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("message never got {count} reactions");
    }
}

/// The channel all test messages arrive on.
pub const TEST_CHANNEL: ChannelId = ChannelId(7);

/// Build an author identity for tests.
pub fn author(id: u64, name: &str) -> Author {
    Author {
        id,
        name: name.to_string(),
    }
}

fn inbound(author: &Author, line: &str) -> Inbound {
    Inbound {
        channel: TEST_CHANNEL,
        author: author.clone(),
        content: line.to_string(),
    }
}
