//! Shared initialization logic for the bot runtime.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::db::connection::{init_db, load_db_config, FicnotesDb};
use crate::db::schema::apply_schema;
use crate::repository::SurrealCatalogRepository;

/// Application context holding the store handle and repository.
pub struct AppContext {
    pub db: Arc<FicnotesDb>,
    pub data_path: PathBuf,
    pub repo: Arc<SurrealCatalogRepository>,
}

impl AppContext {
    /// Initialize application context.
    ///
    /// Data path priority: explicit path > FICNOTES_DATA_PATH env >
    /// ./.ficnotes (if exists) > ~/.ficnotes
    pub async fn new(explicit_path: Option<PathBuf>) -> Result<Self> {
        let data_path = explicit_path
            .or_else(|| std::env::var("FICNOTES_DATA_PATH").ok().map(PathBuf::from))
            .or_else(|| {
                let local_path = Path::new(".ficnotes");
                if local_path.exists() && local_path.is_dir() {
                    Some(local_path.to_path_buf())
                } else {
                    None
                }
            })
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".ficnotes"))
                    .unwrap_or_else(|| PathBuf::from(".ficnotes"))
            });

        tracing::info!("Using data path: {}", data_path.display());

        let config = load_db_config(&data_path);
        let db = init_db(&config, &data_path).await?;
        tracing::info!("Database connected");

        apply_schema(&db).await?;
        tracing::info!("Schema applied");

        let db = Arc::new(db);
        let repo = Arc::new(SurrealCatalogRepository::new(Arc::clone(&db)));

        Ok(Self {
            db,
            data_path,
            repo,
        })
    }
}
