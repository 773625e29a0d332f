use crate::db::connection::FicnotesDb;
use crate::FicnotesError;

/// Catalog tables: user, story, element, plot_point, note
const SCHEMA_001: &str = include_str!("migrations/001_initial_schema.surql");

/// Apply the database schema to an initialized database connection.
///
/// This executes all DEFINE statements in the schema file, creating tables,
/// fields, and the UNIQUE indexes the command engine relies on:
/// - `unique_user_id`: one record per platform account id
/// - `unique_story_name`: story names unique per owner
/// - `unique_element_name`: element names unique per (story, kind)
/// - `unique_plot_point_element`: one detail record per plot-point element
///
/// It's safe to call multiple times - SurrealDB will update existing
/// definitions rather than fail.
pub async fn apply_schema(db: &FicnotesDb) -> Result<(), FicnotesError> {
    db.query(SCHEMA_001).await?;
    Ok(())
}
