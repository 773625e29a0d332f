//! Plot-point details: the header text attached 1:1 to a plot-point element.

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use uuid::Uuid;

use crate::db::connection::FicnotesDb;
use crate::db::is_unique_violation;
use crate::models::StoryElement;
use crate::FicnotesError;

/// Detail record for an element of kind `plot_point`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotPointDetail {
    pub id: RecordId,
    pub element: RecordId,
    pub header: String,
}

/// Create a plot-point element together with its detail record.
///
/// The two writes run in one store transaction: either both records exist
/// afterwards or neither does. The element's `name` field holds the
/// user-chosen index label.
///
/// Returns `DuplicateKey` if the story already has a plot point with the
/// same index.
pub async fn create_plot_point(
    db: &FicnotesDb,
    story: &RecordId,
    index: &str,
    header: &str,
) -> Result<StoryElement, FicnotesError> {
    // Client-generated element key so the detail record can link to it
    // inside the same transaction.
    let key = Uuid::new_v4().simple().to_string();
    let mut resp = db
        .query(
            "BEGIN TRANSACTION;
             CREATE ONLY type::thing('element', $key)
                 CONTENT { story: $story, kind: 'plot_point', name: $name };
             CREATE ONLY plot_point
                 CONTENT { element: type::thing('element', $key), header: $header };
             COMMIT TRANSACTION;",
        )
        .bind(("key", key))
        .bind(("story", story.clone()))
        .bind(("name", index.to_owned()))
        .bind(("header", header.to_owned()))
        .await?;

    let element: Option<StoryElement> = match resp.take(0) {
        Ok(element) => element,
        Err(e) if is_unique_violation(&e) => {
            return Err(FicnotesError::DuplicateKey(e.to_string()))
        }
        Err(e) => return Err(e.into()),
    };
    element.ok_or_else(|| {
        FicnotesError::Transaction("plot point transaction returned no element".into())
    })
}

/// Find the detail record for a plot-point element.
pub async fn find_detail(
    db: &FicnotesDb,
    element: &RecordId,
) -> Result<Option<PlotPointDetail>, FicnotesError> {
    let mut resp = db
        .query("SELECT * FROM plot_point WHERE element = $element")
        .bind(("element", element.clone()))
        .await?;
    let details: Vec<PlotPointDetail> = resp.take(0)?;
    Ok(details.into_iter().next())
}
