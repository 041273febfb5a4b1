use anyhow::Context;
use tracing::info;

use crate::document::{Document, DocumentStore};
use crate::error::ActivityResult;
use crate::timezone::Reference;

pub const DEFAULT_EXTENSION: &str = "md";

/// List the documents that count towards this year's activity.
///
/// Keeps documents with the given extension (exact match) whose creation
/// instant lies in the reference year. Documents without a creation instant
/// are kept so the aggregator's policy decides what happens to them.
pub fn list_qualifying_documents<S>(
    store: &S,
    extension: &str,
    reference: &Reference,
) -> ActivityResult<Vec<Document>>
where
    S: DocumentStore + ?Sized,
{
    let all = store
        .documents()
        .context("Failed to list documents from store")?;
    let total = all.len();

    let qualifying: Vec<Document> = all
        .into_iter()
        .filter(|doc| doc.extension == extension)
        .filter(|doc| match doc.created_at {
            Some(instant) => reference.is_current_year(instant),
            None => true,
        })
        .collect();

    info!(
        action = "filter",
        component = "document_source",
        extension,
        year = reference.current_year(),
        total,
        qualifying = qualifying.len(),
        "Selected qualifying documents"
    );
    Ok(qualifying)
}
