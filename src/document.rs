use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// One file in the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    /// Extension without the leading dot, e.g. `md`.
    pub extension: String,
    /// `None` when the store cannot tell when the file was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, created_at: Option<DateTime<Utc>>) -> Self {
        let path = path.into();
        let extension = extension_of(&path);
        Self {
            path,
            extension,
            created_at,
        }
    }
}

pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Read-only listing capability over an external document store.
pub trait DocumentStore {
    fn documents(&self) -> Result<Vec<Document>>;
}

impl DocumentStore for Vec<Document> {
    fn documents(&self) -> Result<Vec<Document>> {
        Ok(self.clone())
    }
}
