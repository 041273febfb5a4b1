use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::document::{Document, DocumentStore};
use crate::patterns::is_ignored;

/// Which filesystem timestamp stands in for a note's creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum TimestampSource {
    /// File birth time. Not every filesystem records it.
    #[default]
    Created,
    Modified,
}

/// A directory of notes on disk.
///
/// Hidden entries (`.obsidian`, `.trash`, `.git`, ...) are never listed.
/// Document paths are relative to the vault root.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    timestamp_source: TimestampSource,
    ignore_patterns: Vec<Regex>,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            timestamp_source: TimestampSource::default(),
            ignore_patterns: Vec::new(),
        }
    }

    pub fn with_timestamp_source(mut self, source: TimestampSource) -> Self {
        self.timestamp_source = source;
        self
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn timestamp_of(&self, entry: &DirEntry) -> Result<Option<DateTime<Utc>>> {
        let metadata = entry
            .metadata()
            .with_context(|| format!("Failed to read metadata for {:?}", entry.path()))?;

        let timestamp = match self.timestamp_source {
            TimestampSource::Created => metadata.created(),
            TimestampSource::Modified => metadata.modified(),
        };

        match timestamp {
            Ok(t) => Ok(Some(DateTime::<Utc>::from(t))),
            Err(e) => {
                debug!(action = "stat", component = "vault", path = ?entry.path(), error = %e, "Timestamp unavailable");
                Ok(None)
            }
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

impl DocumentStore for FsVault {
    fn documents(&self) -> Result<Vec<Document>> {
        let start_time = Instant::now();
        info!(action = "start", component = "vault", root = ?self.root, source = ?self.timestamp_source, "Listing vault documents");

        if !self.root.is_dir() {
            anyhow::bail!("Vault directory not found at {:?}", self.root);
        }

        let mut documents = Vec::new();
        let mut ignored = 0u32;

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = entry.with_context(|| format!("Failed to walk vault at {:?}", self.root))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .unwrap_or_else(|_| entry.path());
            let relative_str = relative.to_string_lossy().replace('\\', "/");
            if is_ignored(&relative_str, &self.ignore_patterns) {
                ignored += 1;
                continue;
            }

            let created_at = self.timestamp_of(&entry)?;
            documents.push(Document::new(relative, created_at));
        }

        info!(
            action = "complete",
            component = "vault",
            document_count = documents.len(),
            ignored,
            duration_ms = start_time.elapsed().as_millis(),
            "Vault listing completed"
        );
        Ok(documents)
    }
}
