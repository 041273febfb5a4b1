//! Day-bucket counting over a set of documents.
//!
//! Counts keep the order in which each day was first seen in the input.
//! Callers that need chronological order must sort explicitly (see
//! [`crate::heatmap::SampleOrder`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

use crate::document::Document;
use crate::error::{ActivityError, ActivityResult};
use crate::timezone::{Reference, ReferenceTimezone};

pub const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in the reference timezone, rendered as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayBucketKey(NaiveDate);

impl DayBucketKey {
    pub fn from_instant(instant: DateTime<Utc>, timezone: ReferenceTimezone) -> Self {
        Self(timezone.calendar_date(instant))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayBucketKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayBucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl Serialize for DayBucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What to do with a document whose creation time cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum InvalidTimestampPolicy {
    /// Abort the aggregation with [`ActivityError::InvalidDocument`].
    #[default]
    FailFast,
    /// Leave the document out and record it in [`ActivityCounts::skipped`].
    SkipAndCount,
}

#[derive(Debug, Clone, Copy)]
pub struct AggregateOptions {
    pub reference: Reference,
    pub policy: InvalidTimestampPolicy,
}

impl AggregateOptions {
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            policy: InvalidTimestampPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: InvalidTimestampPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Per-day document counts in first-occurrence order.
///
/// Only days with at least one document appear.
#[derive(Debug, Clone, Default)]
pub struct ActivityCounts {
    entries: Vec<(DayBucketKey, u32)>,
    index: HashMap<DayBucketKey, usize>,
    skipped: u32,
}

impl ActivityCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: DayBucketKey) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &DayBucketKey) -> Option<u32> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DayBucketKey, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of documents counted across all days.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    /// Documents left out under [`InvalidTimestampPolicy::SkipAndCount`].
    pub fn skipped(&self) -> u32 {
        self.skipped
    }
}

impl Serialize for ActivityCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

pub fn aggregate(documents: &[Document], options: &AggregateOptions) -> ActivityResult<ActivityCounts> {
    let reference = &options.reference;
    let mut counts = ActivityCounts::new();
    let mut outside_year = 0u32;

    for doc in documents {
        let Some(created_at) = doc.created_at else {
            match options.policy {
                InvalidTimestampPolicy::FailFast => {
                    return Err(ActivityError::InvalidDocument {
                        path: doc.path.clone(),
                    })
                }
                InvalidTimestampPolicy::SkipAndCount => {
                    warn!(action = "skip", component = "aggregator", path = ?doc.path, "Document has no creation time");
                    counts.skipped += 1;
                    continue;
                }
            }
        };

        // The source already filters by year; re-checked here so the counts
        // never depend on how the input was produced.
        if !reference.is_current_year(created_at) {
            outside_year += 1;
            continue;
        }

        counts.increment(DayBucketKey::from_instant(created_at, reference.timezone));
    }

    info!(
        action = "complete",
        component = "aggregator",
        year = reference.current_year(),
        timezone = %reference.timezone,
        active_days = counts.len(),
        documents = counts.total(),
        skipped = counts.skipped,
        outside_year,
        "Aggregated activity counts"
    );
    Ok(counts)
}
