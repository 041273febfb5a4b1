use std::cmp::Reverse;

use crate::aggregate::{ActivityCounts, DayBucketKey};
use crate::heatmap::HeatmapSample;
use crate::timezone::Reference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySummary {
    pub year: i32,
    pub documents: u64,
    pub active_days: usize,
    pub skipped: u32,
    pub busiest_day: Option<(DayBucketKey, u32)>,
}

impl ActivitySummary {
    pub fn from_counts(counts: &ActivityCounts, year: i32) -> Self {
        Self {
            year,
            documents: counts.total(),
            active_days: counts.len(),
            skipped: counts.skipped(),
            busiest_day: busiest_days(counts, 1).into_iter().next(),
        }
    }
}

/// Days with the most documents, ties broken by the earlier date.
pub fn busiest_days(counts: &ActivityCounts, n: usize) -> Vec<(DayBucketKey, u32)> {
    let mut days: Vec<(DayBucketKey, u32)> = counts.iter().collect();
    days.sort_by_key(|&(day, count)| (Reverse(count), day));
    days.truncate(n);
    days
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub reference: Reference,
    pub counts: ActivityCounts,
    pub samples: Vec<HeatmapSample>,
    pub summary: ActivitySummary,
}
