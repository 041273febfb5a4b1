use serde::Serialize;

use crate::aggregate::{ActivityCounts, DayBucketKey};

/// One cell of a calendar heatmap: `{"x": "YYYY-MM-DD", "y": count}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapSample {
    pub x: DayBucketKey,
    pub y: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SampleOrder {
    /// Order in which each day was first seen.
    #[default]
    Insertion,
    /// Oldest day first.
    Chronological,
}

pub fn project(counts: &ActivityCounts, order: SampleOrder) -> Vec<HeatmapSample> {
    let mut samples: Vec<HeatmapSample> = counts
        .iter()
        .map(|(x, y)| HeatmapSample { x, y })
        .collect();

    if order == SampleOrder::Chronological {
        samples.sort_by_key(|s| s.x);
    }
    samples
}
