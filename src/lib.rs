pub mod aggregate;
pub mod args;
pub mod document;
pub mod error;
pub mod heatmap;
pub mod patterns;
pub mod report;
pub mod source;
pub mod stats;
pub mod timezone;
pub mod utils;
pub mod vault;

pub use aggregate::{aggregate, ActivityCounts, AggregateOptions, DayBucketKey, InvalidTimestampPolicy};
pub use args::Args;
pub use document::{Document, DocumentStore};
pub use error::{ActivityError, ActivityResult};
pub use heatmap::{project, HeatmapSample, SampleOrder};
pub use patterns::init_ignore_patterns;
pub use report::{analyze_vault, build_heatmap};
pub use source::list_qualifying_documents;
pub use stats::{ActivitySummary, AnalysisResult};
pub use timezone::{Reference, ReferenceTimezone};
pub use vault::{FsVault, TimestampSource};
