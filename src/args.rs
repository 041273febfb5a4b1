use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::aggregate::InvalidTimestampPolicy;
use crate::heatmap::SampleOrder;
use crate::source::DEFAULT_EXTENSION;
use crate::timezone::ReferenceTimezone;
use crate::vault::TimestampSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// JSON array of {"x": date, "y": count} samples
    Json,
    /// JSON object mapping date to count
    Counts,
}

#[derive(Parser, Debug)]
#[command(
    name = "notegrid",
    about = "Count notes created per day this year and emit calendar heatmap data",
    version,
    long_about = None
)]
pub struct Args {
    /// Vault directory to scan
    #[arg(default_value = ".")]
    pub vault: PathBuf,

    /// File extension of documents to count
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Filesystem timestamp used as the creation time (use `modified` where birth time is not recorded)
    #[arg(long, value_enum, default_value_t = TimestampSource::Created)]
    pub timestamp: TimestampSource,

    /// Timezone for day buckets: utc, local, or an IANA name
    #[arg(long, default_value = "utc")]
    pub timezone: ReferenceTimezone,

    /// How to handle documents without a creation time
    #[arg(long, value_enum, default_value_t = InvalidTimestampPolicy::FailFast)]
    pub invalid_timestamps: InvalidTimestampPolicy,

    /// Order of emitted samples
    #[arg(long, value_enum, default_value_t = SampleOrder::Insertion)]
    pub order: SampleOrder,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Reference instant (RFC 3339) that defines the current year; defaults to now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Number of busiest days to list in the text report
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Path to an ignore pattern file; defaults to ignore_patterns.txt in the vault, if present
    #[arg(short, long)]
    pub patterns: Option<PathBuf>,

    /// Disable pattern-based path exclusion
    #[arg(long)]
    pub no_ignore: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Write ignore_patterns.txt with example patterns into the vault
    #[arg(long)]
    pub init: bool,
}
