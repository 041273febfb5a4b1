use anyhow::{Context, Result};
use chrono::Utc;
use std::time::Instant;
use tracing::info;

use crate::aggregate::{aggregate, AggregateOptions};
use crate::args::OutputFormat;
use crate::document::DocumentStore;
use crate::error::ActivityResult;
use crate::heatmap::{project, SampleOrder};
use crate::patterns;
use crate::source::list_qualifying_documents;
use crate::stats::{busiest_days, ActivitySummary, AnalysisResult};
use crate::timezone::Reference;
use crate::utils::format_number;
use crate::vault::FsVault;
use crate::Args;

/// Run the whole pipeline over any document store.
pub fn build_heatmap<S>(
    store: &S,
    extension: &str,
    options: &AggregateOptions,
    order: SampleOrder,
) -> ActivityResult<AnalysisResult>
where
    S: DocumentStore + ?Sized,
{
    let reference = options.reference;
    let documents = list_qualifying_documents(store, extension, &reference)?;
    let counts = aggregate(&documents, options)?;
    let samples = project(&counts, order);
    let summary = ActivitySummary::from_counts(&counts, reference.current_year());

    Ok(AnalysisResult {
        reference,
        counts,
        samples,
        summary,
    })
}

pub fn analyze_vault(args: &Args) -> Result<AnalysisResult> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", vault = ?args.vault, "Starting vault activity analysis");

    let ignore_patterns = if args.no_ignore {
        Vec::new()
    } else {
        patterns::load_ignore_patterns(args.patterns.as_deref(), &args.vault)?
    };

    let vault = FsVault::new(&args.vault)
        .with_timestamp_source(args.timestamp)
        .with_ignore_patterns(ignore_patterns);

    let reference = Reference::new(args.now.unwrap_or_else(Utc::now), args.timezone);
    let options = AggregateOptions::new(reference).with_policy(args.invalid_timestamps);

    let result = build_heatmap(&vault, &args.extension, &options, args.order)
        .with_context(|| format!("Failed to analyze vault at {:?}", vault.root()))?;

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(result)
}

pub fn render(result: &AnalysisResult, args: &Args) -> Result<String> {
    match args.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.samples)?),
        OutputFormat::Counts => Ok(serde_json::to_string_pretty(&result.counts)?),
        OutputFormat::Text => Ok(render_text(result, args.top)),
    }
}

fn render_text(result: &AnalysisResult, top: Option<usize>) -> String {
    let summary = &result.summary;
    let mut lines = Vec::new();

    lines.push(format!(
        "--- Activity for {} ({}) ---",
        summary.year, result.reference.timezone
    ));
    lines.push(format!(
        "Notes created: {}",
        format_number(summary.documents)
    ));
    lines.push(format!(
        "Active days: {}",
        format_number(summary.active_days as u64)
    ));
    if summary.skipped > 0 {
        lines.push(format!(
            "Skipped (no creation time): {}",
            format_number(u64::from(summary.skipped))
        ));
    }
    if let Some((day, count)) = summary.busiest_day {
        lines.push(format!("Busiest day: {} ({} notes)", day, count));
    }

    if let Some(top_count) = top {
        let days = busiest_days(&result.counts, top_count);
        lines.push(String::new());
        lines.push(format!("Top {} busiest days:", days.len()));
        for (day, count) in days {
            lines.push(format!("- {}: {}", day, format_number(u64::from(count))));
        }
    }

    if !result.samples.is_empty() {
        lines.push(String::new());
        for sample in &result.samples {
            lines.push(format!("{} contributions on {}", sample.y, sample.x));
        }
    }

    lines.join("\n")
}
