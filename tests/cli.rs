use chrono::{Datelike, Utc};
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use notegrid::patterns::IGNORE_FILE_NAME;
use notegrid::{analyze_vault, report, Args, ReferenceTimezone, SampleOrder};

fn vault_with(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp vault");
    for file in files {
        let path = dir.path().join(file);
        fs::create_dir_all(path.parent().expect("parent")).expect("create note dir");
        fs::write(&path, "# note\n").expect("write note");
    }
    dir
}

fn args_for(vault: &Path, extra: &[&str]) -> Args {
    let now = Utc::now().to_rfc3339();
    let mut argv = vec![
        "notegrid".to_string(),
        vault.to_string_lossy().to_string(),
        "--timestamp".to_string(),
        "modified".to_string(),
        "--now".to_string(),
        now,
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    Args::parse_from(argv)
}

const NOTES: &[&str] = &[
    "journal/day.md",
    "templates/weekly.md",
    "drawings/board.excalidraw.md",
    "attachments/scan.png",
];

#[test]
fn default_run_counts_every_note() {
    let vault = vault_with(NOTES);
    let args = args_for(vault.path(), &[]);

    let result = analyze_vault(&args).expect("analyze vault");
    assert_eq!(result.summary.documents, 3);
    assert_eq!(result.summary.year, Utc::now().year());

    let text = report::render(&result, &args).expect("render text");
    assert!(text.contains("Notes created: 3"));
}

#[test]
fn vault_ignore_file_excludes_matching_paths() {
    let vault = vault_with(NOTES);
    fs::write(vault.path().join(IGNORE_FILE_NAME), "^templates/\n").expect("write ignore file");

    let result = analyze_vault(&args_for(vault.path(), &[])).expect("analyze vault");
    assert_eq!(result.summary.documents, 2);

    let result = analyze_vault(&args_for(vault.path(), &["--no-ignore"])).expect("analyze vault");
    assert_eq!(result.summary.documents, 3);
}

#[test]
fn explicit_pattern_file_is_used() {
    let vault = vault_with(NOTES);
    let elsewhere = tempfile::tempdir().expect("create pattern dir");
    let pattern_file = elsewhere.path().join("exclude.txt");
    fs::write(&pattern_file, "\\.excalidraw\\.md$\n").expect("write pattern file");

    let pattern_arg = pattern_file.to_string_lossy().to_string();
    let args = args_for(vault.path(), &["--patterns", &pattern_arg]);
    let result = analyze_vault(&args).expect("analyze vault");
    assert_eq!(result.summary.documents, 2);
}

#[test]
fn reference_year_comes_from_now_flag() {
    let vault = vault_with(NOTES);
    let args = Args::parse_from([
        "notegrid".to_string(),
        vault.path().to_string_lossy().to_string(),
        "--timestamp".to_string(),
        "modified".to_string(),
        "--now".to_string(),
        "1999-06-01T00:00:00Z".to_string(),
        "--format".to_string(),
        "json".to_string(),
    ]);

    let result = analyze_vault(&args).expect("analyze vault");
    assert_eq!(result.summary.year, 1999);
    assert!(result.counts.is_empty());

    let json: serde_json::Value =
        serde_json::from_str(&report::render(&result, &args).expect("render json")).expect("parse json");
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn timezone_order_and_format_flags_are_wired() {
    let vault = vault_with(NOTES);
    let args = args_for(
        vault.path(),
        &[
            "--timezone",
            "Asia/Tokyo",
            "--order",
            "chronological",
            "--format",
            "counts",
        ],
    );

    let result = analyze_vault(&args).expect("analyze vault");
    assert_eq!(
        result.reference.timezone,
        ReferenceTimezone::Named(chrono_tz::Asia::Tokyo)
    );
    assert_eq!(args.order, SampleOrder::Chronological);

    let json: serde_json::Value =
        serde_json::from_str(&report::render(&result, &args).expect("render counts")).expect("parse json");
    let total: u64 = json
        .as_object()
        .expect("counts object")
        .values()
        .map(|v| v.as_u64().expect("count"))
        .sum();
    assert_eq!(total, 3);
}

#[test]
fn skip_policy_accounts_for_every_note_with_birth_time() {
    let vault = vault_with(NOTES);
    let args = Args::parse_from([
        "notegrid".to_string(),
        vault.path().to_string_lossy().to_string(),
        "--invalid-timestamps".to_string(),
        "skip-and-count".to_string(),
    ]);

    // Filesystems without birth time report every note as skipped.
    let result = analyze_vault(&args).expect("analyze vault");
    assert_eq!(result.summary.documents + u64::from(result.summary.skipped), 3);
}
