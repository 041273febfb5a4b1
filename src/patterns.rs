use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

pub const IGNORE_FILE_NAME: &str = "ignore_patterns.txt";

// Include default patterns at compile time
const DEFAULT_PATTERNS_BYTES: &[u8] = include_bytes!("../default_ignore_patterns.txt");

/// Compile one regex per non-empty, non-comment line.
///
/// With `strict` set, the first invalid line aborts loading; otherwise it is
/// logged and skipped.
fn parse_patterns(content: &str, strict: bool, component: &str) -> Result<Vec<Regex>> {
    let mut patterns = Vec::new();
    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match Regex::new(line) {
            Ok(regex) => patterns.push(regex),
            Err(e) if strict => {
                anyhow::bail!("Invalid regex pattern at line {}: {}", line_num + 1, e)
            }
            Err(e) => {
                warn!(action = "parse", component = component, line_number = line_num + 1, error = %e, "Invalid regex pattern")
            }
        }
    }
    Ok(patterns)
}

/// Load path exclusions for a vault.
///
/// An explicit file wins. Otherwise `ignore_patterns.txt` at the vault root is
/// used when present, even if it holds no patterns. With neither, nothing is
/// excluded.
pub fn load_ignore_patterns(pattern_file_path: Option<&Path>, vault_root: &Path) -> Result<Vec<Regex>> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "pattern_loading",
        "Starting ignore pattern loading"
    );

    let mut patterns = Vec::new();

    if let Some(path) = pattern_file_path {
        info!(action = "load", component = "pattern_file", file_path = ?path, "Loading patterns from specified file");
        if !path.exists() {
            anyhow::bail!("Pattern file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pattern file {:?}", path))?;
        patterns = parse_patterns(&content, true, "regex_pattern")?;
        info!(action = "loaded", component = "pattern_file", pattern_count = patterns.len(), file_path = ?path, "Loaded patterns from file");
    } else {
        let vault_file = vault_root.join(IGNORE_FILE_NAME);
        if vault_file.exists() {
            info!(action = "load", component = "vault_pattern_file", file_path = ?vault_file, "Loading patterns from vault file");
            let content = fs::read_to_string(&vault_file)
                .with_context(|| format!("Failed to read pattern file {:?}", vault_file))?;
            patterns = parse_patterns(&content, false, "regex_pattern")?;
            info!(action = "loaded", component = "vault_pattern_file", pattern_count = patterns.len(), file_path = ?vault_file, "Loaded patterns from vault file");
        }
    }

    let pattern_time = start_time.elapsed();
    info!(
        action = "complete",
        component = "pattern_loading",
        pattern_count = patterns.len(),
        duration_ms = pattern_time.as_millis(),
        "Successfully compiled patterns"
    );
    Ok(patterns)
}

/// `relative_path` uses forward slashes regardless of platform.
pub fn is_ignored(relative_path: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|p| p.is_match(relative_path))
}

/// Write the bundled example patterns to `ignore_patterns.txt` in the vault.
pub fn init_ignore_patterns(vault_root: &Path) -> Result<PathBuf> {
    let default_file = vault_root.join(IGNORE_FILE_NAME);

    if default_file.exists() {
        anyhow::bail!(
            "{:?} already exists. Remove it first if you want to reinitialize.",
            default_file
        );
    }

    let default_content = std::str::from_utf8(DEFAULT_PATTERNS_BYTES)
        .context("Failed to decode embedded default patterns")?;

    fs::write(&default_file, default_content)
        .with_context(|| format!("Failed to write {:?}", default_file))?;
    info!(action = "init", component = "pattern_file", file_path = ?default_file, "Wrote default ignore patterns");

    Ok(default_file)
}
