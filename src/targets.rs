//! Target list loading
//!
//! One URL per line. Blank lines and lines starting with `#` or `-` are
//! skipped, so a YAML-ish list header or comments can live in the file.

use std::path::Path;

use crate::scan_engine::{ScanError, ScanResult};

/// Parse target lines, preserving order
#[must_use]
pub fn parse_targets(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with('-'))
        .map(str::to_string)
        .collect()
}

/// Read and parse the target list at `path`
pub async fn load_targets(path: &Path) -> ScanResult<Vec<String>> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScanError::TargetsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_targets(&contents))
}
