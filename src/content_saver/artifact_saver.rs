use anyhow::{Context, Result};
use log::warn;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::browser::PageCapture;
use crate::utils::constants::{LINKS_FILE, SCREENSHOT_FILE, SITE_DATA_FILE, SNAPSHOT_FILE};

/// Write `content` to `dir/name` atomically.
///
/// The bytes go to a temp file in the same directory which is then renamed
/// over the final path, so a reader never observes a half-written artifact.
/// File I/O runs on the blocking pool.
pub async fn write_artifact(dir: &Path, name: &str, content: Vec<u8>) -> Result<PathBuf> {
    let parent_dir = dir.to_path_buf();
    let path = dir.join(name);
    let target = path.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut temp_file = NamedTempFile::new_in(&parent_dir)?;
        temp_file.write_all(&content)?;
        temp_file.persist(&target)?;
        Ok(())
    })
    .await
    .map_err(|e| anyhow::anyhow!("Blocking write task panicked: {e}"))?
    .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

/// Save the sanitized page as `site_data.html`
pub async fn save_site_data(dir: &Path, sanitized_html: String) -> Result<PathBuf> {
    write_artifact(dir, SITE_DATA_FILE, sanitized_html.into_bytes()).await
}

/// Save discovered links as `links.txt`, one per line, no trailing newline
pub async fn save_links(dir: &Path, links: &[String]) -> Result<PathBuf> {
    write_artifact(dir, LINKS_FILE, links.join("\n").into_bytes()).await
}

/// Save the rendered screenshot and MHTML snapshot, both or neither.
///
/// Both temp files are fully written before either is renamed into place.
/// If the second rename fails the first file is removed again. The blocking
/// task runs to completion even if the caller stops waiting, so callers must
/// not race this against a timer.
pub async fn save_page_capture(dir: &Path, capture: PageCapture) -> Result<()> {
    let parent_dir = dir.to_path_buf();
    let screenshot_path = dir.join(SCREENSHOT_FILE);
    let snapshot_path = dir.join(SNAPSHOT_FILE);

    tokio::task::spawn_blocking(move || -> Result<()> {
        let mut screenshot = NamedTempFile::new_in(&parent_dir)?;
        screenshot.write_all(&capture.screenshot_png)?;
        let mut snapshot = NamedTempFile::new_in(&parent_dir)?;
        snapshot.write_all(capture.snapshot_mhtml.as_bytes())?;

        screenshot
            .persist(&screenshot_path)
            .with_context(|| format!("Failed to write {}", screenshot_path.display()))?;
        if let Err(e) = snapshot.persist(&snapshot_path) {
            if let Err(rm) = std::fs::remove_file(&screenshot_path) {
                warn!(
                    "Failed to remove orphaned {}: {rm}",
                    screenshot_path.display()
                );
            }
            return Err(anyhow::Error::new(e.error)
                .context(format!("Failed to write {}", snapshot_path.display())));
        }
        Ok(())
    })
    .await
    .map_err(|e| anyhow::anyhow!("Blocking write task panicked: {e}"))?
}
