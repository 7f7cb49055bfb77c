use anyhow::{Context, Result};
use finsight_core::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// `$FINSIGHT_HOME`, else `~/.finsight`.
pub fn finsight_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("FINSIGHT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".finsight"))
}

pub fn ensure_finsight_home() -> Result<PathBuf> {
    let dir = finsight_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Load a JSON snapshot (same shape as the app's data export).
/// Invalid records are reported but kept.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let snap: Snapshot =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;
    for err in snap.validate() {
        warn!(file = %path.display(), "{err}");
    }
    Ok(snap)
}
