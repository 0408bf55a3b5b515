use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `bytes` to `dst` through a temp file in the same directory.
///
/// The temp file is renamed over `dst` in one step, so readers see either the old
/// file or the complete new one. Nothing else in the directory is touched, and the
/// temp file is removed if anything fails.
pub fn write_atomic(dst: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let parent = match dst.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("create directory: {}", parent.display()))?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".resumegen-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .with_context(|| format!("create temp file in {}", parent.display()))?;
    tmp.write_all(bytes)
        .with_context(|| format!("write temp: {}", tmp.path().display()))?;
    tmp.as_file()
        .sync_all()
        .with_context(|| format!("sync temp: {}", tmp.path().display()))?;

    tmp.persist(dst)
        .map_err(|e| anyhow::Error::new(e.error))
        .with_context(|| format!("replace {}", dst.display()))?;
    Ok(())
}
