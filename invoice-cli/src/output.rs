use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use invoice_core::RenderedInvoice;
use tracing::info;

/// Write a rendered invoice into `out_dir` under its derived filename.
///
/// Invoice ids and city names go into the filename verbatim, so a name
/// that would escape `out_dir` is refused rather than written.
pub fn save(rendered: &RenderedInvoice, out_dir: &Path) -> Result<PathBuf> {
    let name = Path::new(&rendered.filename);
    if name.components().count() != 1 || name.file_name() != Some(name.as_os_str()) {
        bail!(
            "refusing to write {:?}: invoice id and city must not contain path separators",
            rendered.filename
        );
    }

    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(name);
    fs::write(&path, &rendered.bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), size = rendered.bytes.len(), "invoice saved");
    Ok(path)
}
