use std::path::{Path, PathBuf};

use catalog_model::Report;
use tracing::info;

use crate::error::Result;
use crate::writer::write_with_fallback;

/// Write the sanitized JSON report, falling back when the target is locked.
pub fn write_json_report(report: &Report, path: &Path) -> Result<PathBuf> {
    let json = report.to_json()?;
    let written = write_with_fallback(path, json.as_bytes())?;
    info!(path = %written.display(), "JSON report written");
    Ok(written)
}
