//! Output writing with a single retry when the target is locked.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ReportError, Result};

/// Appended to the file stem of the retry path.
pub const FALLBACK_SUFFIX: &str = "_failreport";

/// Retry path for `path`: `<stem>_failreport<.ext>` in the same directory.
pub fn fallback_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{FALLBACK_SUFFIX}.{}", ext.to_string_lossy()),
        None => format!("{stem}{FALLBACK_SUFFIX}"),
    };
    path.with_file_name(name)
}

/// Whether a write failed because another process holds the file.
pub fn is_locked(err: &io::Error) -> bool {
    if err.kind() == io::ErrorKind::PermissionDenied {
        return true;
    }
    // ERROR_SHARING_VIOLATION / ERROR_LOCK_VIOLATION
    cfg!(windows) && matches!(err.raw_os_error(), Some(32 | 33))
}

/// Write `bytes` to `path`, retrying once at [`fallback_path`] when the
/// primary target is locked. Returns the path actually written.
pub fn write_with_fallback(path: &Path, bytes: &[u8]) -> Result<PathBuf> {
    write_with(path, |target| fs::write(target, bytes))
}

/// [`write_with_fallback`] over an arbitrary write operation.
pub fn write_with<F>(path: &Path, mut write: F) -> Result<PathBuf>
where
    F: FnMut(&Path) -> io::Result<()>,
{
    match write(path) {
        Ok(()) => {
            debug!(path = %path.display(), "report written");
            Ok(path.to_path_buf())
        }
        Err(err) if is_locked(&err) => {
            let alternate = fallback_path(path);
            warn!(
                primary = %path.display(),
                alternate = %alternate.display(),
                error = %err,
                "output locked, retrying at fallback path"
            );
            match write(&alternate) {
                Ok(()) => Ok(alternate),
                Err(source) => Err(ReportError::Write {
                    primary: path.to_path_buf(),
                    alternate,
                    source,
                }),
            }
        }
        Err(err) => Err(ReportError::Io(err)),
    }
}
