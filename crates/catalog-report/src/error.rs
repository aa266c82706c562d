use std::io;
use std::path::PathBuf;

use catalog_model::AccessorError;
use thiserror::Error;

/// Errors raised while writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Both the requested path and its fallback could not be written.
    #[error(
        "cannot write {} (locked) or fallback {}: {source}",
        primary.display(),
        alternate.display()
    )]
    Write {
        primary: PathBuf,
        alternate: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("cannot re-open fail report {}: {source}", path.display())]
    Reopen {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Accessor(#[from] AccessorError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
