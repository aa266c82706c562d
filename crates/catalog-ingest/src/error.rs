use std::io;
use std::path::PathBuf;

use catalog_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("cannot read sheet '{sheet}': {source}")]
    Read {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("{} contains no sheets", path.display())]
    NoSheets { path: PathBuf },

    #[error("sheet not found: {sheet}")]
    SheetNotFound { sheet: String },

    #[error("unsupported file format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("xlsx XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
