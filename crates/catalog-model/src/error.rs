use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("dataframe error: {0}")]
    Polars(#[from] polars::error::PolarsError),
    #[error(transparent)]
    Accessor(#[from] AccessorError),
}

/// Failures while reading raw spreadsheet content.
#[derive(Debug, Error)]
pub enum AccessorError {
    #[error("sheet not found: {sheet}")]
    SheetNotFound { sheet: String },
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
