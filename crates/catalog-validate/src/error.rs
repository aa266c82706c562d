use catalog_model::AccessorError;
use thiserror::Error;

/// Why one rule group could not be evaluated.
#[derive(Debug, Error)]
pub enum EvaluationCause {
    #[error(transparent)]
    Accessor(#[from] AccessorError),
    #[error("panicked: {0}")]
    Panic(String),
}

/// Errors that abort a validation run. No partial report is returned.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A rule group failed or panicked.
    #[error("rule group '{group}' failed")]
    Evaluation {
        group: &'static str,
        #[source]
        source: EvaluationCause,
    },
    /// The sheet to validate could not be determined.
    #[error("cannot select a sheet to validate: {0}")]
    Sheet(#[source] AccessorError),
}

pub type Result<T> = std::result::Result<T, ValidationError>;
