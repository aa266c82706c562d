//! Error types for mapping resolution.

use thiserror::Error;

/// Errors from mapping resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    /// Some entries read as `property → header`, others as `header → property`.
    #[error(
        "mapping orientation is ambiguous: [{}] read as property→header, [{}] as header→property",
        forward.join(", "), inverse.join(", ")
    )]
    AmbiguousOrientation {
        /// Keys of entries whose key is a known property.
        forward: Vec<String>,
        /// Keys of entries whose value is a known property.
        inverse: Vec<String>,
    },

    /// A mapped name is neither a standard property nor a declared extra.
    #[error("unknown property: {name}")]
    UnknownProperty { name: String },

    /// One property was given two different explicit headers.
    #[error("property '{property}' mapped twice: '{first}' and '{second}'")]
    DuplicateProperty {
        property: String,
        first: String,
        second: String,
    },

    /// A property was mapped to a blank header.
    #[error("property '{property}' mapped to an empty header")]
    EmptyHeader { property: String },

    /// The mapping file could not be read.
    #[error("failed to read mapping file {path}: {message}")]
    Read { path: String, message: String },

    /// The mapping file is not valid JSON of the expected shape.
    #[error("invalid mapping file {path}: {message}")]
    Parse { path: String, message: String },
}

impl MappingError {
    /// Property or key name associated with this error, if any.
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::UnknownProperty { name } => Some(name),
            Self::DuplicateProperty { property, .. } | Self::EmptyHeader { property } => {
                Some(property)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MappingError>;
