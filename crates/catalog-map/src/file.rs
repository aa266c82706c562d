//! JSON mapping files.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MappingError, Result};
use crate::resolver::RawMapping;

/// On-disk mapping: `{"mapping": {...}, "extra_identifiers": [...]}`.
///
/// The `mapping` object may be written in either orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingFile {
    pub mapping: BTreeMap<String, String>,
    pub extra_identifiers: Vec<String>,
}

impl MappingFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| MappingError::Read {
            path: path.display().to_string(),
            message: err.to_string(),
        })?;
        Self::parse(&text).map_err(|err| match err {
            MappingError::Parse { message, .. } => MappingError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| MappingError::Parse {
            path: "<inline>".to_string(),
            message: err.to_string(),
        })
    }

    pub fn raw_mapping(&self) -> RawMapping {
        self.mapping
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }
}
