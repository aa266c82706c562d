//! Per-run validation options.

use serde::{Deserialize, Serialize};

/// Options for one validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Validate this sheet instead of the workbook's active sheet.
    pub sheet: Option<String>,
    /// Extra identifier names checked alongside the standard secondary codes.
    pub extra_identifiers: Vec<String>,
}

impl ValidationOptions {
    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    #[must_use]
    pub fn with_extra_identifier(mut self, name: impl Into<String>) -> Self {
        self.extra_identifiers.push(name.into());
        self
    }
}
