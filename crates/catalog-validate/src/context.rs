//! Shared evaluation context and the three-tier applicability gate.

use catalog_model::{
    CheckResult, ColumnAddress, Dataset, Property, PropertyMapping, RawAccessor,
    SpreadsheetAddress,
};

/// Inputs every rule group receives.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub dataset: &'a Dataset,
    pub mapping: &'a PropertyMapping,
    pub raw: &'a dyn RawAccessor,
    /// Sheet the dataset was read from.
    pub sheet: &'a str,
}

/// Why a check does not apply. Checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotMapped,
    ColumnMissing,
    NoData,
}

impl SkipReason {
    pub fn explanation(&self) -> &'static str {
        match self {
            Self::NotMapped => "Not mapped",
            Self::ColumnMissing => "Mapped but column missing",
            Self::NoData => "No data present",
        }
    }

    pub fn into_result(self, check: impl Into<String>) -> CheckResult {
        CheckResult::skip(check, self.explanation())
    }
}

/// A mapped column that passed the gate.
#[derive(Debug, Clone)]
pub struct MappedColumn {
    pub header: String,
    pub address: ColumnAddress,
    /// Trimmed cell text, one entry per dataset row.
    pub values: Vec<String>,
}

impl MappedColumn {
    pub fn row_count(&self) -> usize {
        self.values.len()
    }

    pub fn non_empty(&self) -> usize {
        self.values.iter().filter(|value| !value.is_empty()).count()
    }

    /// Spreadsheet address of a dataset row in this column.
    pub fn cell(&self, row: usize) -> SpreadsheetAddress {
        self.address.cell(row)
    }
}

impl<'a> RuleContext<'a> {
    pub fn new(
        dataset: &'a Dataset,
        mapping: &'a PropertyMapping,
        raw: &'a dyn RawAccessor,
        sheet: &'a str,
    ) -> Self {
        Self {
            dataset,
            mapping,
            raw,
            sheet,
        }
    }

    /// Apply the gate: not mapped, then column missing, then no data.
    pub fn open(&self, property: &Property) -> Result<MappedColumn, SkipReason> {
        let header = self.mapping.header(property).ok_or(SkipReason::NotMapped)?;
        let address = ColumnAddress::locate(self.dataset.columns(), header)
            .ok_or(SkipReason::ColumnMissing)?;
        let values = self.dataset.values(header).unwrap_or_default();
        if values.iter().all(String::is_empty) {
            return Err(SkipReason::NoData);
        }
        Ok(MappedColumn {
            header: header.to_string(),
            address,
            values,
        })
    }
}
