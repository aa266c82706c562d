//! Polars-backed tabular dataset.
//!
//! Every cell is evaluated as trimmed text. Nulls and floating NaN collapse to
//! the empty string, so rules never see a missing value distinct from "".

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use crate::error::Result;
use crate::workbook::SheetSnapshot;

/// An ordered table of named string columns.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    columns: Vec<String>,
    row_count: usize,
}

impl Dataset {
    /// Wrap an existing frame. Column order is taken from the frame.
    pub fn from_frame(frame: DataFrame) -> Self {
        let columns = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let row_count = frame.height();
        Self {
            frame,
            columns,
            row_count,
        }
    }

    /// Build a dataset from a header row and data rows.
    ///
    /// Headers are normalized, duplicate headers keep only their first
    /// column, and short rows are padded with empty cells.
    pub fn from_rows<S: AsRef<str>>(header: &[S], rows: &[Vec<String>]) -> Result<Self> {
        let mut names: Vec<String> = Vec::with_capacity(header.len());
        let mut positions: Vec<usize> = Vec::with_capacity(header.len());
        for (idx, raw) in header.iter().enumerate() {
            let name = normalize_header(raw.as_ref());
            if names.contains(&name) {
                continue;
            }
            names.push(name);
            positions.push(idx);
        }

        let columns: Vec<Column> = names
            .iter()
            .zip(&positions)
            .map(|(name, &pos)| {
                let values: Vec<String> = rows
                    .iter()
                    .map(|row| row.get(pos).map(|v| v.trim().to_string()).unwrap_or_default())
                    .collect();
                Series::new(name.as_str().into(), values).into_column()
            })
            .collect();

        let frame = DataFrame::new(columns)?;
        Ok(Self {
            frame,
            columns: names,
            row_count: rows.len(),
        })
    }

    /// Build a dataset from a sheet whose first row is the header.
    pub fn from_sheet(sheet: &SheetSnapshot) -> Result<Self> {
        let rows = sheet.rows();
        match rows.split_first() {
            Some((header, data)) => Self::from_rows(header.as_slice(), data),
            None => Self::from_rows::<String>(&[], &[]),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Column names in dataset order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|column| column == name)
    }

    /// Zero-based position of a column in dataset order.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Trimmed text of every cell in a column, in row order.
    pub fn values(&self, name: &str) -> Option<Vec<String>> {
        let column = self.frame.column(name).ok()?;
        let values = (0..self.row_count)
            .map(|idx| cell_text(column.get(idx).unwrap_or(AnyValue::Null)))
            .collect();
        Some(values)
    }

    /// Trimmed text of one cell.
    pub fn value(&self, name: &str, row: usize) -> Option<String> {
        let column = self.frame.column(name).ok()?;
        if row >= self.row_count {
            return None;
        }
        Some(cell_text(column.get(row).unwrap_or(AnyValue::Null)))
    }
}

/// Render a polars value as trimmed cell text.
pub fn cell_text(value: AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Float64(f) if f.is_nan() => String::new(),
        AnyValue::Float32(f) if f.is_nan() => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Trim, strip a byte-order mark and collapse inner whitespace runs.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn headers_are_normalized_and_deduplicated() {
        let header = ["\u{feff}Product  ID ", "Brand", "Brand"];
        let data = rows(&[&["  P1 ", "Acme", "Other"][..], &["P2"][..]]);
        let dataset = Dataset::from_rows(&header, &data).expect("dataset");

        assert_eq!(dataset.columns(), ["Product ID", "Brand"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(
            dataset.values("Product ID"),
            Some(vec!["P1".to_string(), "P2".to_string()])
        );
        assert_eq!(dataset.value("Brand", 1), Some(String::new()));
        assert_eq!(dataset.values("Missing"), None);
    }

    #[test]
    fn nan_collapses_to_empty_text() {
        assert_eq!(cell_text(AnyValue::Float64(f64::NAN)), "");
        assert_eq!(cell_text(AnyValue::Null), "");
        assert_eq!(cell_text(AnyValue::String("  x ")), "x");
        assert_eq!(cell_text(AnyValue::Int64(7)), "7");
    }
}
