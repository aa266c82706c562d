//! Raw spreadsheet access.
//!
//! Rules that need workbook-level facts (sheet list, hidden rows and
//! columns, hyperlinks, untrimmed cell text) read them through
//! [`RawAccessor`]. [`WorkbookSnapshot`] is the in-memory implementation
//! filled by the loaders and by tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::address::{column_index, column_letter};
use crate::dataset::normalize_header;
use crate::error::AccessorError;

type AccessorResult<T> = std::result::Result<T, AccessorError>;

/// Read-only view of the source workbook.
pub trait RawAccessor {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Name of the sheet that was active when the file was saved.
    fn active_sheet(&self) -> Option<String>;

    /// One-based numbers of hidden rows, ascending.
    fn hidden_rows(&self, sheet: &str) -> AccessorResult<Vec<usize>>;

    /// Letters of hidden columns, in column order.
    fn hidden_columns(&self, sheet: &str) -> AccessorResult<Vec<String>>;

    /// Header row as `(normalized text, column letter)` pairs, normalized
    /// the way dataset headers are.
    fn header_letters(&self, sheet: &str) -> AccessorResult<Vec<(String, String)>>;

    /// Hyperlink target attached to a cell such as `C5`.
    fn hyperlink(&self, sheet: &str, cell: &str) -> Option<String>;

    /// Untrimmed text of every data cell (spreadsheet row 2 onward) in a column.
    fn column_cells(&self, sheet: &str, letter: &str) -> AccessorResult<Vec<String>>;

    /// Letter of the first header cell matching `header` after both sides
    /// are normalized.
    fn column_letter_for(&self, sheet: &str, header: &str) -> Option<String> {
        let header = normalize_header(header);
        self.header_letters(sheet)
            .ok()?
            .into_iter()
            .find(|(text, _)| normalize_header(text) == header)
            .map(|(_, letter)| letter)
    }

    /// Resolve the sheet to validate: a requested name when it exists,
    /// otherwise the active sheet, otherwise the first sheet.
    fn resolve_sheet(&self, requested: Option<&str>) -> AccessorResult<String> {
        let names = self.sheet_names();
        if let Some(requested) = requested {
            if names.iter().any(|name| name == requested) {
                return Ok(requested.to_string());
            }
        }
        self.active_sheet()
            .filter(|active| names.contains(active))
            .or_else(|| names.first().cloned())
            .ok_or(AccessorError::NoSheets)
    }
}

/// One sheet's cells and metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetSnapshot {
    name: String,
    rows: Vec<Vec<String>>,
    hidden_rows: BTreeSet<usize>,
    hidden_columns: BTreeSet<usize>,
    hyperlinks: BTreeMap<String, String>,
}

impl SheetSnapshot {
    /// A sheet with the given rows; the first row is the header.
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
            ..Self::default()
        }
    }

    pub fn from_strs(name: impl Into<String>, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect();
        Self::new(name, rows)
    }

    /// Mark a one-based row as hidden.
    #[must_use]
    pub fn with_hidden_row(mut self, row: usize) -> Self {
        self.hide_row(row);
        self
    }

    /// Mark a zero-based column as hidden.
    #[must_use]
    pub fn with_hidden_column(mut self, column: usize) -> Self {
        self.hide_column(column);
        self
    }

    #[must_use]
    pub fn with_hyperlink(mut self, cell: impl Into<String>, target: impl Into<String>) -> Self {
        self.add_hyperlink(cell, target);
        self
    }

    pub fn hide_row(&mut self, row: usize) {
        self.hidden_rows.insert(row);
    }

    pub fn hide_column(&mut self, column: usize) {
        self.hidden_columns.insert(column);
    }

    pub fn add_hyperlink(&mut self, cell: impl Into<String>, target: impl Into<String>) {
        self.hyperlinks
            .insert(cell.into().to_ascii_uppercase(), target.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows, header included.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn hyperlinks(&self) -> &BTreeMap<String, String> {
        &self.hyperlinks
    }

    fn header_letters(&self) -> Vec<(String, String)> {
        self.rows
            .first()
            .map(|header| {
                header
                    .iter()
                    .enumerate()
                    .map(|(idx, text)| (normalize_header(text), column_letter(idx)))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn column_cells(&self, letter: &str) -> Vec<String> {
        let Some(index) = column_index(letter) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .skip(1)
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect()
    }
}

/// In-memory workbook: every sheet plus the active-sheet index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookSnapshot {
    sheets: Vec<SheetSnapshot>,
    active: usize,
}

impl WorkbookSnapshot {
    pub fn new(sheets: Vec<SheetSnapshot>) -> Self {
        Self { sheets, active: 0 }
    }

    /// A one-sheet workbook.
    pub fn single(sheet: SheetSnapshot) -> Self {
        Self::new(vec![sheet])
    }

    #[must_use]
    pub fn with_active(mut self, index: usize) -> Self {
        self.set_active(index);
        self
    }

    /// Set the active sheet index; out-of-range indexes fall back to zero.
    pub fn set_active(&mut self, index: usize) {
        self.active = if index < self.sheets.len() { index } else { 0 };
    }

    pub fn sheets(&self) -> &[SheetSnapshot] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetSnapshot> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn active(&self) -> Option<&SheetSnapshot> {
        self.sheets.get(self.active)
    }

    fn require(&self, name: &str) -> AccessorResult<&SheetSnapshot> {
        self.sheet(name).ok_or_else(|| AccessorError::SheetNotFound {
            sheet: name.to_string(),
        })
    }
}

impl RawAccessor for WorkbookSnapshot {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    fn active_sheet(&self) -> Option<String> {
        self.active().map(|sheet| sheet.name.clone())
    }

    fn hidden_rows(&self, sheet: &str) -> AccessorResult<Vec<usize>> {
        Ok(self.require(sheet)?.hidden_rows.iter().copied().collect())
    }

    fn hidden_columns(&self, sheet: &str) -> AccessorResult<Vec<String>> {
        Ok(self
            .require(sheet)?
            .hidden_columns
            .iter()
            .map(|&idx| column_letter(idx))
            .collect())
    }

    fn header_letters(&self, sheet: &str) -> AccessorResult<Vec<(String, String)>> {
        Ok(self.require(sheet)?.header_letters())
    }

    fn hyperlink(&self, sheet: &str, cell: &str) -> Option<String> {
        self.sheet(sheet)?
            .hyperlinks
            .get(&cell.to_ascii_uppercase())
            .cloned()
    }

    fn column_cells(&self, sheet: &str, letter: &str) -> AccessorResult<Vec<String>> {
        Ok(self.require(sheet)?.column_cells(letter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workbook() -> WorkbookSnapshot {
        let first = SheetSnapshot::from_strs(
            "Products",
            &[&["Brand", " Link "][..], &["Acme", "x"][..], &["Beta"][..]],
        )
        .with_hidden_row(3)
        .with_hidden_column(27)
        .with_hyperlink("b2", "https://example.com");
        let second = SheetSnapshot::from_strs("Notes", &[&["a"][..]]);
        WorkbookSnapshot::new(vec![first, second]).with_active(1)
    }

    #[test]
    fn resolves_requested_then_active_sheet() {
        let wb = workbook();
        assert_eq!(wb.resolve_sheet(Some("Products")).expect("sheet"), "Products");
        assert_eq!(wb.resolve_sheet(Some("Missing")).expect("sheet"), "Notes");
        assert_eq!(wb.resolve_sheet(None).expect("sheet"), "Notes");
        assert!(WorkbookSnapshot::default().resolve_sheet(None).is_err());
    }

    #[test]
    fn header_lookup_ignores_spacing_and_bom() {
        let wb = WorkbookSnapshot::single(SheetSnapshot::from_strs(
            "Products",
            &[&["\u{feff}Brand", "Product  ID", " Product\tName "][..]],
        ));
        assert_eq!(wb.column_letter_for("Products", "Brand").as_deref(), Some("A"));
        assert_eq!(wb.column_letter_for("Products", "Product ID").as_deref(), Some("B"));
        assert_eq!(wb.column_letter_for("Products", "Product   ID").as_deref(), Some("B"));
        assert_eq!(wb.column_letter_for("Products", "Product Name").as_deref(), Some("C"));
    }

    #[test]
    fn exposes_sheet_metadata() {
        let wb = workbook();
        assert_eq!(wb.hidden_rows("Products").expect("rows"), vec![3]);
        assert_eq!(wb.hidden_columns("Products").expect("cols"), vec!["AB"]);
        assert_eq!(wb.column_letter_for("Products", "Link").as_deref(), Some("B"));
        assert_eq!(
            wb.header_letters("Products").expect("headers")[1],
            ("Link".to_string(), "B".to_string())
        );
        assert_eq!(
            wb.hyperlink("Products", "B2").as_deref(),
            Some("https://example.com")
        );
        assert_eq!(
            wb.column_cells("Products", "B").expect("cells"),
            vec!["x".to_string(), String::new()]
        );
        assert!(matches!(
            wb.hidden_rows("Nope"),
            Err(AccessorError::SheetNotFound { .. })
        ));
    }
}
