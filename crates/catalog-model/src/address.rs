//! Spreadsheet cell addressing.
//!
//! Dataset rows are zero-based and exclude the header; spreadsheet rows are
//! one-based and include it, so dataset row `i` lives on spreadsheet row
//! `i + 2`. Every fail reference in a report is built through this module.

use std::fmt;

use crate::mapping::PropertyMapping;
use crate::property::Property;

/// Offset between a zero-based dataset row index and its spreadsheet row.
pub const HEADER_ROW_OFFSET: usize = 2;

/// Convert a zero-based column index to a spreadsheet letter (0 = A, 26 = AA).
pub fn column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut n = index;
    loop {
        letters.push(b'A' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert a spreadsheet column letter back to a zero-based index.
pub fn column_index(letter: &str) -> Option<usize> {
    if letter.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for ch in letter.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        index = index.checked_mul(26)?.checked_add(digit)?;
    }
    Some(index - 1)
}

/// Spreadsheet row number for a zero-based dataset row index.
pub fn spreadsheet_row(row_index: usize) -> usize {
    row_index + HEADER_ROW_OFFSET
}

/// A cell location: optional sheet, column letter, one-based row number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpreadsheetAddress {
    pub sheet: Option<String>,
    pub column: String,
    pub row: usize,
}

impl SpreadsheetAddress {
    pub fn new(column: impl Into<String>, row: usize) -> Self {
        Self {
            sheet: None,
            column: column.into(),
            row,
        }
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    /// Cell reference without the sheet prefix (e.g. `B7`).
    pub fn cell(&self) -> String {
        format!("{}{}", self.column, self.row)
    }

    /// Parse `B7` or `Sheet!B7`.
    pub fn parse(reference: &str) -> Option<Self> {
        let (sheet, cell) = match reference.rsplit_once('!') {
            Some((sheet, cell)) => (Some(sheet.trim_matches('\'').to_string()), cell),
            None => (None, reference),
        };
        let split = cell.find(|ch: char| ch.is_ascii_digit())?;
        let (column, row) = cell.split_at(split);
        column_index(column)?;
        let row: usize = row.parse().ok()?;
        if row == 0 {
            return None;
        }
        Some(Self {
            sheet,
            column: column.to_ascii_uppercase(),
            row,
        })
    }
}

impl fmt::Display for SpreadsheetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sheet {
            Some(sheet) => write!(f, "{sheet}!{}{}", self.column, self.row),
            None => write!(f, "{}{}", self.column, self.row),
        }
    }
}

/// Position of a header within a dataset's column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAddress {
    index: usize,
    letter: String,
}

impl ColumnAddress {
    /// Locate `header` in an ordered header row.
    pub fn locate<S: AsRef<str>>(headers: &[S], header: &str) -> Option<Self> {
        let index = headers.iter().position(|h| h.as_ref() == header)?;
        Some(Self::from_index(index))
    }

    /// Locate the column backing `property` through the mapping.
    pub fn for_property<S: AsRef<str>>(
        headers: &[S],
        mapping: &PropertyMapping,
        property: &Property,
    ) -> Option<Self> {
        let header = mapping.header(property)?;
        Self::locate(headers, header)
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            index,
            letter: column_letter(index),
        }
    }

    /// Column at a spreadsheet letter such as `AB`.
    pub fn from_letter(letter: &str) -> Option<Self> {
        column_index(letter).map(Self::from_index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn letter(&self) -> &str {
        &self.letter
    }

    /// Address of the cell holding dataset row `row_index` in this column.
    pub fn cell(&self, row_index: usize) -> SpreadsheetAddress {
        SpreadsheetAddress::new(self.letter.clone(), spreadsheet_row(row_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_cover_multi_letter_columns() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(51), "AZ");
        assert_eq!(column_letter(52), "BA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn parses_sheet_qualified_references() {
        let address = SpreadsheetAddress::parse("Products!C12").expect("parse");
        assert_eq!(address.sheet.as_deref(), Some("Products"));
        assert_eq!(address.column, "C");
        assert_eq!(address.row, 12);
        assert_eq!(address.to_string(), "Products!C12");

        assert!(SpreadsheetAddress::parse("C0").is_none());
        assert!(SpreadsheetAddress::parse("12").is_none());
        assert!(SpreadsheetAddress::parse("C").is_none());
    }

    #[test]
    fn dataset_rows_are_offset_by_header() {
        let headers = ["Brand", "Product ID"];
        let column = ColumnAddress::locate(&headers, "Product ID").expect("locate");
        assert_eq!(column.letter(), "B");
        assert_eq!(column.cell(0).to_string(), "B2");
        assert_eq!(column.cell(9).to_string(), "B11");
        assert!(ColumnAddress::locate(&headers, "SKU").is_none());
    }
}
