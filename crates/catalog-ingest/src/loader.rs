//! Workbook and CSV loading.
//!
//! Each loaded sheet keeps two grids. The raw grid backs the
//! [`RawAccessor`](catalog_model::RawAccessor) checks and shows formulas as
//! `=` text; the value grid feeds the [`Dataset`] with computed values.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use calamine::{CellType, Range, Reader, open_workbook_auto};
use catalog_model::{Dataset, SheetSnapshot, WorkbookSnapshot};
use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::cell::cell_text;
use crate::error::{IngestError, Result};
use crate::xlsx_meta::{SheetMeta, read_xlsx_meta};

/// Extensions opened through calamine.
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// A loaded source file.
#[derive(Debug, Clone)]
pub struct LoadedWorkbook {
    pub path: PathBuf,
    pub workbook: WorkbookSnapshot,
    values: BTreeMap<String, Vec<Vec<String>>>,
}

impl LoadedWorkbook {
    /// Build the dataset for `sheet`, or for the active sheet.
    ///
    /// Returns the resolved sheet name with the dataset.
    pub fn dataset(&self, sheet: Option<&str>) -> Result<(String, Dataset)> {
        let name = match sheet {
            Some(requested) => {
                if self.workbook.sheet(requested).is_none() {
                    return Err(IngestError::SheetNotFound {
                        sheet: requested.to_string(),
                    });
                }
                requested.to_string()
            }
            None => self
                .workbook
                .active()
                .map(|active| active.name().to_string())
                .ok_or_else(|| IngestError::NoSheets {
                    path: self.path.clone(),
                })?,
        };
        let rows = self.values.get(&name).map(Vec::as_slice).unwrap_or_default();
        let dataset = match rows.split_first() {
            Some((header, data)) => Dataset::from_rows(header.as_slice(), data)?,
            None => Dataset::from_rows::<String>(&[], &[])?,
        };
        debug!(
            sheet = %name,
            rows = dataset.row_count(),
            columns = dataset.columns().len(),
            "dataset built"
        );
        Ok((name, dataset))
    }
}

/// Load any supported file, choosing the loader by extension.
pub fn load(path: &Path) -> Result<LoadedWorkbook> {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    if extension == "csv" {
        load_csv(path)
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        load_workbook(path)
    } else {
        Err(IngestError::UnsupportedFormat { extension })
    }
}

/// Load every sheet of a spreadsheet workbook.
pub fn load_workbook(path: &Path) -> Result<LoadedWorkbook> {
    let mut workbook = open_workbook_auto(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    }

    let is_xlsx = path.extension().is_some_and(|ext| {
        matches!(
            ext.to_string_lossy().to_ascii_lowercase().as_str(),
            "xlsx" | "xlsm"
        )
    });
    let meta = if is_xlsx {
        Some(read_xlsx_meta(path)?)
    } else {
        None
    };

    let mut sheets = Vec::with_capacity(names.len());
    let mut values = BTreeMap::new();
    for name in &names {
        let read_error = |source| IngestError::Read {
            sheet: name.clone(),
            source,
        };
        let range = workbook.worksheet_range(name).map_err(read_error)?;
        let value_rows = grid(&range, cell_text);
        let mut raw_rows = value_rows.clone();
        // A missing formula table only means the sheet has no formulas.
        if let Ok(formulas) = workbook.worksheet_formula(name) {
            overlay_formulas(&mut raw_rows, &formulas);
        }

        let mut sheet = SheetSnapshot::new(name.clone(), raw_rows);
        if let Some(sheet_meta) = meta.as_ref().and_then(|meta| meta.sheets.get(name)) {
            apply_meta(&mut sheet, sheet_meta);
        }
        sheets.push(sheet);
        values.insert(name.clone(), value_rows);
    }

    let active = meta.as_ref().map_or(0, |meta| meta.active_tab);
    info!(path = %path.display(), sheets = names.len(), active, "workbook loaded");
    Ok(LoadedWorkbook {
        path: path.to_path_buf(),
        workbook: WorkbookSnapshot::new(sheets).with_active(active),
        values,
    })
}

/// Load a CSV file as a one-sheet workbook named after the file stem.
pub fn load_csv(path: &Path) -> Result<LoadedWorkbook> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
        *first = first.trim_start_matches('\u{feff}').to_string();
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Sheet1".to_string());
    info!(path = %path.display(), rows = rows.len(), "CSV loaded");

    let mut values = BTreeMap::new();
    values.insert(name.clone(), rows.clone());
    Ok(LoadedWorkbook {
        path: path.to_path_buf(),
        workbook: WorkbookSnapshot::single(SheetSnapshot::new(name, rows)),
        values,
    })
}

/// Dense grid anchored at A1; calamine ranges start at the first used cell.
fn grid<T, F>(range: &Range<T>, render: F) -> Vec<Vec<String>>
where
    T: CellType,
    F: Fn(&T) -> String,
{
    let (row_offset, col_offset) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let mut rows = vec![Vec::new(); row_offset];
    for row in range.rows() {
        let mut cells = vec![String::new(); col_offset];
        cells.extend(row.iter().map(&render));
        while cells.last().is_some_and(String::is_empty) {
            cells.pop();
        }
        rows.push(cells);
    }
    rows
}

fn overlay_formulas(rows: &mut Vec<Vec<String>>, formulas: &Range<String>) {
    for (row_idx, row) in grid(formulas, String::clone).into_iter().enumerate() {
        for (col_idx, formula) in row.into_iter().enumerate() {
            if formula.is_empty() {
                continue;
            }
            if rows.len() <= row_idx {
                rows.resize(row_idx + 1, Vec::new());
            }
            let target = &mut rows[row_idx];
            if target.len() <= col_idx {
                target.resize(col_idx + 1, String::new());
            }
            target[col_idx] = format!("={formula}");
        }
    }
}

fn apply_meta(sheet: &mut SheetSnapshot, meta: &SheetMeta) {
    for &row in &meta.hidden_rows {
        sheet.hide_row(row);
    }
    for &column in &meta.hidden_columns {
        sheet.hide_column(column);
    }
    for (cell, target) in &meta.hyperlinks {
        sheet.add_hyperlink(cell.clone(), target.clone());
    }
}
