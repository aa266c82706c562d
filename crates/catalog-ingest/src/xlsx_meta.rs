//! Sheet metadata calamine does not expose, read straight from the xlsx
//! package: the active tab, hidden rows and columns, and hyperlinks.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use catalog_model::{SpreadsheetAddress, column_index, column_letter};
use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, trace};
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::Result;

/// Hidden flags and hyperlinks of one sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetMeta {
    /// One-based row numbers.
    pub hidden_rows: BTreeSet<usize>,
    /// Zero-based column indexes.
    pub hidden_columns: BTreeSet<usize>,
    /// Cell reference → link target.
    pub hyperlinks: BTreeMap<String, String>,
}

/// Package-level metadata for every sheet, keyed by sheet name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookMeta {
    pub active_tab: usize,
    pub sheets: BTreeMap<String, SheetMeta>,
}

pub fn read_xlsx_meta(path: &Path) -> Result<WorkbookMeta> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let workbook_xml = read_entry(&mut archive, "xl/workbook.xml")?.unwrap_or_default();
    let rels_xml = read_entry(&mut archive, "xl/_rels/workbook.xml.rels")?.unwrap_or_default();

    let (active_tab, sheets) = parse_workbook(&workbook_xml)?;
    let targets = parse_relationships(&rels_xml)?;

    let mut meta = WorkbookMeta {
        active_tab,
        sheets: BTreeMap::new(),
    };
    for (name, rid) in sheets {
        let Some(target) = targets.get(&rid) else {
            continue;
        };
        let sheet_path = part_path("xl", target);
        let Some(sheet_xml) = read_entry(&mut archive, &sheet_path)? else {
            continue;
        };
        let sheet_rels = read_entry(&mut archive, &rels_path(&sheet_path))?
            .map(|xml| parse_relationships(&xml))
            .transpose()?
            .unwrap_or_default();
        let sheet_meta = parse_sheet(&sheet_xml, &sheet_rels)?;
        debug!(
            sheet = %name,
            hidden_rows = sheet_meta.hidden_rows.len(),
            hidden_columns = sheet_meta.hidden_columns.len(),
            hyperlinks = sheet_meta.hyperlinks.len(),
            "read sheet metadata"
        );
        meta.sheets.insert(name, sheet_meta);
    }
    Ok(meta)
}

fn read_entry<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut entry = match archive.by_name(name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Resolve a relationship target against the part directory.
fn part_path(base: &str, target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("{base}/{target}"),
    }
}

/// `xl/worksheets/sheet1.xml` → `xl/worksheets/_rels/sheet1.xml.rels`.
fn rels_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

fn attr(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            match unescape(&raw) {
                Ok(Cow::Owned(text)) => text,
                _ => raw,
            }
        })
}

fn is_true(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1" | "true"))
}

/// Active tab index and `(sheet name, relationship id)` in workbook order.
fn parse_workbook(xml: &str) -> Result<(usize, Vec<(String, String)>)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut active_tab = 0usize;
    let mut sheets = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"workbookView" => {
                    active_tab = attr(e, b"activeTab")
                        .and_then(|tab| tab.parse().ok())
                        .unwrap_or(0);
                }
                b"sheet" => {
                    if let (Some(name), Some(rid)) = (attr(e, b"name"), attr(e, b"r:id")) {
                        sheets.push((name, rid));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok((active_tab, sheets))
}

/// Relationship id → target.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut targets = HashMap::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(targets)
}

fn parse_sheet(xml: &str, rels: &HashMap<String, String>) -> Result<SheetMeta> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut meta = SheetMeta::default();
    let mut used = UsedRange::default();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"row" => {
                    let row: Option<usize> = attr(e, b"r").and_then(|r| r.parse().ok());
                    if let Some(row) = row {
                        used.include(row, 0);
                        if is_true(attr(e, b"hidden")) {
                            meta.hidden_rows.insert(row);
                        }
                    }
                }
                b"c" => {
                    if let Some(cell) = attr(e, b"r").and_then(|r| SpreadsheetAddress::parse(&r)) {
                        if let Some(col) = column_index(&cell.column) {
                            used.include(cell.row, col);
                        }
                    }
                }
                b"col" if is_true(attr(e, b"hidden")) => {
                    let min: usize = attr(e, b"min").and_then(|v| v.parse().ok()).unwrap_or(0);
                    let max: usize = attr(e, b"max").and_then(|v| v.parse().ok()).unwrap_or(min);
                    if min > 0 {
                        meta.hidden_columns.extend((min..=max).map(|col| col - 1));
                    }
                }
                b"hyperlink" => {
                    let target = attr(e, b"r:id")
                        .and_then(|rid| rels.get(&rid).cloned())
                        .or_else(|| attr(e, b"location"));
                    if let (Some(reference), Some(target)) = (attr(e, b"ref"), target) {
                        for cell in expand_reference(&reference, used) {
                            trace!(cell = %cell, target = %target, "hyperlink");
                            meta.hyperlinks.insert(cell, target.clone());
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(meta)
}

/// Last row (one-based) and column (zero-based) holding a cell.
///
/// Sheet XML lists `sheetData` before `hyperlinks`, so the range is complete
/// by the time links are read.
#[derive(Debug, Clone, Copy, Default)]
struct UsedRange {
    last_row: usize,
    last_col: usize,
}

impl UsedRange {
    fn include(&mut self, row: usize, col: usize) {
        self.last_row = self.last_row.max(row);
        self.last_col = self.last_col.max(col);
    }
}

/// Cells covered by `B2` or `B2:C4`, clipped to the used range. The first
/// cell of the reference is always kept.
fn expand_reference(reference: &str, used: UsedRange) -> Vec<String> {
    let (start, end) = reference.split_once(':').unwrap_or((reference, reference));
    let (Some(start), Some(end)) = (
        SpreadsheetAddress::parse(start),
        SpreadsheetAddress::parse(end),
    ) else {
        return Vec::new();
    };
    let (Some(first_col), Some(last_col)) = (column_index(&start.column), column_index(&end.column))
    else {
        return Vec::new();
    };
    let last_row = end.row.min(used.last_row.max(start.row));
    let last_col = last_col.min(used.last_col.max(first_col));
    let mut cells = Vec::new();
    for row in start.row..=last_row {
        for col in first_col..=last_col {
            cells.push(format!("{}{row}", column_letter(col)));
        }
    }
    cells
}
