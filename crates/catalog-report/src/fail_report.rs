//! Fail report: every Data Format occurrence, one sheet per rule.
//!
//! The report's summary only carries the first example of each rule. The
//! export re-scans the raw sheet for every match, writes them out, reads the
//! written file back and overwrites each rule's fail count with the number
//! of exported rows, so summary and detail never disagree.

use std::path::{Path, PathBuf};

use calamine::{Reader, open_workbook_auto};
use catalog_model::{Dataset, GroupKind, PropertyMapping, RawAccessor, Report};
use catalog_validate::{DataFormatRule, Occurrence, scan, scannable_headers};
use rust_xlsxwriter::{Format, Workbook};
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::writer::write_with_fallback;

/// Longest sheet name a workbook accepts.
pub const SHEET_NAME_LIMIT: usize = 31;

/// Column headers of every fail-report sheet.
pub const HEADER: [&str; 3] = ["Check Performed", "Explanation", "Cell Fail Reference"];

/// Sheet name for a rule, cut to [`SHEET_NAME_LIMIT`] characters.
pub fn sheet_name(rule_name: &str) -> String {
    rule_name.chars().take(SHEET_NAME_LIMIT).collect()
}

/// Occurrences of one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOccurrences {
    pub rule: DataFormatRule,
    pub occurrences: Vec<Occurrence>,
}

/// What an export produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOutcome {
    /// File actually written; `None` when nothing was found.
    pub path: Option<PathBuf>,
    /// Exported row count per rule, read back from the written file.
    pub counts: Vec<(DataFormatRule, usize)>,
}

impl ExportOutcome {
    pub fn count(&self, rule: DataFormatRule) -> usize {
        self.counts
            .iter()
            .find(|(candidate, _)| *candidate == rule)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

/// Scans the raw sheet and writes fail reports.
pub struct FailReportExporter<'a> {
    dataset: &'a Dataset,
    mapping: &'a PropertyMapping,
    raw: &'a dyn RawAccessor,
    sheet: Option<String>,
}

impl<'a> FailReportExporter<'a> {
    pub fn new(
        dataset: &'a Dataset,
        mapping: &'a PropertyMapping,
        raw: &'a dyn RawAccessor,
    ) -> Self {
        Self {
            dataset,
            mapping,
            raw,
            sheet: None,
        }
    }

    /// Scan a named sheet instead of the active one.
    #[must_use]
    pub fn with_sheet(mut self, sheet: Option<String>) -> Self {
        self.sheet = sheet;
        self
    }

    /// Every occurrence of every rule, in rule order. Rules without
    /// occurrences are omitted.
    pub fn occurrences(&self) -> Result<Vec<RuleOccurrences>> {
        let sheet = self.raw.resolve_sheet(self.sheet.as_deref())?;
        let headers = scannable_headers(self.dataset, self.mapping);
        let mut found = Vec::new();
        for rule in DataFormatRule::ALL {
            let occurrences = scan(self.raw, &sheet, &headers, rule)?;
            debug!(rule = rule.name(), occurrences = occurrences.len(), "fail report scan");
            if !occurrences.is_empty() {
                found.push(RuleOccurrences { rule, occurrences });
            }
        }
        Ok(found)
    }

    /// Write the fail report to `path` and reconcile `report` with it.
    ///
    /// Nothing is written when no rule has occurrences.
    pub fn export(&self, report: &mut Report, path: &Path) -> Result<ExportOutcome> {
        let found = self.occurrences()?;
        if found.is_empty() {
            info!("no data format occurrences, fail report not written");
            return Ok(ExportOutcome::default());
        }

        let bytes = render(&found)?;
        let written = write_with_fallback(path, &bytes)?;
        let counts = exported_counts(&written)?;
        reconcile(report, &counts);

        info!(
            path = %written.display(),
            rules = counts.len(),
            rows = counts.iter().map(|(_, n)| n).sum::<usize>(),
            "fail report written"
        );
        Ok(ExportOutcome {
            path: Some(written),
            counts,
        })
    }
}

/// Build the fail-report workbook in memory.
pub fn render(found: &[RuleOccurrences]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    for entry in found {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name(entry.rule.name()))?;
        for (col, title) in (0u16..).zip(HEADER) {
            worksheet.write_string_with_format(0, col, title, &bold)?;
        }
        for (row, occurrence) in (1u32..).zip(&entry.occurrences) {
            worksheet.write_string(row, 0, entry.rule.name())?;
            worksheet.write_string(row, 1, entry.rule.describe(&occurrence.example))?;
            worksheet.write_string(row, 2, occurrence.address.to_string())?;
        }
        worksheet.autofit();
    }
    Ok(workbook.save_to_buffer()?)
}

/// Rows per rule sheet in a written fail report, header excluded.
pub fn exported_counts(path: &Path) -> Result<Vec<(DataFormatRule, usize)>> {
    let reopen = |source| ReportError::Reopen {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = open_workbook_auto(path).map_err(reopen)?;

    let mut counts = Vec::new();
    for name in workbook.sheet_names() {
        let Some(rule) = DataFormatRule::ALL
            .into_iter()
            .find(|rule| sheet_name(rule.name()) == name)
        else {
            continue;
        };
        let range = workbook.worksheet_range(&name).map_err(reopen)?;
        counts.push((rule, range.height().saturating_sub(1)));
    }
    Ok(counts)
}

/// Overwrite each exported rule's fail count in the report.
pub fn reconcile(report: &mut Report, counts: &[(DataFormatRule, usize)]) {
    for (rule, count) in counts {
        if let Some(check) = report.check_mut(GroupKind::DataFormat, rule.name()) {
            if check.fail_count != *count {
                debug!(rule = rule.name(), from = check.fail_count, to = count, "reconciled fail count");
            }
            check.set_fail_count(*count);
        }
    }
}
