//! Report outputs: the Data Format fail report and the JSON report.

pub mod error;
pub mod fail_report;
pub mod json;
pub mod writer;

pub use error::{ReportError, Result};
pub use fail_report::{
    ExportOutcome, FailReportExporter, HEADER, RuleOccurrences, SHEET_NAME_LIMIT, exported_counts,
    reconcile, render, sheet_name,
};
pub use json::write_json_report;
pub use writer::{FALLBACK_SUFFIX, fallback_path, is_locked, write_with, write_with_fallback};
