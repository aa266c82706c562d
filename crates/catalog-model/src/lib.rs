pub mod address;
pub mod check;
pub mod dataset;
pub mod error;
pub mod mapping;
pub mod property;
pub mod report;
pub mod workbook;

pub use address::{
    ColumnAddress, HEADER_ROW_OFFSET, SpreadsheetAddress, column_index, column_letter,
    spreadsheet_row,
};
pub use check::{BLANK_EXAMPLE, CheckResult, Metric, MetricValue, Outcome};
pub use dataset::{Dataset, cell_text, normalize_header};
pub use error::{AccessorError, ModelError, Result};
pub use mapping::PropertyMapping;
pub use property::Property;
pub use report::{FileSummary, GroupKind, OutcomeCounts, Report, ReportGroup, sanitize_value};
pub use workbook::{RawAccessor, SheetSnapshot, WorkbookSnapshot};
