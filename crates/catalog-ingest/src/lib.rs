//! Loading catalog extracts from spreadsheets and CSV files.

pub mod cell;
pub mod error;
pub mod loader;
pub mod xlsx_meta;

pub use cell::cell_text;
pub use error::{IngestError, Result};
pub use loader::{LoadedWorkbook, WORKBOOK_EXTENSIONS, load, load_csv, load_workbook};
pub use xlsx_meta::{SheetMeta, WorkbookMeta, read_xlsx_meta};
