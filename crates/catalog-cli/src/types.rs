use std::path::PathBuf;

use catalog_model::Report;
use catalog_report::ExportOutcome;

#[derive(Debug)]
pub struct ValidateResult {
    pub input: PathBuf,
    pub sheet: String,
    pub report: Report,
    pub json_path: Option<PathBuf>,
    pub fail_report: Option<ExportOutcome>,
}

impl ValidateResult {
    pub fn has_failures(&self) -> bool {
        self.report.has_failures()
    }
}
