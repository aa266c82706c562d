//! Load → map → validate → export, shared by every subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog_ingest::{LoadedWorkbook, load};
use catalog_map::{MappingFile, MappingResolver};
use catalog_model::{Dataset, PropertyMapping, Report};
use catalog_report::{ExportOutcome, FailReportExporter, write_json_report};
use catalog_validate::{ValidationOptions, validate_with_options};
use tracing::{info, info_span};

/// What to validate.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    pub input: PathBuf,
    pub sheet: Option<String>,
    pub mapping: Option<PathBuf>,
    pub extra_ids: Vec<String>,
}

/// A completed validation and everything needed to export from it.
#[derive(Debug)]
pub struct Validated {
    pub loaded: LoadedWorkbook,
    pub sheet: String,
    pub dataset: Dataset,
    pub mapping: PropertyMapping,
    pub report: Report,
}

impl Validated {
    /// Export the fail report and reconcile the report's Data Format counts.
    pub fn export_fails(&mut self, path: &Path) -> Result<ExportOutcome> {
        FailReportExporter::new(&self.dataset, &self.mapping, &self.loaded.workbook)
            .with_sheet(Some(self.sheet.clone()))
            .export(&mut self.report, path)
            .with_context(|| format!("export fail report: {}", path.display()))
    }

    pub fn write_json(&self, path: &Path) -> Result<PathBuf> {
        write_json_report(&self.report, path)
            .with_context(|| format!("write report: {}", path.display()))
    }
}

pub fn run(request: &RunRequest) -> Result<Validated> {
    let span = info_span!("validate", input = %request.input.display());
    let _guard = span.enter();

    let loaded = load(&request.input)
        .with_context(|| format!("load: {}", request.input.display()))?;
    let (sheet, dataset) = loaded
        .dataset(request.sheet.as_deref())
        .context("select sheet")?;

    let mapping = resolve_mapping(request, dataset.columns())?;
    info!(sheet = %sheet, mapped = mapping.len(), rows = dataset.row_count(), "inputs ready");

    let options = ValidationOptions {
        sheet: Some(sheet.clone()),
        extra_identifiers: request.extra_ids.clone(),
    };
    let report = validate_with_options(&dataset, &mapping, &loaded.workbook, &options)
        .context("validate")?;

    Ok(Validated {
        loaded,
        sheet,
        dataset,
        mapping,
        report,
    })
}

/// Resolve the mapping file, or infer one from the headers when none is given.
/// Extra identifiers from the file and the command line are combined.
pub fn resolve_mapping(request: &RunRequest, headers: &[String]) -> Result<PropertyMapping> {
    let file = match &request.mapping {
        Some(path) => MappingFile::load(path).context("load mapping")?,
        None => MappingFile::default(),
    };
    let extras = file
        .extra_identifiers
        .iter()
        .chain(&request.extra_ids)
        .map(String::as_str);
    let resolver = MappingResolver::new(extras);
    resolver
        .resolve_for_headers(&file.raw_mapping(), headers)
        .context("resolve mapping")
}

/// `<dir>/<stem><suffix>` next to `input`.
pub fn sibling_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "catalog".to_string());
    input.with_file_name(format!("{stem}{suffix}"))
}
