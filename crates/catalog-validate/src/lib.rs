//! Rule evaluation engine for product catalog extracts.
//!
//! [`validate`] runs every rule group over a [`Dataset`] and its property
//! mapping and assembles an ordered [`Report`]. Groups are independent; a
//! group that errors or panics aborts the run with
//! [`ValidationError::Evaluation`] and no partial report.

pub mod catalog;
pub mod checks;
pub mod context;
pub mod error;
pub mod options;
pub mod util;

use std::panic::{AssertUnwindSafe, catch_unwind};

use catalog_model::{
    CheckResult, Dataset, FileSummary, GroupKind, Property, PropertyMapping, RawAccessor, Report, ReportGroup,
};
use tracing::{debug, info};

pub use checks::data_format::{DataFormatRule, Occurrence, scan, scannable_headers};
pub use context::{MappedColumn, RuleContext, SkipReason};
pub use error::{EvaluationCause, Result, ValidationError};
pub use options::ValidationOptions;

/// Validate a dataset with default options.
pub fn validate(
    dataset: &Dataset,
    mapping: &PropertyMapping,
    raw: &dyn RawAccessor,
) -> Result<Report> {
    validate_with_options(dataset, mapping, raw, &ValidationOptions::default())
}

/// Validate a dataset, merging the caller's extra identifiers into the
/// mapping's and reading raw facts from the resolved sheet.
pub fn validate_with_options(
    dataset: &Dataset,
    mapping: &PropertyMapping,
    raw: &dyn RawAccessor,
    options: &ValidationOptions,
) -> Result<Report> {
    let mapping = merge_extra_identifiers(mapping, &options.extra_identifiers);
    let sheet = raw
        .resolve_sheet(options.sheet.as_deref())
        .map_err(ValidationError::Sheet)?;
    let ctx = RuleContext::new(dataset, &mapping, raw, &sheet);

    let mut groups = Vec::with_capacity(GroupKind::ALL.len());
    for kind in GroupKind::ALL {
        let checks = evaluate(kind, &ctx).map_err(|source| ValidationError::Evaluation {
            group: kind.label(),
            source,
        })?;
        debug!(group = kind.label(), checks = checks.len(), "evaluated rule group");
        groups.push(ReportGroup::new(kind, checks));
    }

    let mut report = Report::new(
        FileSummary {
            row_count: dataset.row_count(),
        },
        groups,
    );
    report.sanitize();

    let counts = report.counts();
    info!(
        sheet = %sheet,
        rows = dataset.row_count(),
        pass = counts.pass,
        fail = counts.fail,
        skip = counts.skip,
        "validation complete"
    );
    Ok(report)
}

fn evaluate(
    kind: GroupKind,
    ctx: &RuleContext<'_>,
) -> std::result::Result<Vec<CheckResult>, EvaluationCause> {
    match catch_unwind(AssertUnwindSafe(|| checks::run_group(kind, ctx))) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(EvaluationCause::Panic(message))
        }
    }
}

fn merge_extra_identifiers(mapping: &PropertyMapping, extras: &[String]) -> PropertyMapping {
    if extras.is_empty() {
        return mapping.clone();
    }
    let mut merged: Vec<Property> = mapping.extra_identifiers().to_vec();
    merged.extend(
        extras
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(Property::from_label_or_custom),
    );
    mapping.clone().with_extra_identifiers(merged)
}
