//! Rule groups, one module per algorithmic category.

pub mod category;
pub mod completeness;
pub mod country;
pub mod data_format;
pub mod file_format;
pub mod length;
pub mod multiplicity;
pub mod uniqueness;
pub mod url;

use catalog_model::{CheckResult, GroupKind, Property};

use crate::catalog;
use crate::context::RuleContext;
use crate::error::EvaluationCause;

/// Evaluate one group.
pub fn run_group(
    kind: GroupKind,
    ctx: &RuleContext<'_>,
) -> Result<Vec<CheckResult>, EvaluationCause> {
    let checks = match kind {
        GroupKind::FileFormat => file_format::check(ctx)?,
        GroupKind::DataFormat => data_format::check(ctx)?,
        GroupKind::MandatoryCompleteness => {
            completeness::mandatory(ctx, catalog::MANDATORY_COMPLETENESS)
        }
        GroupKind::MandatoryUniqueness => uniqueness::check(ctx, catalog::MANDATORY_UNIQUENESS),
        GroupKind::CountryUniqueness => vec![country::check(ctx)],
        GroupKind::MandatoryUrl => url::check(ctx, catalog::MANDATORY_URLS),
        GroupKind::OptionalCompleteness => {
            completeness::optional(ctx, &with_extras(ctx, catalog::OPTIONAL_COMPLETENESS))
        }
        GroupKind::OptionalUniqueness => {
            uniqueness::check(ctx, &with_extras(ctx, catalog::OPTIONAL_UNIQUENESS))
        }
        GroupKind::OptionalUrl => url::check(ctx, catalog::OPTIONAL_URLS),
        GroupKind::EnglishNameLength => {
            length::check(ctx, &[Property::ProductNameEnglish], catalog::NAME_MAX_CHARS)
        }
        GroupKind::LocalNameLength => {
            length::check(ctx, &[Property::ProductNameLocal], catalog::NAME_MAX_CHARS)
        }
        GroupKind::DescriptionLength => {
            length::check(ctx, catalog::DESCRIPTIONS, catalog::DESCRIPTION_MAX_CHARS)
        }
        GroupKind::SingleProductId => vec![multiplicity::product_id(ctx)],
        GroupKind::SingleSecondaryId => {
            multiplicity::secondary(ctx, &with_extras(ctx, Property::SECONDARY_IDENTIFIERS))
        }
        GroupKind::CategoryChecks => category::check(ctx),
    };
    Ok(checks)
}

/// Base properties followed by the run's extra identifiers not already listed.
fn with_extras(ctx: &RuleContext<'_>, base: &[Property]) -> Vec<Property> {
    let mut properties = base.to_vec();
    for extra in ctx.mapping.extra_identifiers() {
        if !properties.contains(extra) {
            properties.push(extra.clone());
        }
    }
    properties
}
