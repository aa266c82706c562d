//! Completeness: no empty cells in a mapped column.

use catalog_model::{CheckResult, Metric, MetricValue, Property};
use tracing::trace;

use crate::context::{MappedColumn, RuleContext};
use crate::util::percent;

/// Mandatory fields: any empty cell is reported as `Missing`.
pub fn mandatory(ctx: &RuleContext<'_>, properties: &[Property]) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| evaluate(ctx, property, |_| "Missing".to_string(), ""))
        .collect()
}

/// Optional fields: the explanation counts empty cells.
pub fn optional(ctx: &RuleContext<'_>, properties: &[Property]) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| evaluate(ctx, property, empty_cells, "All cells populated"))
        .collect()
}

fn empty_cells(count: usize) -> String {
    if count == 1 {
        "1 empty cell".to_string()
    } else {
        format!("{count} empty cells")
    }
}

fn evaluate(
    ctx: &RuleContext<'_>,
    property: &Property,
    fail_explanation: fn(usize) -> String,
    pass_explanation: &str,
) -> CheckResult {
    let name = format!("{property} Completeness");
    match ctx.open(property) {
        Ok(column) => completeness(&name, &column, fail_explanation, pass_explanation),
        Err(reason) => reason
            .into_result(name)
            .with_metric(Metric::DataCompleteness, MetricValue::percent(0)),
    }
}

fn completeness(
    name: &str,
    column: &MappedColumn,
    fail_explanation: fn(usize) -> String,
    pass_explanation: &str,
) -> CheckResult {
    let total = column.row_count();
    let non_empty = column.non_empty();
    let fails = total - non_empty;
    trace!(check = name, total, non_empty, "completeness");

    let pct = percent(non_empty, total);
    let Some(first_blank) = column.values.iter().position(String::is_empty) else {
        return CheckResult::pass(name)
            .with_explanation(pass_explanation)
            .with_metric(Metric::DataCompleteness, pct);
    };
    CheckResult::fail(name, fail_explanation(fails), fails)
        .with_metric(Metric::DataCompleteness, pct)
        .with_example("", Some(column.cell(first_blank)))
}
