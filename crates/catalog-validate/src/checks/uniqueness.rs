//! Uniqueness: no non-empty value appears more than once.

use std::collections::HashMap;

use catalog_model::{CheckResult, Metric, MetricValue, Property};

use crate::catalog::DUPLICATES_ALLOWED;
use crate::context::{MappedColumn, RuleContext};
use crate::util::percent;

pub fn check(ctx: &RuleContext<'_>, properties: &[Property]) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| {
            let name = format!("{property} Uniqueness");
            match ctx.open(property) {
                Ok(_) if DUPLICATES_ALLOWED.contains(property) => CheckResult::pass(name)
                    .with_explanation("Duplicates allowed for categories")
                    .with_metric(Metric::DataUniqueness, MetricValue::percent(100)),
                Ok(column) => uniqueness(&name, &column),
                Err(reason) => reason
                    .into_result(name)
                    .with_metric(Metric::DataUniqueness, ""),
            }
        })
        .collect()
}

/// Every member of a duplicate group counts as a failure.
fn uniqueness(name: &str, column: &MappedColumn) -> CheckResult {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for value in column.values.iter().filter(|value| !value.is_empty()) {
        *occurrences.entry(value.as_str()).or_default() += 1;
    }
    let is_duplicate = |value: &str| occurrences.get(value).is_some_and(|&count| count > 1);

    let non_empty = column.non_empty();
    let fails = column
        .values
        .iter()
        .filter(|value| !value.is_empty() && is_duplicate(value.as_str()))
        .count();
    let pct = percent(non_empty - fails, non_empty);

    let first = column
        .values
        .iter()
        .position(|value| !value.is_empty() && is_duplicate(value.as_str()));
    match first {
        None => CheckResult::pass(name).with_metric(Metric::DataUniqueness, pct),
        Some(row) => CheckResult::fail(name, "Duplicates", fails)
            .with_metric(Metric::DataUniqueness, pct)
            .with_example(column.values[row].clone(), Some(column.cell(row))),
    }
}
