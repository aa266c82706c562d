//! Country: exactly one distinct code across the column.
//!
//! Cells hold `+`-joined code lists; codes are trimmed and compared as a set.

use catalog_model::{CheckResult, Metric, Property};

use crate::context::{RuleContext, SkipReason};

const CHECK: &str = "Country Unique Count";

pub fn check(ctx: &RuleContext<'_>) -> CheckResult {
    let column = match ctx.open(&Property::Country) {
        Ok(column) => column,
        Err(reason) => return skip(reason),
    };

    let codes = distinct_codes(&column.values);
    if codes.is_empty() {
        return skip(SkipReason::NoData);
    }
    let with_metrics = |result: CheckResult| {
        result
            .with_metric(Metric::CountUnique, codes.len())
            .with_metric(Metric::ListUniqueValues, codes.join(", "))
    };

    let blanks = column.row_count() - column.non_empty();
    if let Some(first_blank) = column.values.iter().position(String::is_empty) {
        return with_metrics(CheckResult::fail(CHECK, "Missing", blanks))
            .with_example("", Some(column.cell(first_blank)));
    }

    if codes.len() == 1 {
        return with_metrics(CheckResult::pass(CHECK));
    }

    let first = codes[0];
    let example = codes[1];
    let fails = column
        .values
        .iter()
        .filter(|value| split_codes(value).any(|code| code != first))
        .count();
    let located = column
        .values
        .iter()
        .position(|value| contains_code(value, example));

    let explanation = format!("Found {} country codes", codes.len());
    with_metrics(CheckResult::fail(CHECK, explanation, fails))
        .with_example(example, located.map(|row| column.cell(row)))
}

fn skip(reason: SkipReason) -> CheckResult {
    reason
        .into_result(CHECK)
        .with_metric(Metric::CountUnique, 0usize)
        .with_metric(Metric::ListUniqueValues, "")
}

fn split_codes(value: &str) -> impl Iterator<Item = &str> {
    value.split('+').map(str::trim).filter(|code| !code.is_empty())
}

/// Distinct codes in first-seen order.
fn distinct_codes(values: &[String]) -> Vec<&str> {
    let mut codes: Vec<&str> = Vec::new();
    for value in values {
        for code in split_codes(value) {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
    }
    codes
}

/// Whether `code` occurs as a whole `+`-delimited entry of `value`.
fn contains_code(value: &str, code: &str) -> bool {
    split_codes(value).any(|candidate| candidate == code)
}
