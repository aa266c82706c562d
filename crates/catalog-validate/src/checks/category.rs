//! Category fields: short and free of markup characters.

use std::sync::LazyLock;

use catalog_model::{CheckResult, Metric, Property};
use regex::Regex;

use crate::catalog::{CATEGORIES, CATEGORY_MAX_CHARS, SNIPPET_CHARS};
use crate::context::{MappedColumn, RuleContext};
use crate::util::char_len;

static MARKUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>|[<>]").expect("valid markup regex"));

pub fn check(ctx: &RuleContext<'_>) -> Vec<CheckResult> {
    CATEGORIES
        .iter()
        .map(|property: &Property| {
            let name = format!("{property} Data Checks");
            match ctx.open(property) {
                Ok(column) => category(&name, &column),
                Err(reason) => reason
                    .into_result(name)
                    .with_metric(Metric::MaxLength, CATEGORY_MAX_CHARS),
            }
        })
        .collect()
}

fn is_offending(value: &str) -> bool {
    char_len(value) > CATEGORY_MAX_CHARS || value.contains(['<', '>'])
}

fn category(name: &str, column: &MappedColumn) -> CheckResult {
    let offending: Vec<usize> = column
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| is_offending(value))
        .map(|(row, _)| row)
        .collect();

    let Some(&row) = offending.first() else {
        return CheckResult::pass(name).with_metric(Metric::MaxLength, CATEGORY_MAX_CHARS);
    };

    let value = &column.values[row];
    let explanation = if char_len(value) > CATEGORY_MAX_CHARS {
        "Too long (>75)"
    } else {
        "Contains prohibited char"
    };
    let example = MARKUP
        .find(value)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| value.chars().take(SNIPPET_CHARS).collect());

    CheckResult::fail(name, explanation, offending.len())
        .with_metric(Metric::MaxLength, CATEGORY_MAX_CHARS)
        .with_example(example, Some(column.cell(row)))
}
