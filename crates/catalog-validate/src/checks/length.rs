//! Character limits on names and descriptions.

use catalog_model::{CheckResult, Metric, MetricValue, Property};

use crate::catalog::SNIPPET_CHARS;
use crate::context::{MappedColumn, RuleContext};
use crate::util::{char_len, percent, snippet};

pub fn check(ctx: &RuleContext<'_>, properties: &[Property], max_chars: usize) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| {
            let name = format!("{property} Character Limit Check");
            match ctx.open(property) {
                Ok(column) => limit(&name, &column, max_chars),
                Err(reason) => reason
                    .into_result(name)
                    .with_metric(Metric::MaxLength, max_chars)
                    .with_metric(Metric::PassRate, MetricValue::percent(0)),
            }
        })
        .collect()
}

fn limit(name: &str, column: &MappedColumn, max_chars: usize) -> CheckResult {
    let over: Vec<(usize, usize)> = column
        .values
        .iter()
        .enumerate()
        .map(|(row, value)| (row, char_len(value)))
        .filter(|&(_, len)| len > max_chars)
        .collect();

    let total = column.row_count();
    let pct = percent(total - over.len(), total);
    let Some(&(row, actual)) = over.first() else {
        return CheckResult::pass(name)
            .with_metric(Metric::MaxLength, max_chars)
            .with_metric(Metric::PassRate, pct);
    };

    CheckResult::fail(name, format!("Over {max_chars} chars"), over.len())
        .with_metric(Metric::MaxLength, max_chars)
        .with_metric(Metric::PassRate, pct)
        .with_metric(Metric::ActualLength, actual)
        .with_example(
            snippet(&column.values[row], SNIPPET_CHARS),
            Some(column.cell(row)),
        )
}
