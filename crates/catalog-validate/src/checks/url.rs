//! URL fields: cell text is a web URL, or the cell carries a hyperlink to one.

use std::sync::LazyLock;

use catalog_model::{CheckResult, ColumnAddress, Metric, MetricValue, Property};
use regex::Regex;

use crate::context::{MappedColumn, RuleContext, SkipReason};
use crate::util::percent;

pub static VALID_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)[A-Za-z0-9.-]+\.[A-Za-z]{2,}.*$").expect("valid URL regex")
});

pub fn is_valid_url(text: &str) -> bool {
    VALID_URL.is_match(text)
}

pub fn check(ctx: &RuleContext<'_>, properties: &[Property]) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| {
            let name = format!("{property} Hyperlink Check");
            match ctx.open(property) {
                Ok(column) => hyperlinks(ctx, &name, property, &column),
                Err(reason) => reason
                    .into_result(name)
                    .with_metric(Metric::PassRate, MetricValue::percent(0)),
            }
        })
        .collect()
}

fn hyperlinks(
    ctx: &RuleContext<'_>,
    name: &str,
    property: &Property,
    column: &MappedColumn,
) -> CheckResult {
    // Hyperlinks live on the raw sheet, whose layout may differ from the
    // deduplicated dataset.
    let letter_column = ctx
        .raw
        .column_letter_for(ctx.sheet, &column.header)
        .and_then(|letter| ColumnAddress::from_letter(&letter))
        .unwrap_or_else(|| column.address.clone());

    let mut total = 0usize;
    let mut fails = 0usize;
    let mut first_fail: Option<(usize, Option<String>)> = None;
    for (row, text) in column.values.iter().enumerate() {
        if text.is_empty() || text == &column.header || text == property.label() {
            continue;
        }
        total += 1;
        if is_valid_url(text) {
            continue;
        }
        let cell = letter_column.cell(row);
        let link = ctx.raw.hyperlink(ctx.sheet, &cell.cell());
        if link.as_deref().is_some_and(|target| is_valid_url(target.trim())) {
            continue;
        }
        fails += 1;
        if first_fail.is_none() {
            first_fail = Some((row, link));
        }
    }

    if total == 0 {
        return SkipReason::NoData
            .into_result(name)
            .with_metric(Metric::PassRate, MetricValue::percent(0));
    }

    let pct = percent(total - fails, total);
    let Some((row, link)) = first_fail else {
        return CheckResult::pass(name)
            .with_explanation("All cells have a valid URL or hyperlink target.")
            .with_metric(Metric::PassRate, pct);
    };

    let cell = letter_column.cell(row);
    let explanation = match link.as_deref().map(str::trim) {
        Some(target) if !target.is_empty() => {
            format!("Invalid hyperlink target ({target}) at {cell}")
        }
        _ => format!("No hyperlink attached at {cell}"),
    };
    CheckResult::fail(name, explanation, fails)
        .with_metric(Metric::PassRate, pct)
        .with_example(column.values[row].clone(), Some(cell))
}
