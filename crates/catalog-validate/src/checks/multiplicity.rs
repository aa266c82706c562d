//! One identifier per cell: a comma packs several identifiers into one value.

use catalog_model::{CheckResult, Property};

use crate::context::{MappedColumn, RuleContext};

pub fn product_id(ctx: &RuleContext<'_>) -> CheckResult {
    single_value(ctx, &Property::ProductId, "Single ProductID Per Cell".to_string())
}

pub fn secondary(ctx: &RuleContext<'_>, properties: &[Property]) -> Vec<CheckResult> {
    properties
        .iter()
        .map(|property| {
            let name = format!("{property} Single Secondary Product Identifier Per Cell");
            single_value(ctx, property, name)
        })
        .collect()
}

fn single_value(ctx: &RuleContext<'_>, property: &Property, name: String) -> CheckResult {
    match ctx.open(property) {
        Ok(column) => commas(name, &column),
        Err(reason) => reason.into_result(name),
    }
}

fn commas(name: String, column: &MappedColumn) -> CheckResult {
    let packed: Vec<usize> = column
        .values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.contains(','))
        .map(|(row, _)| row)
        .collect();
    match packed.first() {
        None => CheckResult::pass(name),
        Some(&row) => CheckResult::fail(name, "Multiple identifiers present", packed.len())
            .with_example(column.values[row].clone(), Some(column.cell(row))),
    }
}
