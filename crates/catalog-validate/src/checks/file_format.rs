//! Workbook structure checks: one worksheet, no hidden rows or columns.

use catalog_model::CheckResult;

use crate::context::RuleContext;
use crate::error::EvaluationCause;

pub fn check(ctx: &RuleContext<'_>) -> Result<Vec<CheckResult>, EvaluationCause> {
    let sheets = ctx.raw.sheet_names();
    let single = single_worksheet(&sheets);

    let hidden_rows = ctx.raw.hidden_rows(ctx.sheet)?;
    let rows = hidden(
        "Hidden Rows",
        ctx.sheet,
        "rows",
        hidden_rows.iter().map(ToString::to_string).collect(),
    );

    let hidden_columns = ctx.raw.hidden_columns(ctx.sheet)?;
    let columns = hidden("Hidden Columns", ctx.sheet, "cols", hidden_columns);

    Ok(vec![single, rows, columns])
}

fn single_worksheet(sheets: &[String]) -> CheckResult {
    let explanation = format!("{} sheets: [{}]", sheets.len(), sheets.join(", "));
    if sheets.len() == 1 {
        CheckResult::pass("Single Worksheet").with_explanation(explanation)
    } else {
        CheckResult::fail(
            "Single Worksheet",
            explanation,
            sheets.len().saturating_sub(1),
        )
    }
}

fn hidden(check: &str, sheet: &str, noun: &str, items: Vec<String>) -> CheckResult {
    let Some(first) = items.first().cloned() else {
        return CheckResult::pass(check);
    };
    let explanation = format!("[{sheet}] Hidden {noun}: [{}]", items.join(", "));
    CheckResult::fail(check, explanation, items.len()).with_example(first, None)
}
