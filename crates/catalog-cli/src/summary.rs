use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use catalog_model::{CheckResult, GroupKind, Outcome};

use crate::types::ValidateResult;

pub fn print_summary(result: &ValidateResult) {
    println!("Input: {}", result.input.display());
    println!("Sheet: {}", result.sheet);
    println!("Rows: {}", result.report.row_count());
    if let Some(path) = &result.json_path {
        println!("Report: {}", path.display());
    }
    if let Some(outcome) = &result.fail_report {
        match &outcome.path {
            Some(path) => println!("Fail report: {} ({} rows)", path.display(), outcome.total()),
            None => println!("Fail report: nothing to export"),
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Pass"),
        header_cell("Fail"),
        header_cell("Skip"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for group in result.report.groups() {
        let counts = group.counts();
        table.add_row(vec![
            Cell::new(group.kind.label()),
            count_cell(counts.pass, Color::Green),
            count_cell(counts.fail, Color::Red),
            count_cell(counts.skip, Color::Yellow),
        ]);
    }
    let totals = result.report.counts();
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        count_cell(totals.pass, Color::Green).add_attribute(Attribute::Bold),
        count_cell(totals.fail, Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals.skip, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_failure_table(result);
}

fn print_failure_table(result: &ValidateResult) {
    let failures: Vec<(GroupKind, &CheckResult)> = result
        .report
        .checks()
        .filter(|(_, check)| check.is_fail())
        .collect();
    if failures.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Check"),
        header_cell("Count"),
        header_cell("Explanation"),
        header_cell("Example"),
        header_cell("Cell"),
    ]);
    apply_failure_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for (kind, check) in failures {
        table.add_row(vec![
            Cell::new(kind.label()).fg(Color::DarkGrey),
            outcome_cell(check),
            Cell::new(check.fail_count).fg(Color::Red),
            text_cell(&check.explanation),
            text_cell(&check.fail_example),
            text_cell(&check.fail_reference()),
        ]);
    }
    println!();
    println!("Failures:");
    println!("{table}");
}

/// Shared compact style for listing tables.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(110);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(70)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
    ]);
}

fn apply_failure_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(180);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(20)),
        ColumnConstraint::LowerBoundary(Width::Fixed(7)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(20)),
        ColumnConstraint::LowerBoundary(Width::Fixed(6)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn outcome_cell(check: &CheckResult) -> Cell {
    let color = match check.outcome {
        Outcome::Pass => Color::Green,
        Outcome::Fail => Color::Red,
        Outcome::Skip => Color::Yellow,
    };
    Cell::new(&check.check_performed)
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn text_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
