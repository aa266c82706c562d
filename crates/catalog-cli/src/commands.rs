use anyhow::Result;
use catalog_model::Property;
use catalog_validate::catalog::groups_for;
use comfy_table::Table;

use catalog_cli::pipeline::{RunRequest, Validated, run, sibling_path};

use crate::cli::{ExportArgs, InputArgs, ValidateArgs};
use crate::summary::apply_table_style;
use crate::types::ValidateResult;

fn request(input: &InputArgs) -> RunRequest {
    RunRequest {
        input: input.file.clone(),
        sheet: input.sheet.clone(),
        mapping: input.mapping.clone(),
        extra_ids: input.extra_ids.clone(),
    }
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateResult> {
    let mut validated = run(&request(&args.input))?;

    // Export first so the JSON report carries the reconciled counts.
    let fail_report = match &args.fail_report {
        Some(path) => Some(validated.export_fails(path)?),
        None => None,
    };
    let json_path = if args.dry_run {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| sibling_path(&args.input.file, "_report.json"));
        Some(validated.write_json(&path)?)
    };

    Ok(finish(&args.input, validated, json_path, fail_report))
}

pub fn run_export_fails(args: &ExportArgs) -> Result<ValidateResult> {
    let mut validated = run(&request(&args.input))?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.input.file, "_fails.xlsx"));
    let outcome = validated.export_fails(&path)?;
    Ok(finish(&args.input, validated, None, Some(outcome)))
}

fn finish(
    input: &InputArgs,
    validated: Validated,
    json_path: Option<std::path::PathBuf>,
    fail_report: Option<catalog_report::ExportOutcome>,
) -> ValidateResult {
    ValidateResult {
        input: input.file.clone(),
        sheet: validated.sheet,
        report: validated.report,
        json_path,
        fail_report,
    }
}

pub fn run_properties() {
    let mut table = Table::new();
    table.set_header(vec!["Property", "Rule Groups"]);
    apply_table_style(&mut table);
    for property in Property::STANDARD {
        let groups: Vec<&str> = groups_for(property)
            .iter()
            .map(|kind| kind.label())
            .collect();
        table.add_row(vec![property.label().to_string(), groups.join("\n")]);
    }
    println!("{table}");
    println!("Extra identifiers (--extra-id) join the optional completeness, uniqueness and single-identifier groups.");
}
