//! End-to-end runs through the shared pipeline.

use std::fs;
use std::path::Path;

use catalog_cli::pipeline::{RunRequest, run, sibling_path};
use catalog_model::{GroupKind, Property};
use tempfile::TempDir;

const CATALOG: &str = "\u{feff}Country,Brand,Product ID,Product Name (English)\n\
                       US,Acme,P1,Widget\n\
                       US,,P2,Gadget $\n";

fn write_catalog(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write csv");
    path
}

fn request(input: &Path) -> RunRequest {
    RunRequest {
        input: input.to_path_buf(),
        ..RunRequest::default()
    }
}

#[test]
fn validates_csv_with_inferred_mapping() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_catalog(&dir, "catalog.csv", CATALOG);

    let validated = run(&request(&input)).expect("run");
    assert_eq!(validated.sheet, "catalog");
    assert_eq!(validated.report.row_count(), 2);
    assert_eq!(
        validated.mapping.header(&Property::Country),
        Some("Country")
    );

    let brand = validated
        .report
        .check(GroupKind::MandatoryCompleteness, "Brand Completeness")
        .expect("brand");
    insta::assert_json_snapshot!(brand, @r###"
    {
      "Check Performed": "Brand Completeness",
      "Check Outcome": "❌ Fail",
      "Explanation": "Missing",
      "% Data Completeness": "50%",
      "Check Fail Count": 1,
      "Check Fail Example": "<blank>",
      "Check Fail Example Cell Reference": "B3"
    }
    "###);
    assert!(validated.report.has_failures());
}

#[test]
fn export_reconciles_before_json_is_written() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_catalog(&dir, "catalog.csv", CATALOG);
    let mut validated = run(&request(&input)).expect("run");

    let fails = dir.path().join("fails.xlsx");
    let outcome = validated.export_fails(&fails).expect("export");
    assert_eq!(outcome.path.as_deref(), Some(fails.as_path()));
    assert!(fails.exists());

    let json_path = sibling_path(&input, "_report.json");
    let written = validated.write_json(&json_path).expect("json");
    assert_eq!(written, dir.path().join("catalog_report.json"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written).expect("read")).expect("parse");
    let data_format = value["Data Format Checks"].as_array().expect("group");
    let special = data_format
        .iter()
        .find(|check| check["Check Performed"] == "Special Characters")
        .expect("special characters");
    assert_eq!(special["Check Fail Count"], 1);
    assert_eq!(special["Check Outcome"], "❌ Fail");
}

#[test]
fn mapping_file_and_extra_ids_are_combined() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_catalog(
        &dir,
        "renamed.csv",
        "Market,Make,Code,Retail,Store\nUS,Acme,P1,R1,S1\nUS,Beta,P2,R1,S2\n",
    );
    let mapping = dir.path().join("mapping.json");
    fs::write(
        &mapping,
        r#"{"mapping": {"Country": "Market", "Brand": "Make", "Product ID": "Code",
             "Retailer Code": "Retail"},
            "extra_identifiers": ["Retailer Code"]}"#,
    )
    .expect("write mapping");

    let validated = run(&RunRequest {
        input: input.clone(),
        mapping: Some(mapping),
        extra_ids: vec!["Store Code".to_string()],
        ..RunRequest::default()
    })
    .expect("run");

    let retailer = Property::Custom("Retailer Code".to_string());
    assert_eq!(validated.mapping.header(&retailer), Some("Retail"));
    let uniqueness = validated
        .report
        .check(GroupKind::OptionalUniqueness, "Retailer Code Uniqueness")
        .expect("retailer uniqueness");
    assert!(uniqueness.is_fail());
    assert_eq!(uniqueness.fail_count, 2);

    let store = validated
        .report
        .check(GroupKind::OptionalCompleteness, "Store Code Completeness")
        .expect("store completeness");
    assert!(store.is_skip());
    assert_eq!(store.explanation, "Not mapped");
}

#[test]
fn ambiguous_mapping_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let input = write_catalog(&dir, "catalog.csv", CATALOG);
    let mapping = dir.path().join("mapping.json");
    fs::write(
        &mapping,
        r#"{"mapping": {"Brand": "Make", "Code": "Product ID"}}"#,
    )
    .expect("write mapping");

    let err = run(&RunRequest {
        input,
        mapping: Some(mapping),
        ..RunRequest::default()
    })
    .unwrap_err();
    assert!(
        err.chain()
            .any(|cause| cause.downcast_ref::<catalog_map::MappingError>().is_some()),
        "unexpected error: {err:#}"
    );
    assert!(format!("{err:#}").contains("ambiguous"));
}

#[test]
fn missing_input_reports_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let input = dir.path().join("absent.csv");
    let err = run(&request(&input)).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn sibling_path_keeps_the_directory() {
    let path = sibling_path(Path::new("/data/feeds/catalog.xlsx"), "_fails.xlsx");
    assert_eq!(path, Path::new("/data/feeds/catalog_fails.xlsx"));
}
