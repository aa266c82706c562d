//! Tests for catalog-model types.

use catalog_model::{
    CheckResult, ColumnAddress, Dataset, FileSummary, GroupKind, Metric, MetricValue,
    PropertyMapping, Property, Report, ReportGroup, SheetSnapshot, column_index, column_letter,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn column_letters_round_trip(index in 0usize..100_000) {
        let letter = column_letter(index);
        prop_assert!(letter.chars().all(|ch| ch.is_ascii_uppercase()));
        prop_assert_eq!(column_index(&letter), Some(index));
    }

    #[test]
    fn column_letters_preserve_order(a in 0usize..20_000, b in 0usize..20_000) {
        let (la, lb) = (column_letter(a), column_letter(b));
        let by_sheet_order = (la.len(), la.as_str()).cmp(&(lb.len(), lb.as_str()));
        prop_assert_eq!(by_sheet_order, a.cmp(&b));
    }
}

#[test]
fn property_addresses_follow_dataset_order() {
    let sheet = SheetSnapshot::from_strs(
        "Sheet1",
        &[
            &["Brand", "Code", "Image"][..],
            &["Acme", "P1", "https://a.com/1.png"][..],
        ],
    );
    let dataset = Dataset::from_sheet(&sheet).expect("dataset");
    let mapping = PropertyMapping::new()
        .with(Property::ProductId, "Code")
        .with(Property::ProductImageUrl, "Image");

    let column = ColumnAddress::for_property(dataset.columns(), &mapping, &Property::ProductImageUrl)
        .expect("mapped column");
    assert_eq!(column.letter(), "C");
    assert_eq!(column.cell(0).to_string(), "C2");
    assert!(ColumnAddress::for_property(dataset.columns(), &mapping, &Property::Sku).is_none());
}

#[test]
fn report_serializes_in_group_order() {
    let report = Report::new(
        FileSummary { row_count: 3 },
        vec![
            ReportGroup::new(
                GroupKind::MandatoryCompleteness,
                vec![
                    CheckResult::skip("Brand Completeness", "Not mapped")
                        .with_metric(Metric::DataCompleteness, MetricValue::percent(0)),
                ],
            ),
            ReportGroup::new(
                GroupKind::FileFormat,
                vec![CheckResult::pass("Single Worksheet").with_explanation("1 sheets: [\"Sheet1\"]")],
            ),
        ],
    );

    insta::assert_snapshot!(report.to_json().expect("json"), @r#"
    {
      "validation_group_order": [
        "File Format Checks",
        "Mandatory Data - Completeness Checks"
      ],
      "file_summary": {
        "row_count": 3
      },
      "File Format Checks": [
        {
          "Check Performed": "Single Worksheet",
          "Check Outcome": "✅ Pass",
          "Explanation": "1 sheets: [\"Sheet1\"]",
          "Check Fail Count": 0,
          "Check Fail Example": "",
          "Check Fail Example Cell Reference": ""
        }
      ],
      "Mandatory Data - Completeness Checks": [
        {
          "Check Performed": "Brand Completeness",
          "Check Outcome": "⏭️ Skip",
          "Explanation": "Not mapped",
          "% Data Completeness": "0%",
          "Check Fail Count": 0,
          "Check Fail Example": "",
          "Check Fail Example Cell Reference": ""
        }
      ]
    }
    "#);
}
