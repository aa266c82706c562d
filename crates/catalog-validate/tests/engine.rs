use catalog_model::{
    AccessorError, Dataset, GroupKind, Metric, MetricValue, Outcome, Property, PropertyMapping,
    RawAccessor, Report, SheetSnapshot, WorkbookSnapshot,
};
use catalog_validate::{
    EvaluationCause, ValidationError, ValidationOptions, validate, validate_with_options,
};
use polars::prelude::{Column, DataFrame};
use proptest::prelude::*;

fn run_sheet(sheet: SheetSnapshot, mapping: &PropertyMapping) -> Report {
    let dataset = Dataset::from_sheet(&sheet).expect("dataset");
    let workbook = WorkbookSnapshot::single(sheet);
    validate(&dataset, mapping, &workbook).expect("validate")
}

fn run(rows: &[&[&str]], mapping: &PropertyMapping) -> Report {
    run_sheet(SheetSnapshot::from_strs("Products", rows), mapping)
}

fn catalog_mapping() -> PropertyMapping {
    PropertyMapping::new()
        .with(Property::Country, "Country")
        .with(Property::Brand, "Brand")
        .with(Property::ProductId, "Product ID")
        .with(Property::ProductNameEnglish, "Product Name (English)")
        .with(Property::ProductImageUrl, "Product Image URL")
}

#[test]
fn gate_reports_the_first_failing_tier() {
    let mapping = PropertyMapping::new()
        .with(Property::Brand, "Brand")
        .with(Property::ProductId, "Product ID");
    let report = run(&[&["Product ID", "Other"][..], &["", "x"][..]], &mapping);

    let explanation = |name: &str| {
        let check = report
            .check(GroupKind::MandatoryCompleteness, name)
            .expect(name);
        assert_eq!(check.outcome, Outcome::Skip);
        assert_eq!(check.fail_count, 0);
        assert!(check.fail_example.is_empty());
        check.explanation.clone()
    };
    assert_eq!(explanation("Country Completeness"), "Not mapped");
    assert_eq!(explanation("Brand Completeness"), "Mapped but column missing");
    assert_eq!(explanation("Product ID Completeness"), "No data present");
}

#[test]
fn completeness_points_at_first_blank() {
    let report = run(
        &[
            &["Country", "Brand"][..],
            &["US", "Acme"][..],
            &["US", ""][..],
            &["US", " "][..],
        ],
        &catalog_mapping(),
    );
    let brand = report
        .check(GroupKind::MandatoryCompleteness, "Brand Completeness")
        .expect("brand");
    assert!(brand.is_fail());
    assert_eq!(brand.explanation, "Missing");
    assert_eq!(brand.fail_count, 2);
    assert_eq!(brand.fail_example, "<blank>");
    assert_eq!(brand.fail_reference(), "B3");
    assert_eq!(
        brand.metric(Metric::DataCompleteness),
        Some(&MetricValue::percent(33))
    );
}

#[test]
fn null_cells_in_a_frame_are_blank() {
    let frame = DataFrame::new(vec![Column::new(
        "Brand".into(),
        [Some("Acme"), None, Some("Beta")],
    )])
    .expect("df");
    let dataset = Dataset::from_frame(frame);
    let workbook = WorkbookSnapshot::single(SheetSnapshot::from_strs(
        "Products",
        &[&["Brand"][..], &["Acme"][..], &[""][..], &["Beta"][..]],
    ));
    let report = validate(&dataset, &catalog_mapping(), &workbook).expect("validate");
    let brand = report
        .check(GroupKind::MandatoryCompleteness, "Brand Completeness")
        .expect("brand");
    assert_eq!(brand.fail_count, 1);
    assert_eq!(brand.fail_reference(), "A3");
    assert_eq!(report.row_count(), 3);
}

#[test]
fn every_duplicate_member_fails() {
    let report = run(
        &[&["Product ID"][..], &["A"][..], &["A"][..], &["B"][..]],
        &catalog_mapping(),
    );
    let unique = report
        .check(GroupKind::MandatoryUniqueness, "Product ID Uniqueness")
        .expect("uniqueness");
    assert!(unique.is_fail());
    assert_eq!(unique.fail_count, 2);
    assert_eq!(unique.fail_example, "A");
    assert_eq!(unique.fail_reference(), "A2");
    assert_eq!(
        unique.metric(Metric::DataUniqueness),
        Some(&MetricValue::percent(33))
    );
}

#[test]
fn categories_may_repeat() {
    let mapping = PropertyMapping::new()
        .with(Property::ProductId, "Product ID")
        .with(Property::Category, "Category");
    let report = run(
        &[&["Product ID", "Category"][..], &["1", "Shoes"][..], &["2", "Shoes"][..]],
        &mapping,
    );
    let category = report
        .check(GroupKind::OptionalUniqueness, "Category Uniqueness")
        .expect("category");
    assert!(category.is_pass());
    assert_eq!(category.explanation, "Duplicates allowed for categories");
}

#[test]
fn country_reports_second_code() {
    let report = run(
        &[&["Country"][..], &["US"][..], &["US + CA"][..], &["MX"][..]],
        &catalog_mapping(),
    );
    let country = report
        .check(GroupKind::CountryUniqueness, "Country Unique Count")
        .expect("country");
    assert!(country.is_fail());
    assert_eq!(country.explanation, "Found 3 country codes");
    assert_eq!(country.fail_count, 2);
    assert_eq!(country.fail_example, "CA");
    assert_eq!(country.fail_reference(), "A3");
    assert_eq!(
        country.metric(Metric::ListUniqueValues),
        Some(&MetricValue::Text("US, CA, MX".to_string()))
    );
}

#[test]
fn single_country_passes_and_blank_fails() {
    let pass = run(&[&["Country"][..], &["US"][..], &["US"][..]], &catalog_mapping());
    let check = pass
        .check(GroupKind::CountryUniqueness, "Country Unique Count")
        .expect("country");
    assert!(check.is_pass());
    assert_eq!(check.metric(Metric::CountUnique), Some(&MetricValue::Integer(1)));

    let blank = run(&[&["Country"][..], &["US"][..], &[""][..]], &catalog_mapping());
    let check = blank
        .check(GroupKind::CountryUniqueness, "Country Unique Count")
        .expect("country");
    assert!(check.is_fail());
    assert_eq!(check.explanation, "Missing");
    assert_eq!(check.fail_count, 1);
    assert_eq!(check.fail_reference(), "A3");
}

#[test]
fn url_accepts_text_or_hyperlink_target() {
    let sheet = SheetSnapshot::from_strs(
        "Products",
        &[
            &["Product ID", "Product Image URL"][..],
            &["1", "https://example.com/a.png"][..],
            &["2", "ftp://x.com"][..],
            &["3", "click here"][..],
        ],
    )
    .with_hyperlink("B4", "https://shop.example.com/p/3");
    let report = run_sheet(sheet, &catalog_mapping());

    let check = report
        .check(GroupKind::MandatoryUrl, "Product Image URL Hyperlink Check")
        .expect("url");
    assert!(check.is_fail());
    assert_eq!(check.fail_count, 1);
    assert_eq!(check.explanation, "No hyperlink attached at B3");
    assert_eq!(check.fail_example, "ftp://x.com");
    assert_eq!(check.metric(Metric::PassRate), Some(&MetricValue::percent(66)));
}

#[test]
fn invalid_hyperlink_target_is_named() {
    let sheet = SheetSnapshot::from_strs(
        "Products",
        &[&["Product Image URL"][..], &["image"][..]],
    )
    .with_hyperlink("A2", "mailto:someone@example.com");
    let report = run_sheet(sheet, &catalog_mapping());
    let check = report
        .check(GroupKind::MandatoryUrl, "Product Image URL Hyperlink Check")
        .expect("url");
    assert_eq!(
        check.explanation,
        "Invalid hyperlink target (mailto:someone@example.com) at A2"
    );
}

#[test]
fn english_name_limit_is_inclusive() {
    let at_limit = "a".repeat(750);
    let over = "b".repeat(751);
    let report = run(
        &[
            &["Product Name (English)"][..],
            &[at_limit.as_str()][..],
            &[over.as_str()][..],
        ],
        &catalog_mapping(),
    );
    let check = report
        .check(
            GroupKind::EnglishNameLength,
            "Product Name (English) Character Limit Check",
        )
        .expect("length");
    assert!(check.is_fail());
    assert_eq!(check.fail_count, 1);
    assert_eq!(check.explanation, "Over 750 chars");
    assert_eq!(check.metric(Metric::ActualLength), Some(&MetricValue::Integer(751)));
    assert_eq!(check.fail_example, format!("{}…", "b".repeat(25)));
    assert_eq!(check.fail_reference(), "A3");
}

#[test]
fn comma_means_multiple_identifiers() {
    let report = run(
        &[&["Product ID"][..], &["123"][..], &["123,456"][..]],
        &catalog_mapping(),
    );
    let check = report
        .check(GroupKind::SingleProductId, "Single ProductID Per Cell")
        .expect("single id");
    assert!(check.is_fail());
    assert_eq!(check.explanation, "Multiple identifiers present");
    assert_eq!(check.fail_example, "123,456");
    assert_eq!(check.fail_reference(), "A3");
}

#[test]
fn category_markup_is_prohibited() {
    let mapping = PropertyMapping::new()
        .with(Property::Category, "Category")
        .with(Property::SubCategory, "Sub-Category");
    let long = "x".repeat(80);
    let report = run(
        &[
            &["Category", "Sub-Category"][..],
            &["<b>Shoes</b>", "Running"][..],
            &["Shoes", long.as_str()][..],
        ],
        &mapping,
    );
    let category = report
        .check(GroupKind::CategoryChecks, "Category Data Checks")
        .expect("category");
    assert_eq!(category.explanation, "Contains prohibited char");
    assert_eq!(category.fail_example, "<b>");

    let sub = report
        .check(GroupKind::CategoryChecks, "Sub-Category Data Checks")
        .expect("sub-category");
    assert_eq!(sub.explanation, "Too long (>75)");
    assert_eq!(sub.fail_example, "x".repeat(25));
    assert_eq!(sub.fail_reference(), "B3");
}

#[test]
fn data_format_counts_occurrences_with_sheet_addresses() {
    let report = run(
        &[
            &["Product ID", "Notes"][..],
            &["1", "A=B"][..],
            &["2", "=SUM(A1)"][..],
            &["3", "Demo price $5 or $6"][..],
        ],
        &PropertyMapping::new(),
    );

    let formulas = report
        .check(GroupKind::DataFormat, "Formulas")
        .expect("formulas");
    assert_eq!(formulas.fail_count, 1);
    assert_eq!(formulas.fail_example, "=SUM(A1)");
    assert_eq!(formulas.fail_reference(), "Products!B3");
    assert!(formulas.explanation.is_empty());

    let demo = report.check(GroupKind::DataFormat, "Demo Data").expect("demo");
    assert_eq!(demo.fail_count, 1);
    assert_eq!(demo.fail_example, "Demo");

    let special = report
        .check(GroupKind::DataFormat, "Special Characters")
        .expect("special");
    assert_eq!(special.fail_count, 2);
    assert_eq!(special.fail_example, "$");
    assert_eq!(special.fail_reference(), "Products!B4");

    assert!(report.check(GroupKind::DataFormat, "HTML Tags").expect("html").is_pass());
}

#[test]
fn data_format_finds_columns_with_irregular_raw_headers() {
    let mapping = PropertyMapping::new()
        .with(Property::ProductId, "Product ID")
        .with(Property::Brand, "Brand");
    let report = run(
        &[
            &["Product  ID", "\u{feff}Brand"][..],
            &["Demo 1", "Acme"][..],
            &["=SUM(A1)", "Beta"][..],
        ],
        &mapping,
    );

    let demo = report.check(GroupKind::DataFormat, "Demo Data").expect("demo");
    assert!(demo.is_fail());
    assert_eq!(demo.fail_count, 1);
    assert_eq!(demo.fail_reference(), "Products!A2");

    let formulas = report
        .check(GroupKind::DataFormat, "Formulas")
        .expect("formulas");
    assert!(formulas.is_fail());
    assert_eq!(formulas.fail_example, "=SUM(A1)");
    assert_eq!(formulas.fail_reference(), "Products!A3");
}

#[test]
fn hyperlinks_are_read_at_the_raw_column_of_a_respaced_header() {
    let sheet = SheetSnapshot::from_strs(
        "Products",
        &[
            &["Brand", "Brand", "Product  Image URL"][..],
            &["Acme", "dup", "click here"][..],
        ],
    )
    .with_hyperlink("C2", "https://shop.example.com/p/1");
    let report = run_sheet(sheet, &catalog_mapping());

    let check = report
        .check(GroupKind::MandatoryUrl, "Product Image URL Hyperlink Check")
        .expect("url");
    assert!(check.is_pass(), "{}", check.explanation);
    assert_eq!(check.metric(Metric::PassRate), Some(&MetricValue::percent(100)));
}

#[test]
fn file_format_flags_extra_sheets_and_hidden_rows() {
    let products = SheetSnapshot::from_strs("Products", &[&["Product ID"][..], &["1"][..]])
        .with_hidden_row(5)
        .with_hidden_row(2)
        .with_hidden_column(3);
    let notes = SheetSnapshot::from_strs("Notes", &[&["x"][..]]);
    let dataset = Dataset::from_sheet(&products).expect("dataset");
    let workbook = WorkbookSnapshot::new(vec![products, notes]);
    let report = validate(&dataset, &catalog_mapping(), &workbook).expect("validate");

    let single = report
        .check(GroupKind::FileFormat, "Single Worksheet")
        .expect("single");
    assert!(single.is_fail());
    assert_eq!(single.fail_count, 1);
    assert_eq!(single.explanation, "2 sheets: [Products, Notes]");

    let rows = report.check(GroupKind::FileFormat, "Hidden Rows").expect("rows");
    assert_eq!(rows.fail_count, 2);
    assert_eq!(rows.fail_example, "2");
    assert_eq!(rows.explanation, "[Products] Hidden rows: [2, 5]");

    let cols = report
        .check(GroupKind::FileFormat, "Hidden Columns")
        .expect("cols");
    assert_eq!(cols.fail_example, "D");
}

#[test]
fn extra_identifiers_join_secondary_groups() {
    let mapping = catalog_mapping().with(Property::Custom("Retailer Code".to_string()), "Retailer Code");
    let sheet = SheetSnapshot::from_strs(
        "Products",
        &[&["Product ID", "Retailer Code"][..], &["1", "R1,R2"][..], &["2", ""][..]],
    );
    let dataset = Dataset::from_sheet(&sheet).expect("dataset");
    let workbook = WorkbookSnapshot::single(sheet);
    let options = ValidationOptions::default().with_extra_identifier("Retailer Code");
    let report = validate_with_options(&dataset, &mapping, &workbook, &options).expect("validate");

    let completeness = report
        .check(GroupKind::OptionalCompleteness, "Retailer Code Completeness")
        .expect("completeness");
    assert_eq!(completeness.explanation, "1 empty cell");

    let single = report
        .check(
            GroupKind::SingleSecondaryId,
            "Retailer Code Single Secondary Product Identifier Per Cell",
        )
        .expect("single");
    assert!(single.is_fail());
}

#[test]
fn report_keeps_group_order_and_is_stable() {
    let rows: &[&[&str]] = &[
        &["Country", "Product ID", "Product Image URL"][..],
        &["US", "1", "https://example.com/1.png"][..],
        &["US", "2", "https://example.com/2.png"][..],
    ];
    let first = run(rows, &catalog_mapping());
    let second = run(rows, &catalog_mapping());
    assert_eq!(
        first.to_json().expect("json"),
        second.to_json().expect("json")
    );

    let value = first.to_value().expect("value");
    let order: Vec<&str> = value["validation_group_order"]
        .as_array()
        .expect("order")
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    let labels: Vec<&str> = GroupKind::ALL.iter().map(|kind| kind.label()).collect();
    assert_eq!(order, labels);
    assert_eq!(value["file_summary"]["row_count"], 2);
}

struct BrokenWorkbook {
    panic: bool,
}

impl RawAccessor for BrokenWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        vec!["Products".to_string()]
    }

    fn active_sheet(&self) -> Option<String> {
        Some("Products".to_string())
    }

    fn hidden_rows(&self, _sheet: &str) -> Result<Vec<usize>, AccessorError> {
        if self.panic {
            panic!("row metadata unavailable");
        }
        Err(AccessorError::Io(std::io::Error::other("truncated sheet xml")))
    }

    fn hidden_columns(&self, _sheet: &str) -> Result<Vec<String>, AccessorError> {
        Ok(Vec::new())
    }

    fn header_letters(&self, _sheet: &str) -> Result<Vec<(String, String)>, AccessorError> {
        Ok(Vec::new())
    }

    fn hyperlink(&self, _sheet: &str, _cell: &str) -> Option<String> {
        None
    }

    fn column_cells(&self, _sheet: &str, _letter: &str) -> Result<Vec<String>, AccessorError> {
        Ok(Vec::new())
    }
}

#[test]
fn failing_group_aborts_the_run() {
    let sheet = SheetSnapshot::from_strs("Products", &[&["Product ID"][..], &["1"][..]]);
    let dataset = Dataset::from_sheet(&sheet).expect("dataset");

    let err = validate(&dataset, &catalog_mapping(), &BrokenWorkbook { panic: false })
        .expect_err("accessor error");
    assert!(matches!(
        err,
        ValidationError::Evaluation {
            group: "File Format Checks",
            source: EvaluationCause::Accessor(_),
        }
    ));

    let err = validate(&dataset, &catalog_mapping(), &BrokenWorkbook { panic: true })
        .expect_err("panic");
    match err {
        ValidationError::Evaluation {
            source: EvaluationCause::Panic(message),
            ..
        } => assert_eq!(message, "row metadata unavailable"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn empty_workbook_cannot_be_validated() {
    let sheet = SheetSnapshot::from_strs("Products", &[&["Product ID"][..]]);
    let dataset = Dataset::from_sheet(&sheet).expect("dataset");
    let err = validate(&dataset, &catalog_mapping(), &WorkbookSnapshot::default())
        .expect_err("no sheets");
    assert!(matches!(err, ValidationError::Sheet(AccessorError::NoSheets)));
}

proptest! {
    #[test]
    fn completeness_counts_every_blank(cells in proptest::collection::vec(prop_oneof!["", " ", "[a-z]{1,4}"], 1..20)) {
        let mut rows: Vec<Vec<String>> = vec![vec!["Brand".to_string()]];
        rows.extend(cells.iter().map(|cell| vec![cell.clone()]));
        let report = run_sheet(SheetSnapshot::new("Products", rows), &catalog_mapping());
        let check = report
            .check(GroupKind::MandatoryCompleteness, "Brand Completeness")
            .expect("brand");
        let blanks = cells.iter().filter(|cell| cell.trim().is_empty()).count();
        if blanks == cells.len() {
            prop_assert!(check.is_skip());
        } else {
            prop_assert_eq!(check.fail_count, blanks);
            prop_assert_eq!(check.is_fail(), blanks > 0);
        }
    }
}
