//! Pattern checks on raw cell text: demo keywords, special characters,
//! leading formulas and HTML tags.
//!
//! Every occurrence counts, not every cell. The fail-report exporter reuses
//! [`scan`] so both passes see the same occurrences.

use std::sync::LazyLock;

use catalog_model::{
    AccessorError, CheckResult, ColumnAddress, Dataset, PropertyMapping, RawAccessor,
    SpreadsheetAddress,
};
use regex::Regex;
use tracing::debug;

use crate::context::RuleContext;
use crate::error::EvaluationCause;

static DEMO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdemo(?:brand|sku|_category)?\b").expect("valid demo regex")
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>|&lt;[^&]+&gt;").expect("valid HTML regex"));

/// Characters flagged by the special-character rule, in scan order.
pub const SPECIAL_CHARACTERS: &str = "©$€£¥™®@";

/// The four pattern rules, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataFormatRule {
    DemoData,
    SpecialCharacters,
    Formulas,
    HtmlTags,
}

impl DataFormatRule {
    pub const ALL: [DataFormatRule; 4] = [
        DataFormatRule::DemoData,
        DataFormatRule::SpecialCharacters,
        DataFormatRule::Formulas,
        DataFormatRule::HtmlTags,
    ];

    /// Check name used in the report.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DemoData => "Demo Data",
            Self::SpecialCharacters => "Special Characters",
            Self::Formulas => "Formulas",
            Self::HtmlTags => "HTML Tags",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.name() == name)
    }

    /// Every occurrence in one trimmed cell, as the matched text.
    pub fn occurrences(&self, text: &str) -> Vec<String> {
        match self {
            Self::DemoData => DEMO.find_iter(text).map(|m| m.as_str().to_string()).collect(),
            Self::SpecialCharacters => SPECIAL_CHARACTERS
                .chars()
                .flat_map(|special| {
                    let count = text.chars().filter(|&ch| ch == special).count();
                    std::iter::repeat_n(special.to_string(), count)
                })
                .collect(),
            Self::Formulas if text.starts_with('=') => vec![text.to_string()],
            Self::Formulas => Vec::new(),
            Self::HtmlTags => HTML_TAG
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect(),
        }
    }

    /// Per-occurrence explanation written to the fail report.
    ///
    /// Formula rows name only the leading `=`; the full cell text stays in
    /// the report's fail example.
    pub fn describe(&self, example: &str) -> String {
        match self {
            Self::DemoData => format!("Demo keyword '{example}' found"),
            Self::SpecialCharacters => format!("Special character '{example}' found"),
            Self::Formulas => "Formula detected '=' found".to_string(),
            Self::HtmlTags => format!("HTML tag '{example}' found"),
        }
    }
}

/// One pattern match in a raw cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub rule: DataFormatRule,
    pub example: String,
    pub address: SpreadsheetAddress,
}

/// Columns the pattern rules scan, in dataset order.
///
/// Mapped headers present in the dataset; with fewer than two mapped
/// properties every dataset column is scanned.
pub fn scannable_headers(dataset: &Dataset, mapping: &PropertyMapping) -> Vec<String> {
    if mapping.len() < 2 {
        return dataset.columns().to_vec();
    }
    let mapped = mapping.headers();
    dataset
        .columns()
        .iter()
        .filter(|column| mapped.contains(&column.as_str()))
        .cloned()
        .collect()
}

/// Scan raw cells of `headers` on `sheet`, column by column then row by row.
///
/// Headers missing from the raw header row are skipped.
pub fn scan(
    raw: &dyn RawAccessor,
    sheet: &str,
    headers: &[String],
    rule: DataFormatRule,
) -> Result<Vec<Occurrence>, AccessorError> {
    let mut found = Vec::new();
    for header in headers {
        let Some(column) = raw
            .column_letter_for(sheet, header)
            .and_then(|letter| ColumnAddress::from_letter(&letter))
        else {
            continue;
        };
        for (row, cell) in raw.column_cells(sheet, column.letter())?.iter().enumerate() {
            let text = cell.trim();
            if text.is_empty() {
                continue;
            }
            for example in rule.occurrences(text) {
                found.push(Occurrence {
                    rule,
                    example,
                    address: column.cell(row).with_sheet(sheet),
                });
            }
        }
    }
    Ok(found)
}

pub fn check(ctx: &RuleContext<'_>) -> Result<Vec<CheckResult>, EvaluationCause> {
    let headers = scannable_headers(ctx.dataset, ctx.mapping);
    if headers.is_empty() {
        return Ok(DataFormatRule::ALL
            .iter()
            .map(|rule| CheckResult::skip(rule.name(), "No columns in dataset"))
            .collect());
    }

    let mut results = Vec::with_capacity(DataFormatRule::ALL.len());
    for rule in DataFormatRule::ALL {
        let occurrences = scan(ctx.raw, ctx.sheet, &headers, rule)?;
        debug!(rule = rule.name(), occurrences = occurrences.len(), "data format scan");
        let result = match occurrences.first() {
            None => CheckResult::pass(rule.name()),
            Some(first) => CheckResult::fail(rule.name(), "", occurrences.len())
                .with_example(first.example.clone(), Some(first.address.clone())),
        };
        results.push(result);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_keyword_counts_every_match() {
        let rule = DataFormatRule::DemoData;
        assert_eq!(rule.occurrences("Demo SKU 123"), vec!["Demo"]);
        assert_eq!(rule.occurrences("demobrand and DEMO_category"), vec!["demobrand", "DEMO_category"]);
        assert!(rule.occurrences("demonstration").is_empty());
    }

    #[test]
    fn special_characters_follow_set_order() {
        let found = DataFormatRule::SpecialCharacters.occurrences("@a$b$©");
        assert_eq!(found, vec!["©", "$", "$", "@"]);
    }

    #[test]
    fn formulas_need_a_leading_equals() {
        assert!(DataFormatRule::Formulas.occurrences("A=B").is_empty());
        assert_eq!(DataFormatRule::Formulas.occurrences("=SUM(A1)"), vec!["=SUM(A1)"]);
        assert_eq!(
            DataFormatRule::Formulas.describe("=SUM(A1)"),
            "Formula detected '=' found"
        );
        assert_eq!(
            DataFormatRule::DemoData.describe("Demo"),
            "Demo keyword 'Demo' found"
        );
    }

    #[test]
    fn html_tags_match_raw_and_escaped() {
        let found = DataFormatRule::HtmlTags.occurrences("<b>x</b> &lt;i&gt;");
        assert_eq!(found, vec!["<b>", "</b>", "&lt;i&gt;"]);
    }
}
