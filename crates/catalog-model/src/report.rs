//! Validation report aggregate.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::check::{CheckResult, Outcome};

/// The fifteen rule groups, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupKind {
    FileFormat,
    DataFormat,
    MandatoryCompleteness,
    MandatoryUniqueness,
    CountryUniqueness,
    MandatoryUrl,
    OptionalCompleteness,
    OptionalUniqueness,
    OptionalUrl,
    EnglishNameLength,
    LocalNameLength,
    DescriptionLength,
    SingleProductId,
    SingleSecondaryId,
    CategoryChecks,
}

impl GroupKind {
    pub const ALL: [GroupKind; 15] = [
        GroupKind::FileFormat,
        GroupKind::DataFormat,
        GroupKind::MandatoryCompleteness,
        GroupKind::MandatoryUniqueness,
        GroupKind::CountryUniqueness,
        GroupKind::MandatoryUrl,
        GroupKind::OptionalCompleteness,
        GroupKind::OptionalUniqueness,
        GroupKind::OptionalUrl,
        GroupKind::EnglishNameLength,
        GroupKind::LocalNameLength,
        GroupKind::DescriptionLength,
        GroupKind::SingleProductId,
        GroupKind::SingleSecondaryId,
        GroupKind::CategoryChecks,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FileFormat => "File Format Checks",
            Self::DataFormat => "Data Format Checks",
            Self::MandatoryCompleteness => "Mandatory Data - Completeness Checks",
            Self::MandatoryUniqueness => "Mandatory Data - Uniqueness Checks",
            Self::CountryUniqueness => "Mandatory Data - Country Uniqueness Checks",
            Self::MandatoryUrl => "Mandatory Data - URL Field Checks",
            Self::OptionalCompleteness => "Optional Data - Completeness Checks",
            Self::OptionalUniqueness => "Optional Data - Uniqueness Checks",
            Self::OptionalUrl => "Optional Data - URL Field Checks",
            Self::EnglishNameLength => {
                "Product Name English - Mandatory Field - Character Limit Check"
            }
            Self::LocalNameLength => "Product Name Local - Optional Field - Character Limit Check",
            Self::DescriptionLength => {
                "Product Descriptions - Optional Fields - Character Limit Check"
            }
            Self::SingleProductId => "Mandatory Data - Single ProductID Per Cell",
            Self::SingleSecondaryId => {
                "Optional Data - Single Secondary Product Identifier Per Cell"
            }
            Self::CategoryChecks => "Optional Data - Category Length & Tag Character Checks",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }

    /// Position in report order.
    pub fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|kind| kind == self)
            .unwrap_or(Self::ALL.len())
    }
}

/// One group's ordered checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportGroup {
    pub kind: GroupKind,
    pub checks: Vec<CheckResult>,
}

impl ReportGroup {
    pub fn new(kind: GroupKind, checks: Vec<CheckResult>) -> Self {
        Self { kind, checks }
    }

    pub fn check(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|check| check.check_performed == name)
    }

    pub fn counts(&self) -> OutcomeCounts {
        OutcomeCounts::tally(&self.checks)
    }
}

/// Per-run summary block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub row_count: usize,
}

/// Pass/fail/skip tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub pass: usize,
    pub fail: usize,
    pub skip: usize,
}

impl OutcomeCounts {
    fn tally<'a>(checks: impl IntoIterator<Item = &'a CheckResult>) -> Self {
        let mut counts = Self::default();
        for check in checks {
            match check.outcome {
                Outcome::Pass => counts.pass += 1,
                Outcome::Fail => counts.fail += 1,
                Outcome::Skip => counts.skip += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.pass + self.fail + self.skip
    }
}

/// Ordered group results plus the file summary for one validation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    groups: Vec<ReportGroup>,
    summary: FileSummary,
}

impl Report {
    /// Assemble a report. Groups are placed in declared order regardless of
    /// the order they were produced in.
    pub fn new(summary: FileSummary, mut groups: Vec<ReportGroup>) -> Self {
        groups.sort_by_key(|group| group.kind.position());
        Self { groups, summary }
    }

    pub fn groups(&self) -> &[ReportGroup] {
        &self.groups
    }

    pub fn summary(&self) -> FileSummary {
        self.summary
    }

    pub fn row_count(&self) -> usize {
        self.summary.row_count
    }

    pub fn group(&self, kind: GroupKind) -> Option<&ReportGroup> {
        self.groups.iter().find(|group| group.kind == kind)
    }

    pub fn group_mut(&mut self, kind: GroupKind) -> Option<&mut ReportGroup> {
        self.groups.iter_mut().find(|group| group.kind == kind)
    }

    pub fn check(&self, kind: GroupKind, name: &str) -> Option<&CheckResult> {
        self.group(kind)?.check(name)
    }

    pub fn check_mut(&mut self, kind: GroupKind, name: &str) -> Option<&mut CheckResult> {
        self.group_mut(kind)?
            .checks
            .iter_mut()
            .find(|check| check.check_performed == name)
    }

    pub fn checks(&self) -> impl Iterator<Item = (GroupKind, &CheckResult)> {
        self.groups
            .iter()
            .flat_map(|group| group.checks.iter().map(move |check| (group.kind, check)))
    }

    pub fn counts(&self) -> OutcomeCounts {
        OutcomeCounts::tally(self.checks().map(|(_, check)| check))
    }

    pub fn has_failures(&self) -> bool {
        self.checks().any(|(_, check)| check.is_fail())
    }

    /// Normalize metric values in every check.
    pub fn sanitize(&mut self) {
        for group in &mut self.groups {
            for check in &mut group.checks {
                check.sanitize();
            }
        }
    }

    /// JSON value of the report after the recursive number normalization.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self).map(sanitize_value)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_value()?)
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let order: Vec<&str> = self.groups.iter().map(|group| group.kind.label()).collect();
        let mut map = serializer.serialize_map(Some(2 + self.groups.len()))?;
        map.serialize_entry("validation_group_order", &order)?;
        map.serialize_entry("file_summary", &self.summary)?;
        for group in &self.groups {
            map.serialize_entry(group.kind.label(), &group.checks)?;
        }
        map.end()
    }
}

/// Recursively normalize a JSON tree: integral floats become integers.
///
/// Walks every object and array so no nested number escapes the pass.
pub fn sanitize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, sanitize_value(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_value).collect()),
        Value::Number(number) => match number.as_f64() {
            Some(f) if number.is_f64() && !f.is_finite() => Value::Null,
            Some(f) if number.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Value::from(f as i64)
            }
            _ => Value::Number(number),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn groups_are_ordered_by_declaration() {
        let report = Report::new(
            FileSummary { row_count: 2 },
            vec![
                ReportGroup::new(GroupKind::CategoryChecks, vec![]),
                ReportGroup::new(GroupKind::FileFormat, vec![CheckResult::pass("Single Worksheet")]),
            ],
        );
        let kinds: Vec<GroupKind> = report.groups().iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![GroupKind::FileFormat, GroupKind::CategoryChecks]);
        assert!(report.check(GroupKind::FileFormat, "Single Worksheet").is_some());
        assert!(!report.has_failures());
    }

    #[test]
    fn labels_round_trip() {
        for kind in GroupKind::ALL {
            assert_eq!(GroupKind::from_label(kind.label()), Some(kind));
        }
    }

    #[test]
    fn sanitize_value_walks_nested_structures() {
        let value = json!({"a": [1.0, {"b": 2.5}], "c": "x"});
        assert_eq!(sanitize_value(value), json!({"a": [1, {"b": 2.5}], "c": "x"}));
    }
}
