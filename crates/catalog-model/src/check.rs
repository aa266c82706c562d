//! Single check outcomes.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::address::SpreadsheetAddress;

/// Placeholder rendered when the offending cell is blank.
pub const BLANK_EXAMPLE: &str = "<blank>";

/// Result of one check: exactly one of three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
}

impl Outcome {
    /// Report label, including its marker glyph.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "✅ Pass",
            Self::Fail => "❌ Fail",
            Self::Skip => "⏭️ Skip",
        }
    }

    /// Plain name without the glyph.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Skip => "Skip",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "✅ Pass" | "Pass" => Some(Self::Pass),
            "❌ Fail" | "Fail" => Some(Self::Fail),
            "⏭️ Skip" | "Skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Category-specific metric carried by a check result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    DataCompleteness,
    DataUniqueness,
    PassRate,
    CountUnique,
    ListUniqueValues,
    MaxLength,
    ActualLength,
}

impl Metric {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DataCompleteness => "% Data Completeness",
            Self::DataUniqueness => "% Data Uniqueness",
            Self::PassRate => "% Pass Rate",
            Self::CountUnique => "Count Unique",
            Self::ListUniqueValues => "List Unique Values",
            Self::MaxLength => "Max Length",
            Self::ActualLength => "Actual Length",
        }
    }
}

/// A metric value: text, a number, or null.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Text(String),
    Integer(i64),
    Number(f64),
    Null,
}

impl MetricValue {
    /// Render a whole percentage as `"N%"`.
    pub fn percent(value: u64) -> Self {
        Self::Text(format!("{value}%"))
    }

    /// Normalize numbers: non-finite floats become null and integral floats
    /// become integers.
    #[must_use]
    pub fn sanitized(self) -> Self {
        match self {
            Self::Number(value) if !value.is_finite() => Self::Null,
            Self::Number(value)
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 =>
            {
                Self::Integer(value as i64)
            }
            other => other,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Null => Ok(()),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Number(value) if value.is_finite() => serializer.serialize_f64(*value),
            Self::Number(_) | Self::Null => serializer.serialize_none(),
        }
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Outcome of one named check.
///
/// `fail_count` is zero exactly when the outcome is `Pass` or `Skip`, and a
/// skipped check never carries a fail example.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub check_performed: String,
    pub outcome: Outcome,
    pub explanation: String,
    pub fail_count: usize,
    pub fail_example: String,
    pub fail_example_address: Option<SpreadsheetAddress>,
    pub metrics: Vec<(Metric, MetricValue)>,
}

impl CheckResult {
    fn new(check: impl Into<String>, outcome: Outcome, explanation: impl Into<String>) -> Self {
        Self {
            check_performed: check.into(),
            outcome,
            explanation: explanation.into(),
            fail_count: 0,
            fail_example: String::new(),
            fail_example_address: None,
            metrics: Vec::new(),
        }
    }

    pub fn pass(check: impl Into<String>) -> Self {
        Self::new(check, Outcome::Pass, "")
    }

    pub fn skip(check: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self::new(check, Outcome::Skip, explanation)
    }

    /// A failing check. A zero count is raised to one so a Fail never
    /// reports an empty tally.
    pub fn fail(check: impl Into<String>, explanation: impl Into<String>, count: usize) -> Self {
        let mut result = Self::new(check, Outcome::Fail, explanation);
        result.fail_count = count.max(1);
        result
    }

    /// Pass when `count` is zero, otherwise Fail with that count.
    pub fn from_count(check: impl Into<String>, count: usize, explanation: impl Into<String>) -> Self {
        if count == 0 {
            Self::pass(check)
        } else {
            Self::fail(check, explanation, count)
        }
    }

    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Attach the first offending value. Ignored on skipped checks.
    #[must_use]
    pub fn with_example(
        mut self,
        example: impl Into<String>,
        address: Option<SpreadsheetAddress>,
    ) -> Self {
        if self.outcome != Outcome::Skip {
            let example = example.into();
            self.fail_example = if example.is_empty() {
                BLANK_EXAMPLE.to_string()
            } else {
                example
            };
            self.fail_example_address = address;
        }
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric, value: impl Into<MetricValue>) -> Self {
        self.set_metric(metric, value);
        self
    }

    /// Insert or replace a metric, keeping first-insertion order.
    pub fn set_metric(&mut self, metric: Metric, value: impl Into<MetricValue>) {
        let value = value.into();
        match self.metrics.iter_mut().find(|(existing, _)| *existing == metric) {
            Some((_, slot)) => *slot = value,
            None => self.metrics.push((metric, value)),
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<&MetricValue> {
        self.metrics
            .iter()
            .find(|(existing, _)| *existing == metric)
            .map(|(_, value)| value)
    }

    /// Overwrite the fail count, keeping the outcome consistent with it.
    pub fn set_fail_count(&mut self, count: usize) {
        self.fail_count = count;
        match (self.outcome, count) {
            (Outcome::Pass, n) if n > 0 => self.outcome = Outcome::Fail,
            (Outcome::Fail, 0) => self.outcome = Outcome::Pass,
            _ => {}
        }
    }

    pub fn is_pass(&self) -> bool {
        self.outcome == Outcome::Pass
    }

    pub fn is_fail(&self) -> bool {
        self.outcome == Outcome::Fail
    }

    pub fn is_skip(&self) -> bool {
        self.outcome == Outcome::Skip
    }

    /// Cell reference text; empty when no address is attached.
    pub fn fail_reference(&self) -> String {
        self.fail_example_address
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Normalize every metric value for serialization.
    pub fn sanitize(&mut self) {
        for (_, value) in &mut self.metrics {
            *value = std::mem::replace(value, MetricValue::Null).sanitized();
        }
    }
}

impl Serialize for CheckResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6 + self.metrics.len()))?;
        map.serialize_entry("Check Performed", &self.check_performed)?;
        map.serialize_entry("Check Outcome", &self.outcome)?;
        map.serialize_entry("Explanation", &self.explanation)?;
        for (metric, value) in &self.metrics {
            map.serialize_entry(metric.label(), value)?;
        }
        map.serialize_entry("Check Fail Count", &self.fail_count)?;
        map.serialize_entry("Check Fail Example", &self.fail_example)?;
        map.serialize_entry("Check Fail Example Cell Reference", &self.fail_reference())?;
        map.end()
    }
}
