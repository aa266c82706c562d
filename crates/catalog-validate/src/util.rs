use catalog_model::MetricValue;

/// Whole percentage, truncated toward zero. A zero denominator yields `0%`.
pub fn percent(numerator: usize, denominator: usize) -> MetricValue {
    if denominator == 0 {
        return MetricValue::percent(0);
    }
    let value = numerator.saturating_mul(100) / denominator;
    MetricValue::percent(value as u64)
}

/// First `max_chars` characters, with an ellipsis when the text was cut.
pub fn snippet(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
