//! Structured output helpers

use medida_common::{OutputFormat, Result};
use serde::Serialize;

use crate::compare::RatioResult;
use crate::record::BenchmarkRecord;
use crate::store::StoredRecord;

/// Print a value as pretty JSON, or YAML when asked for
pub(super) fn print_structured<T: Serialize>(format: OutputFormat, value: &T) -> Result<()> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
        OutputFormat::Json | OutputFormat::Text => serde_json::to_string_pretty(value)?,
    };
    println!("{rendered}");
    Ok(())
}

/// `accuracy 0.7687 → 0.7620, latency 12.5000 → 6.1000`
pub(super) fn metric_summary(record: &BenchmarkRecord) -> String {
    let mut parts = Vec::new();
    for (name, baseline) in record.baseline_metric() {
        match record.optimized_metric().get(name) {
            Some(optimized) => parts.push(format!("{name} {baseline:.4} → {optimized:.4}")),
            None => parts.push(format!("{name} {baseline:.4} → -")),
        }
    }
    for (name, optimized) in record.optimized_metric() {
        if !record.baseline_metric().contains_key(name) {
            parts.push(format!("{name} - → {optimized:.4}"));
        }
    }
    if parts.is_empty() {
        "no metrics".to_string()
    } else {
        parts.join(", ")
    }
}

/// One line per stored record
pub(super) fn record_line(entry: &StoredRecord) -> String {
    let record = &entry.record;
    let mut line = format!("{}  {}  {}", entry.id, record.key(), metric_summary(record));
    if record.is_pending() {
        line.push_str("  (pending)");
    }
    if let Some(by) = entry.superseded_by {
        line.push_str(&format!("  (superseded by {by})"));
    }
    if record.needs_review() {
        let flags: Vec<String> = record.review_flags().iter().map(ToString::to_string).collect();
        line.push_str(&format!("  [review: {}]", flags.join("; ")));
    }
    line
}

/// `0.9913 (-0.87%)`
pub(super) fn ratio_text(ratio: &RatioResult) -> String {
    format!("{:.4} ({:+.2}%)", ratio.ratio, ratio.relative_change() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::Polarity;
    use crate::record::{validate, RawCandidate};

    #[test]
    fn test_metric_summary_one_sided() {
        let record = validate(
            &RawCandidate::new()
                .subject("BERT")
                .technique("int8")
                .baseline("f1", 0.9)
                .optimized("f1", 0.89)
                .optimized("latency_ms", 5.0),
        )
        .unwrap();

        let text = metric_summary(&record);
        assert!(text.contains("f1 0.9000 → 0.8900"));
        assert!(text.contains("latency - → 5.0000"));
    }

    #[test]
    fn test_ratio_text() {
        let ratio = RatioResult::new(0.7687, 0.762, Polarity::HigherIsBetter);
        assert_eq!(ratio_text(&ratio), "0.9913 (-0.87%)");
    }
}
