//! Canonical metric names

/// Resolve a raw metric label to its canonical name.
///
/// Names are trimmed and lower-cased, inner whitespace and dashes collapse to
/// `_`, and common abbreviations map to their full name.
pub fn canonical_metric_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let collapsed: String = lowered
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    match collapsed.as_str() {
        "acc" | "accuracy" | "top_1" | "top1_accuracy" => "accuracy".to_string(),
        "f1" | "f1_score" | "f1score" => "f1".to_string(),
        "em" | "exact_match" | "exactmatch" => "exact_match".to_string(),
        "ppl" | "perplexity" => "perplexity".to_string(),
        "perf" | "performance" | "throughput" | "samples_per_sec" | "tokens_per_sec" => {
            "throughput".to_string()
        }
        "latency" | "latency_ms" | "lat" => "latency".to_string(),
        "wer" | "word_error_rate" => "wer".to_string(),
        _ => collapsed,
    }
}
