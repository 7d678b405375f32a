//! Compare command implementation

use medida_common::{OutputFormat, Result};
use serde::Serialize;

use super::input::ingest_sources;
use super::output::{print_structured, ratio_text};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::compare::{ComparisonReport, Tolerance};
use crate::config::{CompareArgs, EngineConfig};

/// A ratio outside the tolerance
#[derive(Debug, Serialize)]
struct Failure {
    subject: String,
    metric: String,
    ratio: f64,
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    #[serde(flatten)]
    report: &'a ComparisonReport,
    tolerance: Tolerance,
    failures: Vec<Failure>,
}

pub fn run_compare(args: CompareArgs, config: &EngineConfig, level: LogLevel) -> Result<()> {
    let session = ingest_sources(&args.source, config, level)?;
    let report = config.engine().compare(&session.store, &args.left, &args.right)?;
    let tolerance = args.tolerance.or(config.compare.tolerance).unwrap_or_default();

    match args.format {
        OutputFormat::Text => print_report(&report, tolerance, level),
        OutputFormat::Json | OutputFormat::Yaml => {
            let output = CompareOutput {
                report: &report,
                tolerance,
                failures: failures(&report, tolerance),
            };
            print_structured(args.format, &output)?;
        }
    }

    Ok(())
}

fn failures(report: &ComparisonReport, tolerance: Tolerance) -> Vec<Failure> {
    report
        .pairs
        .iter()
        .flat_map(|pair| {
            pair.ratios.iter().filter(|(_, ratio)| !ratio.within(tolerance)).map(|(metric, ratio)| {
                Failure { subject: pair.subject.clone(), metric: metric.clone(), ratio: ratio.ratio }
            })
        })
        .collect()
}

fn print_report(report: &ComparisonReport, tolerance: Tolerance, level: LogLevel) {
    log(
        level,
        LogLevel::Normal,
        &format!(
            "{} pair(s) across {} subject(s), tolerance {tolerance}",
            report.pairs.len(),
            report.subjects().len()
        ),
    );

    for pair in &report.pairs {
        println!("{}: {} vs {}", pair.subject, pair.left_key, pair.right_key);
        for (metric, ratio) in &pair.ratios {
            let verdict = if ratio.within(tolerance) { "ok" } else { "FAIL" };
            println!(
                "  {metric}: {:.4} → {:.4}  ratio {}  {verdict}",
                ratio.from,
                ratio.to,
                ratio_text(ratio)
            );
        }
        for issue in &pair.issues {
            println!("  {}: {}", issue.metric, issue.message);
        }
    }

    if !report.skipped.is_empty() {
        println!();
        log(level, LogLevel::Normal, &format!("{} record(s) skipped:", report.skipped.len()));
        for skipped in &report.skipped {
            println!("  {} ({} {}): {}", skipped.subject, skipped.side, skipped.record, skipped.reason);
        }
    }

    let failed = failures(report, tolerance).len();
    if failed > 0 {
        println!();
        println!("{failed} ratio(s) outside tolerance");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::ComparisonEngine;
    use crate::record::{validate, RawCandidate};
    use crate::store::{InMemoryStore, RecordFilter, RecordStore};

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        for (variant, accuracy) in [("static", 76.2), ("dynamic", 70.0)] {
            let record = validate(
                &RawCandidate::new()
                    .subject("ResNet50")
                    .technique("int8")
                    .variant(variant)
                    .baseline("accuracy", 76.87)
                    .optimized("accuracy", accuracy),
            )
            .unwrap();
            store.insert(record).unwrap();
        }
        store
    }

    #[test]
    fn test_failures_outside_tolerance() {
        let store = store();
        let report = ComparisonEngine::default()
            .compare(
                &store,
                &RecordFilter::new().variant("static"),
                &RecordFilter::new().variant("dynamic"),
            )
            .unwrap();

        let failed = failures(&report, Tolerance::Relative(0.01));
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].subject, "ResNet50");
        assert_eq!(failed[0].metric, "accuracy");

        assert!(failures(&report, Tolerance::Relative(0.2)).is_empty());
    }
}
