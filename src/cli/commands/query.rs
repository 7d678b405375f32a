//! Query command implementation

use medida_common::{OutputFormat, Result};
use serde::Serialize;

use super::input::ingest_sources;
use super::output::{print_structured, record_line};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::compare::{RatioSummary, Tolerance};
use crate::config::{EngineConfig, QueryArgs};
use crate::store::{RecordStore, StoredRecord};

/// Ratio summary plus how many ratios pass the tolerance
#[derive(Debug, Serialize)]
struct SummaryOutput {
    #[serde(flatten)]
    summary: RatioSummary,
    tolerance: Tolerance,
    passing: usize,
}

#[derive(Debug, Serialize)]
struct QueryOutput {
    records: Vec<StoredRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryOutput>,
}

pub fn run_query(args: QueryArgs, config: &EngineConfig, level: LogLevel) -> Result<()> {
    let session = ingest_sources(&args.source, config, level)?;
    let records: Vec<StoredRecord> = session.store.query(args.filter.clone()).iter()?.collect();

    let tolerance = args.tolerance.or(config.compare.tolerance).unwrap_or_default();
    let summary = args.summarize.as_deref().map(|metric| {
        let summary =
            config.engine().summarize(records.iter().map(|entry| entry.record.as_ref()), metric);
        let passing = summary.passing(tolerance);
        SummaryOutput { summary, tolerance, passing }
    });

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, &format!("{} record(s) matched", records.len()));
            for entry in &records {
                println!("  {}", record_line(entry));
            }
            if let Some(output) = &summary {
                println!();
                print_summary(output);
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            print_structured(args.format, &QueryOutput { records, summary })?;
        }
    }

    Ok(())
}

fn print_summary(output: &SummaryOutput) {
    let summary = &output.summary;
    println!("Ratio summary for {}:", summary.metric);
    if summary.count == 0 {
        println!("  no ratios computed ({} record(s) without the metric)", summary.failures);
        return;
    }
    println!("  count: {}", summary.count);
    println!("  min:   {:.4}", summary.min);
    println!("  max:   {:.4}", summary.max);
    println!("  mean:  {:.4}", summary.mean);
    println!("  improvements: {}", summary.improvements);
    println!("  regressions:  {}", summary.regressions());
    println!("  within {}: {}/{}", output.tolerance, output.passing, summary.count);
    if summary.failures > 0 {
        println!("  skipped: {} record(s) without the metric", summary.failures);
    }
}
