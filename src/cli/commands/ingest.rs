//! Ingest command implementation

use medida_common::{MedidaError, OutputFormat, Result};

use super::input::ingest_sources;
use super::output::{print_structured, record_line};
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{EngineConfig, IngestArgs};
use crate::ingest::{RowOutcome, RowResult};
use crate::store::{RecordFilter, RecordStore};

pub fn run_ingest(args: IngestArgs, config: &EngineConfig, level: LogLevel) -> Result<()> {
    let session = ingest_sources(&args.source, config, level)?;
    let report = &session.report;

    match args.format {
        OutputFormat::Text => {
            let counts = report.counts;
            log(
                level,
                LogLevel::Normal,
                &format!(
                    "Ingested {} row(s) from {} file(s)",
                    counts.total(),
                    args.source.inputs.len()
                ),
            );
            println!("  inserted:   {}", counts.inserted);
            println!("  superseded: {}", counts.superseded);
            println!("  skipped:    {}", counts.skipped);
            println!("  rejected:   {}", counts.rejected);

            if level == LogLevel::Verbose {
                for outcome in &report.outcomes {
                    println!("  {}", outcome_line(outcome));
                }
            } else {
                for outcome in report.rejected() {
                    println!("  {}", outcome_line(outcome));
                }
            }

            let flagged: Vec<_> = session
                .store
                .snapshot(&RecordFilter::new())?
                .into_iter()
                .filter(|entry| entry.record.needs_review())
                .collect();
            if !flagged.is_empty() {
                println!();
                log(level, LogLevel::Normal, &format!("{} record(s) need review:", flagged.len()));
                for entry in &flagged {
                    println!("  {}", record_line(entry));
                }
            }
        }
        OutputFormat::Json | OutputFormat::Yaml => print_structured(args.format, report)?,
    }

    if args.strict && report.has_rejections() {
        return Err(MedidaError::RowsRejected { count: report.counts.rejected });
    }
    Ok(())
}

/// `results.json#spr row 3 (ResNet50): rejected [non_finite_value] ...`
fn outcome_line(outcome: &RowOutcome) -> String {
    let mut location = match &outcome.section {
        Some(section) => format!("{section} row {}", outcome.row),
        None => format!("row {}", outcome.row),
    };
    if let Some(subject) = &outcome.subject {
        location.push_str(&format!(" ({subject})"));
    }

    let result = match &outcome.result {
        RowResult::Inserted { id } => format!("inserted as {id}"),
        RowResult::Superseded { old, new } => format!("superseded {old} with {new}"),
        RowResult::Skipped { reason, existing: Some(existing) } => {
            format!("skipped: {reason} ({existing})")
        }
        RowResult::Skipped { reason, existing: None } => format!("skipped: {reason}"),
        RowResult::Rejected { kind, reason } => format!("rejected [{kind}]: {reason}"),
    };

    format!("{location}: {result}")
}
