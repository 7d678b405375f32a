//! Loading benchmark row files into a fresh store

use medida_common::{MedidaError, Result};
use std::fs;
use std::path::Path;

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::cli::SourceArgs;
use crate::config::EngineConfig;
use crate::ingest::{BatchIngestor, BatchReport, TableInput};
use crate::store::InMemoryStore;

/// Store filled from the command's inputs, plus what happened to each row
pub(super) struct Session {
    pub store: InMemoryStore,
    pub report: BatchReport,
}

/// Read one JSON row file
pub(super) fn load_input(path: &Path) -> Result<TableInput> {
    if !path.exists() {
        return Err(MedidaError::InputNotFound { path: path.to_path_buf() });
    }

    let text = fs::read_to_string(path)
        .map_err(|e| MedidaError::io(format!("reading {}", path.display()), e))?;
    serde_json::from_str(&text)
        .map_err(|e| MedidaError::InputParsing { path: path.to_path_buf(), message: e.to_string() })
}

/// Section label used in batch reports: `file` or `file#section`
fn section_label(path: &Path, section: Option<&str>) -> String {
    match section {
        Some(name) => format!("{}#{name}", path.display()),
        None => path.display().to_string(),
    }
}

/// Load every input and ingest it, in order, into one store
///
/// All files are parsed before the first row is ingested, so a broken file
/// fails the run without a partial batch.
pub(super) fn ingest_sources(
    source: &SourceArgs,
    config: &EngineConfig,
    level: LogLevel,
) -> Result<Session> {
    let inputs = source
        .inputs
        .iter()
        .map(|path| load_input(path).map(|input| (path, input)))
        .collect::<Result<Vec<_>>>()?;

    let store = InMemoryStore::new();
    let validator = config.validator();
    let policy = source.policy.unwrap_or(config.ingest.duplicate_policy);

    let mut ingestor = BatchIngestor::new(&store, &validator).with_policy(policy);
    for (path, input) in &inputs {
        log(
            level,
            LogLevel::Verbose,
            &format!("Reading {} ({} rows)", path.display(), input.row_count()),
        );
        for section in &input.sections {
            let map = section.column_map(validator.registry());
            ingestor.begin_section(Some(&section_label(path, section.name.as_deref())));
            ingestor.ingest_rows(&section.rows, &map);
        }
    }
    let report = ingestor.finish();

    Ok(Session { store, report })
}
