//! Integration tests for engine configuration files

use medida::compare::Tolerance;
use medida::config::{load_config, ConfigError};
use medida::ingest::DuplicatePolicy;
use medida::metric::Polarity;
use medida::record::RawCandidate;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file creation should succeed");
    file.write_all(yaml.as_bytes()).expect("file write should succeed");
    file
}

#[test]
fn test_config_extends_registry_and_policy() {
    let file = config_file(
        r"
metrics:
  bleu: { polarity: higher, scale: absolute }
ingest:
  duplicate_policy: supersede
compare:
  tolerance: { type: absolute, value: 0.5 }
",
    );
    let config = load_config(file.path()).expect("config should load");

    assert_eq!(config.registry().polarity("bleu"), Some(Polarity::HigherIsBetter));
    assert_eq!(config.ingest.duplicate_policy, DuplicatePolicy::Supersede);
    assert_eq!(config.compare.tolerance, Some(Tolerance::Absolute(0.5)));

    let marian = config
        .validator()
        .validate(
            &RawCandidate::new()
                .subject("Marian")
                .technique("distillation")
                .baseline("bleu", 27.1)
                .optimized("bleu", 26.4),
        )
        .expect("candidate should validate");
    let ratio = config.engine().compute_ratio(&marian, "bleu").expect("ratio should compute");
    assert!(ratio.within(Tolerance::Absolute(0.75)));
}

#[test]
fn test_unknown_key_is_a_parse_error() {
    let file = config_file("validaton:\n  scale_tolerance: 0.5\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_invalid_tolerance_is_rejected() {
    let file = config_file("validation:\n  reported_abs_tolerance: -1.0\n");
    let err = load_config(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}
