//! Tests for CLI argument parsing

use super::*;
use crate::compare::Tolerance;
use crate::ingest::DuplicatePolicy;
use crate::record::TechniqueFamily;
use crate::store::RecordFilter;
use medida_common::OutputFormat;
use std::path::PathBuf;

#[test]
fn test_parse_ingest_command() {
    let cli = parse_args(["medida", "ingest", "rows.json"]).unwrap();
    match cli.command {
        Command::Ingest(args) => {
            assert_eq!(args.source.inputs, vec![PathBuf::from("rows.json")]);
            assert_eq!(args.source.policy, None);
            assert_eq!(args.format, OutputFormat::Text);
            assert!(!args.strict);
        }
        _ => panic!("Expected Ingest command"),
    }
}

#[test]
fn test_parse_ingest_with_options() {
    let cli = parse_args([
        "medida",
        "ingest",
        "spr.json",
        "icx.json",
        "--policy",
        "supersede",
        "--format",
        "json",
        "--strict",
    ])
    .unwrap();

    match cli.command {
        Command::Ingest(args) => {
            assert_eq!(args.source.inputs.len(), 2);
            assert_eq!(args.source.policy, Some(DuplicatePolicy::Supersede));
            assert_eq!(args.format, OutputFormat::Json);
            assert!(args.strict);
        }
        _ => panic!("Expected Ingest command"),
    }
}

#[test]
fn test_ingest_requires_input() {
    assert!(parse_args(["medida", "ingest"]).is_err());
}

#[test]
fn test_parse_query_command() {
    let cli = parse_args([
        "medida",
        "query",
        "rows.json",
        "--filter",
        "technique=pruning",
        "--summarize",
        "f1",
        "--tolerance",
        "1%",
    ])
    .unwrap();

    match cli.command {
        Command::Query(args) => {
            assert_eq!(args.filter.technique_family, Some(TechniqueFamily::Pruning));
            assert_eq!(args.summarize.as_deref(), Some("f1"));
            assert_eq!(args.tolerance, Some(Tolerance::Relative(0.01)));
        }
        _ => panic!("Expected Query command"),
    }
}

#[test]
fn test_query_filter_defaults_to_all() {
    let cli = parse_args(["medida", "query", "rows.json"]).unwrap();
    match cli.command {
        Command::Query(args) => assert_eq!(args.filter, RecordFilter::new()),
        _ => panic!("Expected Query command"),
    }
}

#[test]
fn test_parse_compare_command() {
    let cli = parse_args([
        "medida",
        "compare",
        "rows.json",
        "--left",
        "processor=ICX",
        "--right",
        "processor=SPR",
    ])
    .unwrap();

    match cli.command {
        Command::Compare(args) => {
            assert_ne!(args.left, args.right);
            assert_eq!(args.tolerance, None);
        }
        _ => panic!("Expected Compare command"),
    }
}

#[test]
fn test_compare_requires_both_sides() {
    assert!(parse_args(["medida", "compare", "rows.json", "--left", "processor=ICX"]).is_err());
}

#[test]
fn test_invalid_filter_is_a_parse_error() {
    assert!(parse_args(["medida", "query", "rows.json", "--filter", "colour=blue"]).is_err());
}

#[test]
fn test_global_flags() {
    let cli = parse_args(["medida", "-v", "--config", "medida.yaml", "ingest", "rows.json"]).unwrap();
    assert!(cli.verbose);
    assert!(!cli.quiet);
    assert_eq!(cli.config, Some(PathBuf::from("medida.yaml")));

    let cli = parse_args(["medida", "ingest", "rows.json", "-q"]).unwrap();
    assert!(cli.quiet);
}

#[test]
fn test_invalid_policy() {
    assert!(parse_args(["medida", "ingest", "rows.json", "--policy", "merge"]).is_err());
}
