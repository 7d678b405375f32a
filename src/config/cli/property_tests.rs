//! Property-based tests for CLI argument parsing

use super::*;
use proptest::prelude::*;

fn input_path_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,20}\\.json"
}

fn subject_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9._-]{0,20}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_ingest_command_parses(input in input_path_strategy()) {
        let cli = parse_args(["medida", "ingest", &input]).unwrap();
        match cli.command {
            Command::Ingest(args) => {
                prop_assert_eq!(args.source.inputs[0].to_str().unwrap(), &input);
            }
            _ => prop_assert!(false, "Expected Ingest command"),
        }
    }

    #[test]
    fn prop_subject_filter_roundtrips(input in input_path_strategy(), subject in subject_strategy()) {
        let expr = format!("subject={subject}");
        let cli = parse_args(["medida", "query", &input, "--filter", &expr]).unwrap();
        match cli.command {
            Command::Query(args) => {
                prop_assert_eq!(args.filter.subject.as_deref(), Some(subject.as_str()));
            }
            _ => prop_assert!(false, "Expected Query command"),
        }
    }

    #[test]
    fn prop_relative_tolerance_parses(percent in 0u32..100) {
        let tolerance = format!("{percent}%");
        let result = parse_args([
            "medida", "compare", "rows.json",
            "--left", "processor=ICX", "--right", "processor=SPR",
            "--tolerance", &tolerance,
        ]);
        prop_assert!(result.is_ok());
    }
}
