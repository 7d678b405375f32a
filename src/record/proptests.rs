//! Property-based tests for record validation

use super::*;
use proptest::prelude::*;

fn arb_family() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("quantization"), Just("INT8"), Just("pruning"), Just("KD")]
}

fn arb_candidate() -> impl Strategy<Value = RawCandidate> {
    (
        "[A-Za-z][A-Za-z0-9-]{0,12}",
        arb_family(),
        prop_oneof![Just(""), Just("static"), Just("dynamic")],
        1.0f64..100.0, // baseline accuracy (%)
        1.0f64..100.0, // optimized accuracy (%)
        1.0f64..5000.0, // baseline throughput
        1.0f64..5000.0, // optimized throughput
        proptest::option::of(-50.0f64..50.0), // reported accuracy delta
    )
        .prop_map(|(subject, family, variant, b_acc, o_acc, b_tp, o_tp, reported)| {
            let mut raw = RawCandidate::new()
                .subject(&subject)
                .technique(family)
                .variant(variant)
                .baseline("Accuracy", format!("{b_acc}%"))
                .optimized("Accuracy", format!("{o_acc}%"))
                .baseline("throughput", b_tp)
                .optimized("throughput", o_tp);
            if let Some(delta) = reported {
                raw = raw.reported("accuracy", format!("{delta}%"));
            }
            raw
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_percent_inputs_become_fractions(raw in arb_candidate()) {
        let record = validate(&raw).unwrap();
        let (b, o) = record.metric_pair("accuracy").unwrap();
        prop_assert!((0.0..=1.0).contains(&b));
        prop_assert!((0.0..=1.0).contains(&o));
    }

    #[test]
    fn prop_all_values_finite(raw in arb_candidate()) {
        let record = validate(&raw).unwrap();
        let values = record
            .baseline_metric()
            .values()
            .chain(record.optimized_metric().values())
            .chain(record.reported().values());
        for value in values {
            prop_assert!(value.is_finite());
        }
    }

    #[test]
    fn prop_revalidation_is_identity(raw in arb_candidate()) {
        let record = validate(&raw).unwrap();
        let again = validate(&RawCandidate::from(&record)).unwrap();
        prop_assert_eq!(again, record);
    }

    #[test]
    fn prop_blank_subject_rejected(raw in arb_candidate(), blank in "[ \t]{0,4}") {
        let mut raw = raw;
        raw.subject = Some(blank);
        prop_assert_eq!(validate(&raw), Err(ValidationError::MissingField("subject")));
    }
}
