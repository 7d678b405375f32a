//! Property-based tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;
use proptest::prelude::*;

fn arb_valid_config() -> impl Strategy<Value = EngineConfig> {
    (
        0.01f64..0.99,  // scale_tolerance
        0.0f64..0.01,   // reported_abs_tolerance
        0.0f64..0.1,    // reported_rel_tolerance
    )
        .prop_map(|(scale, abs, rel)| EngineConfig {
            validation: ValidationSettings {
                scale_tolerance: scale,
                reported_abs_tolerance: abs,
                reported_rel_tolerance: rel,
            },
            ..EngineConfig::default()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        prop_assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn prop_scale_tolerance_out_of_range_fails(config in arb_valid_config(), bad in 1.0f64..100.0) {
        let mut config = config;
        config.validation.scale_tolerance = bad;
        prop_assert!(matches!(
            validate_config(&config),
            Err(ValidationError::InvalidScaleTolerance(_))
        ));
    }

    #[test]
    fn prop_negative_reported_tolerance_fails(config in arb_valid_config(), bad in -10.0f64..-1e-9) {
        let mut config = config;
        config.validation.reported_abs_tolerance = bad;
        let is_reported_error = matches!(
            validate_config(&config),
            Err(ValidationError::InvalidReportedTolerance { .. })
        );
        prop_assert!(is_reported_error);
    }

    #[test]
    fn prop_yaml_roundtrip_preserves_config(config in arb_valid_config()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
