// ABOUTME: Tests for intelligence configuration and parameter validation
// ABOUTME: Validates defaults, environment overrides and rejection of inconsistent thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]
//! Tests for the intelligence configuration system

use std::env;
use std::ptr;

use pierre_prescription_engine::intelligence::config::intelligence::{
    ConfigError, IntelligenceConfig, LevelBand,
};
use pierre_prescription_engine::{AppError, ErrorCode};
use serial_test::serial;

const OVERRIDE_VARS: [&str; 12] = [
    "PRESCRIPTION_LEG_STRENGTH_RATIO",
    "PRESCRIPTION_TECHNICAL_CAP",
    "PRESCRIPTION_MAX_WEEKLY_FREQUENCY",
    "PRESCRIPTION_DEFAULT_SELECTION_WEIGHT",
    "PRESCRIPTION_IMPERIAL_INCREMENT",
    "PRESCRIPTION_METRIC_INCREMENT",
    "PRESCRIPTION_DELOAD_MULTIPLIER",
    "PRESCRIPTION_PLATEAU_MIN_LOGS",
    "PRESCRIPTION_PLATEAU_MIN_SIGNALS",
    "PRESCRIPTION_PLATEAU_SEVERITY_THRESHOLD",
    "PRESCRIPTION_PLATEAU_WINDOW_DAYS",
    "PRESCRIPTION_INTERVENTION_WEEKS",
];

fn clear_overrides() {
    for var in OVERRIDE_VARS {
        env::remove_var(var);
    }
}

// === Defaults ===

#[test]
fn test_default_config_values() {
    let config = IntelligenceConfig::default();
    assert!(config.validate().is_ok());

    assert_eq!(config.assignment.max_weekly_frequency, 2);
    assert_eq!(config.assignment.default_selection_weight, 5.0);
    assert_eq!(config.assignment.imperial_increment, 5.0);
    assert_eq!(config.assignment.metric_increment, 2.5);
    assert_eq!(config.assignment.deload_volume_multiplier, 0.6);
    assert_eq!(config.assignment.max_note_length, 100);

    assert_eq!(config.plateau.min_logs, 6);
    assert_eq!(config.plateau.min_signals, 2);
    assert_eq!(config.plateau.severity_threshold, 0.4);
    assert_eq!(config.plateau.analysis_window_days, 56);
    assert_eq!(config.plateau.intervention_duration_weeks, 2);

    assert_eq!(config.ability.advanced_skills_for_advanced, 8);
    assert_eq!(config.ability.advanced_skills_for_intermediate, 4);
    assert_eq!(config.ability.intermediate_skills_for_intermediate, 10);
}

#[test]
fn test_global_config_singleton() {
    let config1 = IntelligenceConfig::global();
    let config2 = IntelligenceConfig::global();
    assert!(ptr::eq(config1, config2));
}

#[test]
fn test_config_round_trips_through_json() {
    let config = IntelligenceConfig::default();
    let text = serde_json::to_string(&config).unwrap();
    let parsed: IntelligenceConfig = serde_json::from_str(&text).unwrap();
    assert!(parsed.validate().is_ok());
    assert_eq!(parsed.plateau.min_logs, config.plateau.min_logs);
    assert_eq!(parsed.intervention, config.intervention);
}

// === Environment Overrides ===

#[test]
#[serial]
fn test_load_without_overrides_uses_defaults() {
    clear_overrides();
    let config = IntelligenceConfig::load().unwrap();
    assert_eq!(config.plateau.min_logs, 6);
    assert_eq!(config.assignment.max_weekly_frequency, 2);
}

#[test]
#[serial]
fn test_environment_variable_overrides() {
    clear_overrides();
    env::set_var("PRESCRIPTION_MAX_WEEKLY_FREQUENCY", "3");
    env::set_var("PRESCRIPTION_METRIC_INCREMENT", " 1.25 ");
    env::set_var("PRESCRIPTION_PLATEAU_MIN_SIGNALS", "3");
    env::set_var("PRESCRIPTION_PLATEAU_WINDOW_DAYS", "28");
    env::set_var("PRESCRIPTION_INTERVENTION_WEEKS", "3");

    let config = IntelligenceConfig::load();
    clear_overrides();
    let config = config.unwrap();

    assert_eq!(config.assignment.max_weekly_frequency, 3);
    assert_eq!(config.assignment.metric_increment, 1.25);
    assert_eq!(config.plateau.min_signals, 3);
    assert_eq!(config.plateau.analysis_window_days, 28);
    assert_eq!(config.plateau.intervention_duration_weeks, 3);
}

#[test]
#[serial]
fn test_unparseable_override_is_a_parse_error() {
    clear_overrides();
    env::set_var("PRESCRIPTION_PLATEAU_MIN_LOGS", "six");

    let result = IntelligenceConfig::load();
    clear_overrides();

    match result {
        Err(ConfigError::Parse(message)) => {
            assert!(message.contains("PRESCRIPTION_PLATEAU_MIN_LOGS"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_override_that_breaks_validation_is_rejected() {
    clear_overrides();
    env::set_var("PRESCRIPTION_PLATEAU_SEVERITY_THRESHOLD", "1.5");

    let result = IntelligenceConfig::load();
    clear_overrides();

    assert!(matches!(result, Err(ConfigError::ValueOutOfRange(_))));
}

// === Validation ===

#[test]
fn test_inverted_level_band_rejected() {
    let mut config = IntelligenceConfig::default();
    config.ratios.standards.female_press = LevelBand::new(1.2, 0.8);
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_plateau_bounds_rejected() {
    let mut config = IntelligenceConfig::default();
    config.plateau.min_signals = 5;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = IntelligenceConfig::default();
    config.plateau.analysis_window_days = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = IntelligenceConfig::default();
    config.plateau.max_window = 2;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    for too_few in [0, 1] {
        let mut config = IntelligenceConfig::default();
        config.plateau.min_weighted_for_stagnation = too_few;
        assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));
    }

    let mut config = IntelligenceConfig::default();
    config.plateau.min_weighted_per_window = 0;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
fn test_assignment_bounds_rejected() {
    let mut config = IntelligenceConfig::default();
    config.assignment.imperial_increment = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::ValueOutOfRange(_))));

    let mut config = IntelligenceConfig::default();
    config.assignment.default_selection_weight = -1.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));
}

#[test]
fn test_intervention_bounds_rejected() {
    let mut config = IntelligenceConfig::default();
    config.intervention.volume_progression.intensity_min = 0.9;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));

    let mut config = IntelligenceConfig::default();
    config.intervention.tempo_work.volume_modifier = 0.0;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidWeights(_))));
}

#[test]
fn test_ability_thresholds_must_be_ordered() {
    let mut config = IntelligenceConfig::default();
    config.ability.advanced_skills_for_intermediate = 8;
    assert!(matches!(config.validate(), Err(ConfigError::InvalidRange(_))));
}

#[test]
fn test_config_errors_map_to_app_error_codes() {
    let invalid: AppError = ConfigError::InvalidRange("bad band").into();
    assert_eq!(invalid.code, ErrorCode::ConfigInvalid);
    assert!(invalid.message.contains("bad band"));

    let parse: AppError = ConfigError::Parse("Invalid PRESCRIPTION_TECHNICAL_CAP".to_owned()).into();
    assert_eq!(parse.code, ErrorCode::ConfigError);

    let missing: AppError = ConfigError::MissingField("ratios").into();
    assert_eq!(missing.code, ErrorCode::ConfigMissing);
}
