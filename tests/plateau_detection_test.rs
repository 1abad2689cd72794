// ABOUTME: Integration tests for plateau detection across synthetic training histories
// ABOUTME: Covers each signal, severity gating, insufficient data and athlete-level windows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod common;
mod helpers;

use chrono::Duration;
use helpers::synthetic_data::{LogPattern, SyntheticLogBuilder, PATTERN_SESSIONS};
use pierre_prescription_engine::intelligence::config::intelligence::{
    InterventionConfig, PlateauConfig,
};
use pierre_prescription_engine::intelligence::plateau_detection::{
    OverallPlateauStatus, PlateauStatus,
};
use pierre_prescription_engine::intelligence::{
    InterventionProtocol, InterventionSelector, PlateauDetector,
};
use pierre_prescription_engine::models::PerformanceLogEntry;

fn detector_with(config: PlateauConfig) -> PlateauDetector {
    common::init_test_logging();
    PlateauDetector::new(config, InterventionSelector::new(InterventionConfig::default()))
}

fn detector() -> PlateauDetector {
    detector_with(PlateauConfig::default())
}

fn pattern(exercise: &str, pattern: LogPattern) -> Vec<PerformanceLogEntry> {
    SyntheticLogBuilder::new(42).generate_pattern(exercise, pattern)
}

// === Single Exercise Signals ===

#[test]
fn test_progressing_lifter_has_no_signals() {
    let analysis = detector().analyze("Back Squat", &pattern("Back Squat", LogPattern::Progressing));

    assert_eq!(analysis.status, PlateauStatus::Analyzed);
    assert_eq!(analysis.signal_count, 0);
    assert_eq!(analysis.severity, 0.0);
    assert!(!analysis.intervention_needed);
    assert_eq!(analysis.log_count, PATTERN_SESSIONS);
    assert!(analysis.evidence.progress_stagnation.starts_with("Weight progressing normally"));
}

#[test]
fn test_rpe_inflation_at_flat_load() {
    let analysis = detector().analyze("Back Squat", &pattern("Back Squat", LogPattern::RpeInflation));

    assert!(analysis.signals.rpe_inflation);
    assert!(analysis.signals.progress_stagnation);
    assert!(!analysis.signals.quality_degradation);
    assert!(!analysis.signals.volume_intolerance);
    assert_eq!(analysis.signal_count, 2);
    assert_eq!(analysis.severity, 0.5);
    assert!(analysis.intervention_needed);
    assert_eq!(
        analysis.recommended_protocol,
        Some(InterventionProtocol::IntensityReduction)
    );
    assert_eq!(analysis.estimated_duration_weeks, 2);
    assert!(analysis.evidence.rpe_inflation.contains("1.8"));
}

#[test]
fn test_overreaching_prefers_tempo_work() {
    let analysis = detector().analyze("Clean", &pattern("Clean", LogPattern::Overreaching));

    assert!(analysis.signals.quality_degradation);
    assert!(analysis.signals.volume_intolerance);
    assert!(!analysis.signals.rpe_inflation);
    assert!(!analysis.signals.progress_stagnation);
    assert!(analysis.intervention_needed);
    assert_eq!(analysis.recommended_protocol, Some(InterventionProtocol::TempoWork));
    assert!(analysis.evidence.volume_intolerance.contains("30.0%"));
}

#[test]
fn test_bodyweight_work_uses_rpe_thresholds() {
    let analysis = detector().analyze("Pull-ups", &pattern("Pull-ups", LogPattern::BodyweightStall));

    assert!(analysis.signals.rpe_inflation);
    assert!(analysis.signals.progress_stagnation);
    assert_eq!(analysis.signal_count, 2);
    assert_eq!(
        analysis.recommended_protocol,
        Some(InterventionProtocol::IntensityReduction)
    );
    assert!(analysis
        .evidence
        .rpe_inflation
        .contains("same bodyweight work"));
}

#[test]
fn test_single_signal_does_not_trigger_intervention() {
    let mut logs = pattern("Back Squat", LogPattern::RpeInflation);
    for entry in &mut logs {
        entry.rpe = Some(7.0);
    }

    let analysis = detector().analyze("Back Squat", &logs);
    assert_eq!(analysis.signal_count, 1);
    assert!(analysis.signals.progress_stagnation);
    assert_eq!(analysis.severity, 0.25);
    assert!(!analysis.intervention_needed);
    assert_eq!(analysis.recommended_protocol, Some(InterventionProtocol::TempoWork));
    assert!(detector().selector().constraints_for(&analysis).is_none());
}

#[test]
fn test_missing_rpe_and_quality_use_defaults() {
    let mut logs = pattern("Back Squat", LogPattern::Progressing);
    for entry in &mut logs {
        entry.rpe = None;
        entry.completion_quality = None;
        entry.quality_grade = Some("B".to_owned());
    }

    let analysis = detector().analyze("Back Squat", &logs);
    assert_eq!(analysis.signal_count, 0);
}

#[test]
fn test_letter_grades_drive_quality_signal() {
    let mut logs = pattern("Back Squat", LogPattern::Progressing);
    for (i, entry) in logs.iter_mut().enumerate() {
        entry.completion_quality = None;
        entry.quality_grade = Some(if i < 6 { "A" } else { "c" }.to_owned());
    }

    let analysis = detector().analyze("Back Squat", &logs);
    assert!(analysis.signals.quality_degradation);
    assert!(analysis.evidence.quality_degradation.contains("2.0"));
}

// === Data Requirements ===

#[test]
fn test_too_few_logs_reports_insufficient_data() {
    let logs: Vec<_> = pattern("Snatch", LogPattern::RpeInflation)
        .into_iter()
        .take(5)
        .collect();

    let analysis = detector().analyze("Snatch", &logs);
    assert_eq!(analysis.status, PlateauStatus::InsufficientData);
    assert_eq!(analysis.signal_count, 0);
    assert!(!analysis.intervention_needed);
    assert_eq!(analysis.recommended_protocol, None);
    assert_eq!(analysis.log_count, 5);
    assert!(analysis.evidence.rpe_inflation.contains("Insufficient data"));
}

#[test]
fn test_minimum_logs_are_analyzed() {
    let logs: Vec<_> = pattern("Snatch", LogPattern::RpeInflation)
        .into_iter()
        .take(6)
        .collect();

    let analysis = detector().analyze("Snatch", &logs);
    assert_eq!(analysis.status, PlateauStatus::Analyzed);
    assert_eq!(analysis.log_count, 6);
}

#[test]
fn test_log_order_does_not_matter() {
    let mut builder = SyntheticLogBuilder::new(7);
    let ordered = builder.generate_pattern("Front Squat", LogPattern::Overreaching);
    let mut shuffled = ordered.clone();
    builder.shuffle(&mut shuffled);

    assert_eq!(
        detector().analyze("Front Squat", &ordered),
        detector().analyze("Front Squat", &shuffled)
    );
}

#[test]
fn test_stricter_thresholds_need_more_signals() {
    let config = PlateauConfig {
        min_signals: 3,
        ..PlateauConfig::default()
    };
    let analysis =
        detector_with(config).analyze("Back Squat", &pattern("Back Squat", LogPattern::RpeInflation));
    assert_eq!(analysis.signal_count, 2);
    assert!(!analysis.intervention_needed);
}

// === Athlete Reports ===

#[test]
fn test_athlete_report_collects_interventions() {
    let mut builder = SyntheticLogBuilder::new(11);
    let mut logs = builder.generate_pattern("Back Squat", LogPattern::RpeInflation);
    logs.extend(builder.generate_pattern("Deadlift", LogPattern::Progressing));
    logs.extend(builder.generate_pattern("Clean", LogPattern::Overreaching));
    builder.shuffle(&mut logs);

    let report = detector().analyze_athlete(&logs, builder.last_session());

    assert_eq!(report.overall_status, OverallPlateauStatus::InterventionsActive);
    assert_eq!(report.analysis_window_days, 56);
    assert_eq!(report.exercise_analysis.len(), 3);
    assert_eq!(
        report.interventions_needed.keys().collect::<Vec<_>>(),
        vec!["Back Squat", "Clean"]
    );

    let squat = &report.interventions_needed["Back Squat"];
    assert_eq!(squat.protocol, InterventionProtocol::IntensityReduction);
    assert_eq!(squat.duration_weeks, 2);
    assert_eq!(squat.constraints.focus_area, "strength_base");

    let overrides = report.constraint_overrides();
    assert_eq!(overrides.len(), 2);
    assert_eq!(overrides["Clean"].protocol, InterventionProtocol::TempoWork);
}

#[test]
fn test_athlete_report_respects_window_end() {
    let mut builder = SyntheticLogBuilder::new(3);
    let logs = builder.generate_pattern("Back Squat", LogPattern::RpeInflation);

    let early = detector().analyze_athlete(&logs, builder.last_session() - Duration::days(18));
    let analysis = &early.exercise_analysis["Back Squat"];
    assert_eq!(analysis.log_count, 6);
    assert_eq!(analysis.status, PlateauStatus::Analyzed);
    assert_eq!(early.overall_status, OverallPlateauStatus::NormalProgression);
}

#[test]
fn test_stale_logs_fall_outside_the_window() {
    let mut builder = SyntheticLogBuilder::new(5);
    let logs = builder.generate_pattern("Back Squat", LogPattern::RpeInflation);

    let report = detector().analyze_athlete(&logs, builder.last_session() + Duration::days(60));
    assert!(report.exercise_analysis.is_empty());
    assert!(report.interventions_needed.is_empty());
    assert_eq!(report.overall_status, OverallPlateauStatus::NormalProgression);
}

#[test]
fn test_shorter_window_drops_older_sessions() {
    let config = PlateauConfig {
        analysis_window_days: 20,
        ..PlateauConfig::default()
    };
    let mut builder = SyntheticLogBuilder::new(9);
    let logs = builder.generate_pattern("Back Squat", LogPattern::RpeInflation);

    let report = detector_with(config).analyze_athlete(&logs, builder.last_session());
    let analysis = &report.exercise_analysis["Back Squat"];
    assert_eq!(analysis.log_count, 7);
    assert_eq!(report.analysis_window_days, 20);
}

#[test]
fn test_report_serializes_screaming_statuses() {
    let mut builder = SyntheticLogBuilder::new(1);
    let logs = builder.generate_pattern("Back Squat", LogPattern::RpeInflation);
    let report = detector().analyze_athlete(&logs, builder.last_session());

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["overall_status"], "INTERVENTIONS_ACTIVE");
    assert_eq!(
        value["interventions_needed"]["Back Squat"]["protocol"],
        "INTENSITY_REDUCTION"
    );
    assert_eq!(value["exercise_analysis"]["Back Squat"]["status"], "ANALYZED");
}
