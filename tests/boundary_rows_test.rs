// ABOUTME: Tests for converting loosely typed stored rows into strict models
// ABOUTME: Covers athletes, catalog entries and performance logs with mixed value types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{TimeZone, Utc};
use pierre_prescription_engine::engine::{catalog_entries, performance_logs};
use pierre_prescription_engine::models::{
    AbilityLevel, AthleteRow, DifficultyLevel, ExerciseCatalogEntry, ExerciseRow, Gender, Lift,
    PerformanceLogEntry, PerformanceLogRow, ProgramNote, SkillLevel, TrainingBlock, Units,
};
use pierre_prescription_engine::ErrorCode;
use serde_json::json;

// === Athlete Rows ===

#[test]
fn test_reference_athlete_row() {
    common::init_test_logging();
    let profile = common::reference_athlete_row().into_profile();

    assert_eq!(
        profile.athlete_id.unwrap().to_string(),
        "6f1c2a8e-3b1d-4c5e-9a7f-0d2e4b6c8a10"
    );
    assert_eq!(profile.measurements.gender(), Gender::Male);
    assert!(common::approx_eq(profile.measurements.body_weight(), 200.0));
    assert_eq!(profile.measurements.one_rms(), &common::REFERENCE_ONE_RMS);
    assert_eq!(profile.units, Units::Imperial);
    assert_eq!(profile.equipment.len(), common::REFERENCE_EQUIPMENT.len());
    assert!(profile.has_equipment("Pull-up Bar"));
    assert_eq!(profile.skill_level("Double Unders"), SkillLevel::Advanced);
    assert_eq!(profile.skill_level("Toes to Bar"), SkillLevel::Intermediate);
    assert_eq!(profile.skill_level("Ring Dips"), SkillLevel::DontHaveIt);
    assert_eq!(profile.advanced_skill_count(), 4);
    // Stored value carried through as-is; the engine recomputes it
    assert_eq!(profile.ability, AbilityLevel::Advanced);
}

#[test]
fn test_one_rms_by_name() {
    let row: AthleteRow = serde_json::from_value(json!({
        "gender": "female",
        "body_weight": 61.5,
        "units": "Metric (kg)",
        "one_rms": {
            "Back Squat": "95 kg",
            "Snatch": 55,
            "Jerk (Only)": "70",
            "Curl": 40
        }
    }))
    .unwrap();

    let profile = row.into_profile();
    assert_eq!(profile.measurements.gender(), Gender::Female);
    assert_eq!(profile.units, Units::Metric);
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::BackSquat), 95.0));
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::Snatch), 55.0));
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::Jerk), 70.0));
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::Deadlift), 0.0));
    assert_eq!(profile.measurements.recorded_one_rm(Lift::Deadlift), None);
}

#[test]
fn test_unreadable_values_become_zero() {
    let row: AthleteRow = serde_json::from_value(json!({
        "body_weight": "unknown",
        "one_rms": ["n/a", null, true, "185lbs"],
        "equipment": ["Barbell", "", 7],
        "skills": ["Advanced", null, "Don't have it"]
    }))
    .unwrap();

    let profile = row.into_profile();
    assert!(common::approx_eq(profile.measurements.body_weight(), 0.0));
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::Snatch), 0.0));
    assert!(common::approx_eq(profile.measurements.one_rm(Lift::PowerClean), 185.0));
    assert_eq!(profile.equipment, vec!["Barbell", "7"]);
    assert_eq!(profile.skill_level("Double Unders"), SkillLevel::Advanced);
    assert_eq!(profile.skill_level("Wall Balls"), SkillLevel::DontHaveIt);
    assert_eq!(profile.skill_level("Toes to Bar"), SkillLevel::DontHaveIt);
    assert_eq!(profile.ability, AbilityLevel::Beginner);
    assert!(profile.athlete_id.is_none());
}

#[test]
fn test_empty_row_is_a_blank_male_imperial_athlete() {
    let profile = AthleteRow::default().into_profile();
    assert_eq!(profile.measurements.gender(), Gender::Male);
    assert_eq!(profile.units, Units::Imperial);
    assert!(profile.equipment.is_empty());
    assert!(profile.skills.is_empty());
}

#[test]
fn test_unknown_skill_names_are_dropped() {
    let row: AthleteRow = serde_json::from_value(json!({
        "skills": {
            "double unders": "Intermediate (20-50)",
            "Backflips": "Advanced"
        }
    }))
    .unwrap();

    let skills = row.skill_levels();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills["Double Unders"], SkillLevel::Intermediate);
}

// === Exercise Rows ===

#[test]
fn test_exercise_row_with_text_fields() {
    let row: ExerciseRow = serde_json::from_value(json!({
        "name": " Kettlebell Swing ",
        "required_equipment": "Kettlebells",
        "can_be_accessories": "yes",
        "can_be_skills": 0,
        "bodyweight_accessible": "no",
        "skill_index": "4.0",
        "difficulty_level": "beginner",
        "accessory_category": "Posterior Chain",
        "one_rm_reference": "None",
        "performance_cues": "Snap the hips, Float the bell",
        "program_notes": {
            "Intermediate": {"sets": 4, "reps": 15, "percent1RM": 40, "notes": "Russian"},
            "Beginner": "3x12"
        },
        "beginner_weight": "3",
        "default_weight": 6
    }))
    .unwrap();

    let entry = ExerciseCatalogEntry::try_from(row).unwrap();
    assert_eq!(entry.name, "Kettlebell Swing");
    assert_eq!(entry.required_equipment, vec!["Kettlebells"]);
    assert!(entry.can_be_accessories);
    assert!(!entry.can_be_skills);
    assert!(!entry.bodyweight_accessible);
    assert!(entry.usable_in(TrainingBlock::Accessories));
    assert_eq!(entry.skill_index, Some(4));
    assert_eq!(entry.difficulty_level, Some(DifficultyLevel::Beginner));
    assert_eq!(entry.accessory_category(), Some("Posterior Chain"));
    assert_eq!(entry.one_rm_reference(), None);
    assert_eq!(entry.performance_cues, vec!["Snap the hips", "Float the bell"]);
    assert_eq!(entry.beginner_weight, Some(3.0));
    assert_eq!(entry.default_weight, Some(6.0));

    match entry.program_notes.for_level("Intermediate") {
        Some(ProgramNote::Structured(note)) => {
            assert_eq!(note.sets, Some(4));
            assert_eq!(note.reps, Some(15));
            assert_eq!(note.percent_1rm, Some(40.0));
        }
        other => panic!("expected a structured note, got {other:?}"),
    }
    assert_eq!(
        entry.program_notes.for_level("Beginner"),
        Some(&ProgramNote::Text("3x12".to_owned()))
    );
}

#[test]
fn test_unreadable_program_notes_are_empty() {
    let row: ExerciseRow = serde_json::from_value(json!({
        "name": "Ring Row",
        "program_notes": "{not json"
    }))
    .unwrap();
    let entry = ExerciseCatalogEntry::try_from(row).unwrap();
    assert!(entry.program_notes.is_empty());
}

#[test]
fn test_exercise_row_without_name_is_rejected() {
    let row: ExerciseRow = serde_json::from_value(json!({"name": "   "})).unwrap();
    let error = ExerciseCatalogEntry::try_from(row).unwrap_err();
    assert_eq!(error.code, ErrorCode::MissingRequiredField);
}

#[test]
fn test_catalog_entries_skip_bad_rows() {
    let mut rows: Vec<ExerciseRow> = serde_json::from_value(common::sample_catalog_json()).unwrap();
    rows.push(ExerciseRow::default());

    let entries = catalog_entries(rows);
    assert_eq!(entries, common::sample_catalog());
}

// === Performance Log Rows ===

#[test]
fn test_log_row_with_numbers_and_text() {
    let row: PerformanceLogRow = serde_json::from_value(json!({
        "exercise_name": "Back Squat",
        "weight_time": "225 lbs",
        "sets": "5",
        "reps": 3,
        "rpe": 8.5,
        "completion_quality": "3",
        "quality_grade": "B",
        "logged_at": "2025-02-03T18:30:00Z",
        "block": "STRENGTH AND POWER"
    }))
    .unwrap();

    let entry = PerformanceLogEntry::try_from(row).unwrap();
    assert_eq!(entry.exercise_name, "Back Squat");
    assert!(common::approx_eq(entry.weight(), 225.0));
    assert_eq!(entry.set_count(), 5);
    assert_eq!(entry.rep_count(), 3);
    assert_eq!(entry.rpe, Some(8.5));
    assert_eq!(entry.completion_quality, Some(3.0));
    assert_eq!(entry.quality_grade.as_deref(), Some("B"));
    assert_eq!(
        entry.logged_at,
        Utc.with_ymd_and_hms(2025, 2, 3, 18, 30, 0).unwrap()
    );
    assert_eq!(entry.block.as_deref(), Some("STRENGTH AND POWER"));
}

#[test]
fn test_bodyweight_log_is_unweighted() {
    let row: PerformanceLogRow = serde_json::from_value(json!({
        "exercise_name": "Pull-ups",
        "weight_time": "BW",
        "logged_at": "2025-02-03"
    }))
    .unwrap();

    let entry = PerformanceLogEntry::try_from(row).unwrap();
    assert!(!entry.is_weighted());
    assert_eq!(entry.set_count(), 0);
    assert_eq!(entry.logged_at, Utc.with_ymd_and_hms(2025, 2, 3, 0, 0, 0).unwrap());
}

#[test]
fn test_unreadable_timestamp_is_invalid_format() {
    let row: PerformanceLogRow = serde_json::from_value(json!({
        "exercise_name": "Snatch",
        "logged_at": "last tuesday"
    }))
    .unwrap();
    let error = PerformanceLogEntry::try_from(row).unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidFormat);
}

#[test]
fn test_performance_logs_skip_bad_rows() {
    let rows: Vec<PerformanceLogRow> = serde_json::from_value(json!([
        {"exercise_name": "Snatch", "weight_time": 150, "logged_at": "2025-02-01"},
        {"weight_time": 150, "logged_at": "2025-02-02"},
        {"exercise_name": "Snatch", "weight_time": 155},
        {"exercise_name": "Snatch", "weight_time": 160, "logged_at": "2025-02-04T10:00:00+02:00"}
    ]))
    .unwrap();

    let logs = performance_logs(rows);
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[1].logged_at, Utc.with_ymd_and_hms(2025, 2, 4, 8, 0, 0).unwrap());
}
