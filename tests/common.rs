// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup, a reference athlete and a small exercise catalog
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::too_many_lines,
    clippy::unwrap_used
)]
//! Shared test fixtures for `pierre_prescription_engine`
//!
//! The reference athlete is a 200 lb male intermediate lifter whose deadlift
//! outpaces his squat, so leg strength is flagged. Every fixture is built in
//! code so tests can tweak single fields.

use std::collections::BTreeMap;
use std::env;
use std::sync::Once;

use pierre_prescription_engine::models::{
    AbilityLevel, AthleteMeasurements, AthleteProfile, AthleteRow, DifficultyLevel,
    ExerciseCatalogEntry, Gender, Lift, ProgramNote, ProgramNotes, SkillLevel, Units,
};
use serde_json::{json, Value};
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// One-rep maxes of the reference athlete, in storage order
pub const REFERENCE_ONE_RMS: [f64; 14] = [
    200.0, // Snatch
    170.0, // Power Snatch
    250.0, // Clean and Jerk
    220.0, // Power Clean
    260.0, // Clean (Only)
    250.0, // Jerk (Only)
    300.0, // Back Squat
    260.0, // Front Squat
    210.0, // Overhead Squat
    350.0, // Deadlift
    200.0, // Bench Press
    200.0, // Push Press
    140.0, // Strict Press
    80.0,  // Weighted Pullup
];

/// Equipment owned by the reference athlete
pub const REFERENCE_EQUIPMENT: [&str; 6] = [
    "Barbell",
    "Squat Rack",
    "Bench",
    "Pull-up Bar",
    "Jump Rope",
    "Plyo Box",
];

pub fn reference_measurements() -> AthleteMeasurements {
    AthleteMeasurements::new(Gender::Male, 200.0, REFERENCE_ONE_RMS)
}

/// Four Advanced skills: Intermediate overall
pub fn reference_skills() -> BTreeMap<String, SkillLevel> {
    [
        ("Double Unders", SkillLevel::Advanced),
        ("Wall Balls", SkillLevel::Advanced),
        ("Push-ups", SkillLevel::Advanced),
        ("Pull-ups (kipping or butterfly)", SkillLevel::Advanced),
        ("Toes to Bar", SkillLevel::Intermediate),
    ]
    .into_iter()
    .map(|(name, level)| (name.to_owned(), level))
    .collect()
}

pub fn reference_profile() -> AthleteProfile {
    let mut profile = AthleteProfile::new(reference_measurements(), Units::Imperial);
    profile.equipment = REFERENCE_EQUIPMENT.iter().map(|item| (*item).to_owned()).collect();
    profile.skills = reference_skills();
    profile.ability = AbilityLevel::Intermediate;
    profile
}

/// The reference athlete as the data layer stores it
pub fn reference_athlete_json() -> Value {
    json!({
        "id": "6f1c2a8e-3b1d-4c5e-9a7f-0d2e4b6c8a10",
        "gender": "Male",
        "body_weight": "200 lbs",
        "units": null,
        "one_rms": REFERENCE_ONE_RMS.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
        "equipment": REFERENCE_EQUIPMENT.join(", "),
        "skills": {
            "Double Unders": "Advanced (more than 50)",
            "Wall Balls": "Advanced",
            "Push-ups": "Advanced",
            "Pull-ups (kipping or butterfly)": "Advanced",
            "Toes to Bar": "Intermediate (5-10)"
        },
        "ability_level": "Advanced"
    })
}

pub fn reference_athlete_row() -> AthleteRow {
    serde_json::from_value(reference_athlete_json()).unwrap()
}

/// Program notes from (level, compact text) pairs
pub fn notes(pairs: &[(&str, &str)]) -> ProgramNotes {
    ProgramNotes(
        pairs
            .iter()
            .map(|(level, text)| ((*level).to_owned(), ProgramNote::Text((*text).to_owned())))
            .collect(),
    )
}

fn strength(name: &str, lift_group: &str, one_rm_reference: &str) -> ExerciseCatalogEntry {
    ExerciseCatalogEntry {
        can_be_strength: true,
        lift_groups: vec![lift_group.to_owned()],
        one_rm_reference: Some(one_rm_reference.to_owned()),
        ..ExerciseCatalogEntry::named(name)
    }
}

fn technical(name: &str, dependency: &str, note: &str) -> ExerciseCatalogEntry {
    ExerciseCatalogEntry {
        can_be_technical: true,
        required_equipment: vec!["Barbell".to_owned()],
        technical_dependency: vec![dependency.to_owned()],
        program_notes: notes(&[("Intermediate", note), ("Beginner", note)]),
        ..ExerciseCatalogEntry::named(name)
    }
}

fn skill(
    name: &str,
    skill_index: i32,
    difficulty: DifficultyLevel,
    program_notes: ProgramNotes,
) -> ExerciseCatalogEntry {
    ExerciseCatalogEntry {
        can_be_skills: true,
        skill_index: Some(skill_index),
        difficulty_level: Some(difficulty),
        program_notes,
        ..ExerciseCatalogEntry::named(name)
    }
}

fn accessory(
    name: &str,
    category: &str,
    difficulty: DifficultyLevel,
    equipment: &[&str],
    note: &str,
) -> ExerciseCatalogEntry {
    ExerciseCatalogEntry {
        can_be_accessories: true,
        accessory_category: Some(category.to_owned()),
        difficulty_level: Some(difficulty),
        required_equipment: equipment.iter().map(|item| (*item).to_owned()).collect(),
        program_notes: notes(&[("Intermediate", note)]),
        ..ExerciseCatalogEntry::named(name)
    }
}

/// Small catalog covering every selectable block
pub fn sample_catalog() -> Vec<ExerciseCatalogEntry> {
    let mut plank = accessory(
        "Plank Hold",
        "Core",
        DifficultyLevel::Beginner,
        &[],
        "3x45s",
    );
    plank.bodyweight_accessible = true;

    let mut snatch_pull = technical("Snatch Pull", "Snatch", "4x3,90%");
    snatch_pull.one_rm_reference = Some("Snatch".to_owned());

    let mut romanian = accessory(
        "Romanian Deadlift",
        "Posterior Chain",
        DifficultyLevel::Beginner,
        &["Barbell"],
        "3x8,25%",
    );
    romanian.one_rm_reference = Some("Deadlift".to_owned());

    vec![
        strength("Back Squat", "Back Squat", "Back Squat"),
        strength("Pause Back Squat", "Back Squat", "Back Squat"),
        technical("Snatch Balance", "Snatch", "3x3"),
        snatch_pull,
        skill(
            "Toes to Bar",
            2,
            DifficultyLevel::Beginner,
            notes(&[("Beginner", "3x8"), ("Intermediate", "4x10")]),
        ),
        skill(
            "Double Unders",
            0,
            DifficultyLevel::Intermediate,
            notes(&[("Intermediate", "4x30s"), ("Advanced", "5x60s")]),
        ),
        skill(
            "Strict Handstand Push-ups",
            9,
            DifficultyLevel::Advanced,
            notes(&[("Advanced", "5x5")]),
        ),
        accessory(
            "Barbell Row",
            "Upper Back",
            DifficultyLevel::Beginner,
            &[],
            "3x10",
        ),
        plank,
        accessory(
            "Bulgarian Split Squat",
            "Leg Strength",
            DifficultyLevel::Intermediate,
            &["Dumbbells"],
            "3x8",
        ),
        romanian,
    ]
}

/// The sample catalog as loosely typed stored rows
pub fn sample_catalog_json() -> Value {
    serde_json::to_value(sample_catalog()).unwrap()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Assert a load string equals a whole number of pounds
pub fn assert_load(weight_time: &str, expected: u32) {
    assert_eq!(
        weight_time,
        expected.to_string(),
        "expected a load of {expected}, got '{weight_time}'"
    );
}

/// Measurements with only the listed lifts recorded
pub fn measurements_with(
    gender: Gender,
    body_weight: f64,
    lifts: &[(Lift, f64)],
) -> AthleteMeasurements {
    lifts
        .iter()
        .fold(AthleteMeasurements::empty(gender, body_weight), |acc, (lift, value)| {
            acc.with_lift(*lift, *value)
        })
}
