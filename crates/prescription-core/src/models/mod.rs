// ABOUTME: Core data models for the prescription engine
// ABOUTME: Re-exports athlete, performance log, exercise catalog and boundary row types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Athlete measurements, lifts, skills and profile
pub mod athlete;

/// Exercise catalog rows, training blocks and prescriptions
pub mod exercise;

/// Performance log entries
pub mod performance;

/// Loosely typed rows from the data store and their strict conversions
pub mod rows;

pub use athlete::{
    AbilityLevel, AthleteMeasurements, AthleteProfile, Gender, Lift, LiftCategory, MainLift,
    SkillLevel, Units,
};
pub use exercise::{
    DifficultyLevel, ExerciseCatalogEntry, ExercisePrescription, ProgramNote, ProgramNotes,
    StructuredNote, TrainingBlock,
};
pub use performance::PerformanceLogEntry;
pub use rows::{AthleteRow, ExerciseRow, PerformanceLogRow};
