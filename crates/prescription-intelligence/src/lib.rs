// ABOUTME: Training prescription intelligence: ratios, periodization, assignment and plateau detection
// ABOUTME: Pure engines over explicit inputs, configured through a validated global threshold table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Prescription Intelligence
//!
//! The algorithmic core of the Pierre prescription engine. Every engine is a
//! pure function of its inputs; shared state is limited to the immutable
//! periodization table and the global [`config::IntelligenceConfig`].
//!
//! ## Modules
//!
//! - **`ratio_engine`**: Strength ratios, weakness flags, technical focus and lift levels
//! - **ability**: Overall ability from recorded gymnastics skills
//! - **periodization**: Versioned week-by-week percentage schemes
//! - **`exercise_assignment`**: Catalog filtering, weighted selection and prescription
//! - **`plateau_detection`**: Four plateau signals and severity per exercise
//! - **intervention**: Protocol selection and constraint bundles
//! - **config**: Thresholds, validation and environment overrides

/// Intelligence configuration (thresholds, env overrides, validation)
pub mod config;

/// Strength ratio analysis
pub mod ratio_engine;

/// Overall ability classification
pub mod ability;

/// Periodization table and cyclic week lookup
pub mod periodization;

/// Exercise selection and prescription per training block
pub mod exercise_assignment;

/// Plateau detection over performance logs
pub mod plateau_detection;

/// Intervention protocols for detected plateaus
pub mod intervention;

pub use ability::{AbilityAssessment, AbilityClassifier};
pub use config::IntelligenceConfig;
pub use exercise_assignment::{AssignmentRequest, ExerciseAssignmentEngine};
pub use intervention::{InterventionConstraints, InterventionProtocol, InterventionSelector};
pub use periodization::{PeriodizationTable, ProgressionEntry};
pub use plateau_detection::{
    ActiveIntervention, AthletePlateauReport, OverallPlateauStatus, PlateauAnalysis,
    PlateauDetector, PlateauEvidence, PlateauSignals, PlateauStatus,
};
pub use ratio_engine::{RatioEngine, RatioKey, RatioSet};
