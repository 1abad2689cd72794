// ABOUTME: Prescription engine facade composing ratio, ability, assignment and plateau engines
// ABOUTME: Converts boundary rows into strict models and fans batch work out with rayon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Prescription Engine
//!
//! [`PrescriptionEngine`] is the single entry point callers use. It owns the
//! periodization table behind an `Arc` and one instance of every engine, and
//! takes loosely typed rows from the data layer so that callers never build
//! strict models by hand.
//!
//! Prescribing a block with recent performance logs attached runs plateau
//! detection first and applies the resulting intervention overrides to the
//! assignment.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use prescription_core::errors::AppResult;
use prescription_core::models::{
    AbilityLevel, AthleteMeasurements, AthleteProfile, AthleteRow, ExerciseCatalogEntry,
    ExercisePrescription, ExerciseRow, PerformanceLogEntry, PerformanceLogRow, TrainingBlock,
    Units,
};
use prescription_intelligence::config::intelligence::PlateauConfig;
use prescription_intelligence::config::IntelligenceConfig;
use prescription_intelligence::{
    AbilityAssessment, AbilityClassifier, AssignmentRequest, AthletePlateauReport,
    ExerciseAssignmentEngine, InterventionSelector, PeriodizationTable, PlateauDetector,
    RatioEngine, RatioSet,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::EngineEnvironment;
use crate::logging::EngineLogger;

/// Athlete label used in logs when a row carries no id
const ANONYMOUS_ATHLETE: &str = "anonymous";

/// Profile, ability and ratios computed from one athlete row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteAssessment {
    /// Strict profile with recomputed ability
    pub profile: AthleteProfile,
    /// Skill counts behind the ability level
    pub ability: AbilityAssessment,
    /// Strength ratios and derived flags
    pub ratios: RatioSet,
}

/// One block to prescribe, with everything it depends on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionRequest {
    /// Athlete as stored
    pub athlete: AthleteRow,
    /// Exercise catalog as stored
    #[serde(default)]
    pub catalog: Vec<ExerciseRow>,
    /// Block, day and weekly history
    pub assignment: AssignmentRequest,
    /// Recent performance logs; when present, plateau interventions apply
    #[serde(default)]
    pub logs: Vec<PerformanceLogRow>,
    /// End of the plateau analysis window; defaults to now
    #[serde(default)]
    pub as_of: Option<DateTime<Utc>>,
}

/// Prescribed block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrescriptionResponse {
    /// Block that was filled
    pub block: TrainingBlock,
    /// Program week requested
    pub week: u32,
    /// Whether deload volume applied
    pub is_deload: bool,
    /// Overall ability used for selection
    pub ability: AbilityLevel,
    /// Periodization table version
    pub table_version: String,
    /// Prescribed rows in order
    pub exercises: Vec<ExercisePrescription>,
    /// Exercises whose prescription was overridden by an intervention
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interventions_applied: Vec<String>,
}

/// Facade over every prescription engine
#[derive(Debug, Clone)]
pub struct PrescriptionEngine {
    table: Arc<PeriodizationTable>,
    ratio_engine: RatioEngine,
    classifier: AbilityClassifier,
    assignment: ExerciseAssignmentEngine,
    detector: PlateauDetector,
    default_units: Units,
}

impl PrescriptionEngine {
    /// Engine over a table, with thresholds from the global configuration
    #[must_use]
    pub fn new(table: Arc<PeriodizationTable>) -> Self {
        Self {
            table,
            ratio_engine: RatioEngine::default(),
            classifier: AbilityClassifier::default(),
            assignment: ExerciseAssignmentEngine::default(),
            detector: PlateauDetector::default(),
            default_units: Units::default(),
        }
    }

    /// Engine over the embedded periodization table
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded table fails validation
    pub fn with_embedded_table() -> AppResult<Self> {
        let table = PeriodizationTable::embedded()?;
        Ok(Self::new(Arc::new(table.clone())))
    }

    /// Engine configured from deployment settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configured table cannot be loaded or validated
    pub fn from_environment(environment: &EngineEnvironment) -> AppResult<Self> {
        let table = match environment.periodization_table.as_deref() {
            Some(path) => PeriodizationTable::from_path(path)?,
            None => PeriodizationTable::embedded()?.clone(),
        };

        let mut engine = Self::new(Arc::new(table));
        engine.default_units = environment.default_units;

        if let Some(days) = environment.analysis_window_days {
            let config = IntelligenceConfig::global();
            let plateau = PlateauConfig {
                analysis_window_days: days,
                ..config.plateau.clone()
            };
            engine.detector =
                PlateauDetector::new(plateau, InterventionSelector::new(config.intervention.clone()));
        }

        info!(
            table_version = %engine.table.version(),
            units = %engine.default_units.label(),
            "Prescription engine ready"
        );
        Ok(engine)
    }

    /// Shared periodization table
    #[must_use]
    pub fn table(&self) -> &Arc<PeriodizationTable> {
        &self.table
    }

    /// Build a strict profile from a stored row
    ///
    /// The stored ability level is ignored; ability is recomputed from the
    /// recorded skills. Rows without units get the configured default.
    #[must_use]
    pub fn build_profile(&self, mut row: AthleteRow) -> AthleteProfile {
        if row.units.as_ref().is_none_or(Value::is_null) {
            row.units = Some(Value::String(self.default_units.label().to_owned()));
        }
        let mut profile = row.into_profile();
        profile.ability = self.classifier.classify_skills(&profile.skills).ability;
        profile
    }

    /// Strength ratios for one athlete
    #[must_use]
    pub fn calculate_ratios(&self, measurements: &AthleteMeasurements) -> RatioSet {
        self.ratio_engine.calculate(measurements)
    }

    /// Strength ratios for many athletes, in input order
    #[must_use]
    pub fn calculate_ratios_batch(&self, athletes: &[AthleteMeasurements]) -> Vec<RatioSet> {
        let started = Instant::now();
        let results: Vec<RatioSet> = athletes
            .par_iter()
            .map(|measurements| self.ratio_engine.calculate(measurements))
            .collect();
        EngineLogger::log_batch("ratios", results.len(), elapsed_ms(started));
        results
    }

    /// Profile, ability and ratios for a stored athlete row
    #[must_use]
    pub fn assess(&self, row: AthleteRow) -> AthleteAssessment {
        let profile = self.build_profile(row);
        let ability = self.classifier.classify_skills(&profile.skills);
        let ratios = self.calculate_ratios(&profile.measurements);

        EngineLogger::log_profile_built(
            &athlete_label(&profile),
            ability.ability.as_str(),
            ratios.is_incomplete(),
        );

        AthleteAssessment {
            profile,
            ability,
            ratios,
        }
    }

    /// Prescribe one block
    ///
    /// A request with `num_exercises` of zero gets the block's standard
    /// count. Deload volume applies when the request asks for it or the
    /// table marks the week as a deload week. Catalog rows without a name
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error for week 0 or when the table has no scheme for the
    /// strength block's category, level and week
    pub fn prescribe(&self, request: PrescriptionRequest) -> AppResult<PrescriptionResponse> {
        let PrescriptionRequest {
            athlete,
            catalog,
            assignment,
            logs,
            as_of,
        } = request;

        let assessment = self.assess(athlete);
        let catalog = catalog_entries(catalog);

        let mut assignment = assignment;
        if assignment.num_exercises == 0 {
            assignment.num_exercises = self.assignment.block_exercise_count(
                assignment.block,
                assignment.main_lift,
                &assessment.ratios,
            );
        }
        assignment.is_deload = assignment.is_deload || self.table.is_deload_week(assignment.week);

        if !logs.is_empty() {
            let as_of = as_of.unwrap_or_else(Utc::now);
            let report = self.analyze_plateaus(logs, as_of);
            for (name, constraints) in report.constraint_overrides() {
                assignment.interventions.entry(name).or_insert(constraints);
            }
        }

        let exercises = self.assignment.assign(
            &assignment,
            &assessment.profile,
            &assessment.ratios,
            &catalog,
            &self.table,
        )?;

        let interventions_applied: Vec<String> = exercises
            .iter()
            .filter(|row| assignment.interventions.contains_key(&row.name))
            .map(|row| row.name.clone())
            .fold(Vec::new(), |mut names, name| {
                if !names.contains(&name) {
                    names.push(name);
                }
                names
            });

        debug!(
            block = %assignment.block,
            week = assignment.week,
            rows = exercises.len(),
            "Block prescribed"
        );

        Ok(PrescriptionResponse {
            block: assignment.block,
            week: assignment.week,
            is_deload: assignment.is_deload,
            ability: assessment.profile.ability,
            table_version: self.table.version().to_owned(),
            exercises,
            interventions_applied,
        })
    }

    /// Plateau report from stored log rows
    ///
    /// Rows without an exercise name or a readable timestamp are skipped.
    #[must_use]
    pub fn analyze_plateaus(
        &self,
        rows: Vec<PerformanceLogRow>,
        as_of: DateTime<Utc>,
    ) -> AthletePlateauReport {
        let logs = performance_logs(rows);
        self.analyze_logs(&logs, as_of)
    }

    /// Plateau report from strict log entries
    #[must_use]
    pub fn analyze_logs(
        &self,
        logs: &[PerformanceLogEntry],
        as_of: DateTime<Utc>,
    ) -> AthletePlateauReport {
        self.detector.analyze_athlete(logs, as_of)
    }

    /// Plateau reports for many athletes keyed by athlete id
    #[must_use]
    pub fn analyze_athletes_batch(
        &self,
        athletes: &BTreeMap<String, Vec<PerformanceLogEntry>>,
        as_of: DateTime<Utc>,
    ) -> BTreeMap<String, AthletePlateauReport> {
        let started = Instant::now();
        let reports: BTreeMap<String, AthletePlateauReport> = athletes
            .par_iter()
            .map(|(athlete, logs)| (athlete.clone(), self.detector.analyze_athlete(logs, as_of)))
            .collect();

        for (athlete, report) in &reports {
            let names: Vec<&str> = report
                .interventions_needed
                .keys()
                .map(String::as_str)
                .collect();
            EngineLogger::log_interventions(athlete, &names);
        }
        EngineLogger::log_batch("plateaus", reports.len(), elapsed_ms(started));
        reports
    }
}

/// Strict catalog entries; rows without a name are skipped
#[must_use]
pub fn catalog_entries(rows: Vec<ExerciseRow>) -> Vec<ExerciseCatalogEntry> {
    rows.into_iter()
        .filter_map(|row| match ExerciseCatalogEntry::try_from(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping catalog row");
                None
            }
        })
        .collect()
}

/// Strict log entries; rows without a name or readable timestamp are skipped
#[must_use]
pub fn performance_logs(rows: Vec<PerformanceLogRow>) -> Vec<PerformanceLogEntry> {
    rows.into_iter()
        .filter_map(|row| match PerformanceLogEntry::try_from(row) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "Skipping performance log row");
                None
            }
        })
        .collect()
}

fn athlete_label(profile: &AthleteProfile) -> String {
    profile
        .athlete_id
        .map_or_else(|| ANONYMOUS_ATHLETE.to_owned(), |id| id.to_string())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
