// ABOUTME: Exercise assignment for one training block of one day
// ABOUTME: Filters the catalog, samples exercises by weight and turns notes and 1RMs into prescriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Exercise assignment
//!
//! The STRENGTH AND POWER block always produces one row per periodized set
//! for a single exercise. The SKILLS, TECHNICAL WORK and ACCESSORIES blocks
//! filter the catalog through equipment, prerequisite and block rules, fall
//! back to scaled alternatives, then draw exercises by weighted sampling
//! without replacement. Sampling uses a seeded `ChaCha8Rng`, so a request
//! always yields the same prescription.
//!
//! Active plateau interventions override intensity and volume for the
//! exercises they name.

pub mod eligibility;
pub mod program_notes;

use std::collections::BTreeMap;

use prescription_core::constants::{equipment, ALL_LIFTS_GROUP, SKILL_COUNT, SKILL_NAMES};
use prescription_core::errors::{AppError, AppResult};
use prescription_core::models::{
    AbilityLevel, AthleteProfile, DifficultyLevel, ExerciseCatalogEntry, ExercisePrescription,
    Gender, Lift, MainLift, SkillLevel, TrainingBlock, Units,
};
use rand::distributions::{Distribution, WeightedIndex};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::intelligence::AssignmentConfig;
use crate::config::IntelligenceConfig;
use crate::intervention::InterventionConstraints;
use crate::periodization::PeriodizationTable;
use crate::ratio_engine::RatioSet;

pub use eligibility::{
    has_required_equipment, is_dumbbell_only, is_level_appropriate, prerequisite_met,
    prerequisites_met, required_equipment, scaled_alternatives,
};
pub use program_notes::{parse_program_note, truncate_note, NoteDefaults, NotePlan};

/// Fallback work for athletes with no usable catalog entries: (name, sets, reps)
const DEFAULT_BODYWEIGHT_EXERCISES: [(&str, u32, u32); 2] =
    [("Air Squat", 3, 15), ("Push-ups", 3, 12)];

/// Note attached to fallback bodyweight work
const BODYWEIGHT_NOTE: &str = "Bodyweight";

/// Note suffix for strength rows built for the main lift itself
const SYNTHETIC_SUFFIX: &str = "- Synthetic";

/// Tolerance for treating a rounded load as a whole number
const WHOLE_LOAD_TOLERANCE: f64 = 1e-9;

const fn default_day() -> u32 {
    1
}

/// Everything about the day and the week so far that shapes one block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// Block being filled
    pub block: TrainingBlock,
    /// Main lift of the day
    pub main_lift: MainLift,
    /// Program week, 1-based and cyclic
    pub week: u32,
    /// Day within the week, 1-based
    #[serde(default = "default_day")]
    pub day: u32,
    /// Whether volume is reduced this week
    #[serde(default)]
    pub is_deload: bool,
    /// Exercises wanted
    pub num_exercises: usize,
    /// Times each skill was assigned this week
    #[serde(default)]
    pub weekly_skills: BTreeMap<String, u32>,
    /// Times each accessory was assigned this week
    #[serde(default)]
    pub weekly_accessories: BTreeMap<String, u32>,
    /// Skills assigned yesterday
    #[serde(default)]
    pub previous_day_skills: Vec<String>,
    /// Accessories assigned yesterday
    #[serde(default)]
    pub previous_day_accessories: Vec<String>,
    /// Exercises already in today's strength block
    #[serde(default)]
    pub daily_strength_exercises: Vec<String>,
    /// Strength exercises already used this week
    #[serde(default)]
    pub used_strengths: Vec<String>,
    /// Accessory category → day it was last used
    #[serde(default)]
    pub accessory_category_last_day: BTreeMap<String, u32>,
    /// Active intervention constraints keyed by exercise name
    #[serde(default)]
    pub interventions: BTreeMap<String, InterventionConstraints>,
    /// Seed for weighted selection
    #[serde(default)]
    pub seed: u64,
}

impl AssignmentRequest {
    /// Request with empty weekly history
    #[must_use]
    pub fn new(
        block: TrainingBlock,
        main_lift: MainLift,
        week: u32,
        day: u32,
        num_exercises: usize,
    ) -> Self {
        Self {
            block,
            main_lift,
            week,
            day,
            is_deload: false,
            num_exercises,
            weekly_skills: BTreeMap::new(),
            weekly_accessories: BTreeMap::new(),
            previous_day_skills: Vec::new(),
            previous_day_accessories: Vec::new(),
            daily_strength_exercises: Vec::new(),
            used_strengths: Vec::new(),
            accessory_category_last_day: BTreeMap::new(),
            interventions: BTreeMap::new(),
            seed: 0,
        }
    }

    /// Set the selection seed
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Mark the week as a deload
    #[must_use]
    pub fn with_deload(mut self, is_deload: bool) -> Self {
        self.is_deload = is_deload;
        self
    }

    /// Attach intervention overrides
    #[must_use]
    pub fn with_interventions(
        mut self,
        interventions: BTreeMap<String, InterventionConstraints>,
    ) -> Self {
        self.interventions = interventions;
        self
    }
}

/// Exercise assignment engine
#[derive(Debug, Clone)]
pub struct ExerciseAssignmentEngine {
    config: AssignmentConfig,
}

impl Default for ExerciseAssignmentEngine {
    fn default() -> Self {
        Self::new(IntelligenceConfig::global().assignment.clone())
    }
}

impl ExerciseAssignmentEngine {
    /// Create an engine with explicit rules
    #[must_use]
    pub const fn new(config: AssignmentConfig) -> Self {
        Self { config }
    }

    /// Active rules
    #[must_use]
    pub const fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// Exercises a block should contain on a given main-lift day
    #[must_use]
    pub fn block_exercise_count(
        &self,
        block: TrainingBlock,
        main_lift: MainLift,
        ratios: &RatioSet,
    ) -> usize {
        let counts = &self.config.block_counts;
        match block {
            TrainingBlock::Skills => counts.skills,
            TrainingBlock::TechnicalWork => ratios
                .technical_count_for(main_lift)
                .map_or(counts.technical_default, usize::from),
            TrainingBlock::StrengthAndPower => counts.strength,
            TrainingBlock::Accessories => counts.accessories,
            TrainingBlock::Metcons => 0,
        }
    }

    /// Assign exercises for one block
    ///
    /// # Errors
    ///
    /// Returns an error when the periodization table has no scheme for the
    /// strength block's category, level and week.
    pub fn assign(
        &self,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        ratios: &RatioSet,
        catalog: &[ExerciseCatalogEntry],
        table: &PeriodizationTable,
    ) -> AppResult<Vec<ExercisePrescription>> {
        let rows = match request.block {
            TrainingBlock::Metcons => {
                debug!("METCONS are assigned elsewhere");
                Vec::new()
            }
            _ if catalog.is_empty() => {
                warn!(block = %request.block, "Empty exercise catalog, using bodyweight fallback");
                default_bodyweight(request.num_exercises)
            }
            TrainingBlock::StrengthAndPower => {
                self.assign_strength(request, profile, ratios, catalog, table)?
            }
            TrainingBlock::Skills | TrainingBlock::TechnicalWork | TrainingBlock::Accessories => {
                self.assign_selected(request, profile, ratios, catalog)?
            }
        };

        info!(
            block = %request.block,
            main_lift = %request.main_lift,
            week = request.week,
            day = request.day,
            assigned = rows.len(),
            "Block assigned"
        );
        Ok(rows)
    }

    fn assign_strength(
        &self,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        ratios: &RatioSet,
        catalog: &[ExerciseCatalogEntry],
        table: &PeriodizationTable,
    ) -> AppResult<Vec<ExercisePrescription>> {
        let owns_barbell = profile.has_equipment(equipment::BARBELL);
        let candidates: Vec<&ExerciseCatalogEntry> = catalog
            .iter()
            .filter(|entry| {
                entry.can_be_strength
                    && trains_main_lift(entry, request.main_lift)
                    && has_required_equipment(entry, profile)
                    && !(owns_barbell && is_dumbbell_only(entry))
            })
            .collect();

        let level = ratios.level_for(request.main_lift);
        let scheme = table.lookup(request.main_lift.category(), level, request.week)?;

        let chosen = candidates
            .iter()
            .find(|entry| !request.used_strengths.contains(&entry.name))
            .or_else(|| candidates.first());

        let (name, one_rm, suffix) = if let Some(entry) = chosen {
            let one_rm = entry
                .one_rm_reference()
                .and_then(Lift::from_name)
                .and_then(|lift| profile.measurements.recorded_one_rm(lift));
            (entry.name.as_str(), one_rm, None)
        } else {
            warn!(
                main_lift = %request.main_lift,
                "No strength exercise matched, prescribing the main lift itself"
            );
            let one_rm = profile
                .measurements
                .recorded_one_rm(request.main_lift.one_rm_lift());
            (request.main_lift.name(), one_rm, Some(SYNTHETIC_SUFFIX))
        };

        let intervention = request.interventions.get(name);
        let rows = scheme
            .sets()
            .enumerate()
            .map(|(index, (reps, fraction))| {
                let (reps, fraction) = intervention.map_or((reps, fraction), |constraints| {
                    (
                        constraints.scale_volume(reps),
                        constraints.clamp_intensity(fraction),
                    )
                });
                let weight_time = one_rm
                    .map(|one_rm| format_load(self.round_to_increment(one_rm * fraction, profile.units)))
                    .unwrap_or_default();

                let mut notes = format!("{level} - Set {}", index + 1);
                if let Some(suffix) = suffix {
                    notes = format!("{notes} {suffix}");
                }
                if let Some(constraints) = intervention {
                    notes = format!("{notes} {}", constraints.note_tag());
                }
                ExercisePrescription::new(name, 1, Some(reps), weight_time, notes)
            })
            .collect();

        Ok(rows)
    }

    fn assign_selected(
        &self,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        ratios: &RatioSet,
        catalog: &[ExerciseCatalogEntry],
    ) -> AppResult<Vec<ExercisePrescription>> {
        let needed = ratios.needed_accessory_categories();
        let mut candidates: Vec<&ExerciseCatalogEntry> = catalog
            .iter()
            .filter(|entry| self.is_candidate(entry, request, profile, &needed))
            .collect();

        if request.block == TrainingBlock::Accessories {
            let fresh: Vec<&ExerciseCatalogEntry> = candidates
                .iter()
                .copied()
                .filter(|entry| !category_used_yesterday(entry, request))
                .collect();
            if !fresh.is_empty() {
                candidates = fresh;
            }
        }

        if candidates.is_empty() {
            candidates = scaled_alternatives(catalog, profile);
            debug!(
                block = %request.block,
                scaled = candidates.len(),
                "No direct matches, trying scaled alternatives"
            );
        }

        if candidates.is_empty() {
            if profile.equipment.is_empty() {
                return Ok(default_bodyweight(request.num_exercises));
            }
            warn!(block = %request.block, "No eligible exercises");
            return Ok(Vec::new());
        }

        let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
        let mut pool: Vec<(&ExerciseCatalogEntry, f64)> = candidates
            .into_iter()
            .map(|entry| (entry, self.selection_weight(entry, profile.ability)))
            .collect();

        let mut rows = Vec::with_capacity(request.num_exercises);
        while rows.len() < request.num_exercises && !pool.is_empty() {
            let distribution = WeightedIndex::new(pool.iter().map(|(_, weight)| *weight))
                .map_err(|e| AppError::internal(format!("Invalid selection weights: {e}")))?;
            let (entry, _) = pool.remove(distribution.sample(&mut rng));

            match self.prescribe(entry, request, profile, ratios, &mut rng) {
                Some(row) => rows.push(row),
                None => debug!(
                    exercise = %entry.name,
                    "Skipping exercise without a usable program note"
                ),
            }
        }

        Ok(rows)
    }

    fn is_candidate(
        &self,
        entry: &ExerciseCatalogEntry,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        needed_categories: &[&str],
    ) -> bool {
        if !entry.usable_in(request.block)
            || !has_required_equipment(entry, profile)
            || !prerequisites_met(entry, profile)
        {
            return false;
        }

        match request.block {
            TrainingBlock::Skills => self.passes_skill_rules(entry, request, profile),
            TrainingBlock::TechnicalWork => {
                !request.daily_strength_exercises.contains(&entry.name)
                    && entry
                        .technical_dependency
                        .iter()
                        .any(|lift| MainLift::parse(lift) == Some(request.main_lift))
            }
            TrainingBlock::Accessories => {
                self.passes_accessory_rules(entry, request, profile, needed_categories)
            }
            TrainingBlock::StrengthAndPower | TrainingBlock::Metcons => true,
        }
    }

    fn passes_skill_rules(
        &self,
        entry: &ExerciseCatalogEntry,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
    ) -> bool {
        if self.at_weekly_limit(&request.weekly_skills, &entry.name)
            || request.previous_day_skills.contains(&entry.name)
        {
            return false;
        }

        let Some(index) = skill_index(entry) else {
            debug!(exercise = %entry.name, skill_index = ?entry.skill_index, "Invalid skill index");
            return false;
        };

        let athlete_rank = profile.skill_level_at(index).rank();
        let exercise_rank = entry
            .difficulty_level
            .map_or(0, DifficultyLevel::skill_rank);
        if exercise_rank > athlete_rank {
            return false;
        }

        if entry.difficulty_level == Some(DifficultyLevel::Elite)
            && (profile.advanced_skill_count() < self.config.elite_advanced_skill_count
                || athlete_rank < SkillLevel::Advanced.rank())
        {
            return false;
        }

        // Entry-level scalings only appear while the base skill is missing
        if exercise_rank == 0 {
            if let Some(base) = entry.scaling_for() {
                if SKILL_NAMES.contains(&base) && profile.skill_level(base) != SkillLevel::DontHaveIt
                {
                    return false;
                }
            }
        }

        true
    }

    fn passes_accessory_rules(
        &self,
        entry: &ExerciseCatalogEntry,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        needed_categories: &[&str],
    ) -> bool {
        let Some(category) = entry.accessory_category() else {
            return false;
        };
        if self.at_weekly_limit(&request.weekly_accessories, &entry.name)
            || request.previous_day_accessories.contains(&entry.name)
        {
            return false;
        }
        if needed_categories.is_empty() {
            return true;
        }
        needed_categories
            .iter()
            .any(|needed| needed.eq_ignore_ascii_case(category))
            && is_level_appropriate(entry.difficulty_level, profile.ability)
    }

    fn at_weekly_limit(&self, counts: &BTreeMap<String, u32>, name: &str) -> bool {
        counts.get(name).copied().unwrap_or(0) >= self.config.max_weekly_frequency
    }

    /// Selection weight for the athlete's ability column
    #[must_use]
    pub fn selection_weight(&self, entry: &ExerciseCatalogEntry, ability: AbilityLevel) -> f64 {
        let column = match ability {
            AbilityLevel::Beginner => entry.beginner_weight,
            AbilityLevel::Intermediate => entry.intermediate_weight,
            AbilityLevel::Advanced => entry.advanced_weight,
        };
        let usable = |weight: &f64| weight.is_finite() && *weight > 0.0;
        column
            .filter(usable)
            .or_else(|| entry.default_weight.filter(usable))
            .unwrap_or(self.config.default_selection_weight)
    }

    /// Level whose program note applies to an exercise in this block
    #[must_use]
    pub fn effective_level(
        &self,
        entry: &ExerciseCatalogEntry,
        block: TrainingBlock,
        main_lift: MainLift,
        profile: &AthleteProfile,
        ratios: &RatioSet,
    ) -> &'static str {
        match block {
            TrainingBlock::Skills => skill_index(entry).map_or(
                DifficultyLevel::Intermediate.as_str(),
                |index| match profile.skill_level_at(index) {
                    SkillLevel::DontHaveIt => DifficultyLevel::Novice.as_str(),
                    SkillLevel::Beginner => DifficultyLevel::Beginner.as_str(),
                    SkillLevel::Intermediate => DifficultyLevel::Intermediate.as_str(),
                    SkillLevel::Advanced
                        if profile.advanced_skill_count()
                            >= self.config.elite_advanced_skill_count =>
                    {
                        DifficultyLevel::Elite.as_str()
                    }
                    SkillLevel::Advanced => DifficultyLevel::Advanced.as_str(),
                },
            ),
            TrainingBlock::TechnicalWork => ratios.level_for(main_lift).as_str(),
            TrainingBlock::StrengthAndPower
            | TrainingBlock::Accessories
            | TrainingBlock::Metcons => DifficultyLevel::Intermediate.as_str(),
        }
    }

    fn prescribe(
        &self,
        entry: &ExerciseCatalogEntry,
        request: &AssignmentRequest,
        profile: &AthleteProfile,
        ratios: &RatioSet,
        rng: &mut ChaCha8Rng,
    ) -> Option<ExercisePrescription> {
        let level = self.effective_level(entry, request.block, request.main_lift, profile, ratios);
        let plan = parse_program_note(
            entry.program_notes.for_level(level),
            level,
            request.is_deload,
            self.note_defaults(),
        );
        if !plan.is_prescribable() {
            return None;
        }
        let NotePlan {
            sets,
            reps,
            percent_1rm,
            weight_time: planned_weight_time,
            notes: planned_notes,
        } = plan;

        let intervention = request.interventions.get(&entry.name);
        let sets = sets.unwrap_or(self.config.default_sets);
        let sets = intervention.map_or(sets, |constraints| constraints.scale_volume(sets));

        let weight_time = match entry.one_rm_reference() {
            Some(reference) => Lift::from_name(reference)
                .and_then(|lift| profile.measurements.recorded_one_rm(lift))
                .map(|one_rm| {
                    let fraction = percent_1rm.unwrap_or(if request.is_deload {
                        self.config.deload_percent_1rm
                    } else {
                        self.config.default_percent_1rm
                    });
                    let fraction =
                        intervention.map_or(fraction, |constraints| constraints.clamp_intensity(fraction));
                    format_load(self.accessory_load(entry, one_rm * fraction, profile))
                })
                .unwrap_or_default(),
            None => planned_weight_time.unwrap_or_default(),
        };

        let cues: Vec<&str> = entry
            .performance_cues
            .iter()
            .map(|cue| cue.trim())
            .filter(|cue| !cue.is_empty())
            .collect();
        let mut notes = cues
            .choose(rng)
            .map(|cue| truncate_note(cue, self.config.max_note_length))
            .or(planned_notes)
            .unwrap_or_else(|| level.to_owned());
        if let Some(constraints) = intervention {
            notes = format!("{notes} {}", constraints.note_tag());
        }

        Some(ExercisePrescription::new(
            entry.name.clone(),
            sets,
            reps,
            weight_time,
            notes,
        ))
    }

    /// Load for a 1RM-based accessory: whole number, barbell floor, platform increment
    fn accessory_load(&self, entry: &ExerciseCatalogEntry, raw: f64, profile: &AthleteProfile) -> f64 {
        let mut load = raw.round();
        let uses_barbell = required_equipment(entry)
            .iter()
            .any(|item| item.eq_ignore_ascii_case(equipment::BARBELL));
        if uses_barbell {
            load = load.max(self.barbell_floor(profile.measurements.gender(), profile.units));
        }
        self.round_to_increment(load, profile.units)
    }

    /// Lightest barbell load for a gender and unit system
    #[must_use]
    pub const fn barbell_floor(&self, gender: Gender, units: Units) -> f64 {
        let floors = &self.config.barbell_floors;
        match (gender, units) {
            (Gender::Male, Units::Imperial) => floors.male_lbs,
            (Gender::Female, Units::Imperial) => floors.female_lbs,
            (Gender::Male, Units::Metric) => floors.male_kg,
            (Gender::Female, Units::Metric) => floors.female_kg,
        }
    }

    /// Round a load to the nearest plate increment (5 lb or 2.5 kg by default)
    #[must_use]
    pub fn round_to_increment(&self, load: f64, units: Units) -> f64 {
        let increment = match units {
            Units::Imperial => self.config.imperial_increment,
            Units::Metric => self.config.metric_increment,
        };
        if !load.is_finite() || load <= 0.0 {
            return load;
        }
        (load / increment).round() * increment
    }

    const fn note_defaults(&self) -> NoteDefaults {
        NoteDefaults {
            sets: self.config.default_sets,
            reps: self.config.default_reps,
            deload_multiplier: self.config.deload_volume_multiplier,
        }
    }
}

/// Whether an exercise's lift groups cover the main lift
fn trains_main_lift(entry: &ExerciseCatalogEntry, main_lift: MainLift) -> bool {
    entry.lift_groups.iter().any(|group| {
        group.trim().eq_ignore_ascii_case(ALL_LIFTS_GROUP) || MainLift::parse(group) == Some(main_lift)
    })
}

fn skill_index(entry: &ExerciseCatalogEntry) -> Option<usize> {
    entry
        .skill_index
        .and_then(|index| usize::try_from(index).ok())
        .filter(|index| *index < SKILL_COUNT)
}

fn category_used_yesterday(entry: &ExerciseCatalogEntry, request: &AssignmentRequest) -> bool {
    entry.accessory_category().is_some_and(|category| {
        request
            .accessory_category_last_day
            .get(category)
            .is_some_and(|day| day.saturating_add(1) == request.day)
    })
}

/// Bodyweight fallback list, truncated to `count`
#[must_use]
pub fn default_bodyweight(count: usize) -> Vec<ExercisePrescription> {
    DEFAULT_BODYWEIGHT_EXERCISES
        .iter()
        .take(count)
        .map(|(name, sets, reps)| {
            ExercisePrescription::new(*name, *sets, Some(*reps), String::new(), BODYWEIGHT_NOTE)
        })
        .collect()
}

/// Render a load without a trailing ".0"
#[must_use]
pub fn format_load(load: f64) -> String {
    if (load - load.round()).abs() < WHOLE_LOAD_TOLERANCE {
        format!("{load:.0}")
    } else {
        format!("{load}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ExerciseAssignmentEngine {
        ExerciseAssignmentEngine::new(AssignmentConfig::default())
    }

    #[test]
    fn test_round_to_increment() {
        let engine = engine();
        assert!((engine.round_to_increment(187.0, Units::Imperial) - 185.0).abs() < f64::EPSILON);
        assert!((engine.round_to_increment(101.0, Units::Metric) - 100.0).abs() < f64::EPSILON);
        assert!((engine.round_to_increment(101.3, Units::Metric) - 102.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_format_load() {
        assert_eq!(format_load(185.0), "185");
        assert_eq!(format_load(102.5), "102.5");
    }

    #[test]
    fn test_barbell_floors() {
        let engine = engine();
        assert!((engine.barbell_floor(Gender::Female, Units::Imperial) - 35.0).abs() < f64::EPSILON);
        assert!((engine.barbell_floor(Gender::Male, Units::Metric) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_bodyweight_truncates() {
        assert_eq!(default_bodyweight(1).len(), 1);
        assert_eq!(default_bodyweight(5).len(), 2);
        assert_eq!(default_bodyweight(2)[1].reps, Some(12));
    }

    #[test]
    fn test_selection_weight_falls_back() {
        let engine = engine();
        let mut entry = ExerciseCatalogEntry::named("Ring Rows");
        assert!((engine.selection_weight(&entry, AbilityLevel::Beginner) - 5.0).abs() < f64::EPSILON);
        entry.default_weight = Some(2.0);
        assert!((engine.selection_weight(&entry, AbilityLevel::Beginner) - 2.0).abs() < f64::EPSILON);
        entry.beginner_weight = Some(8.0);
        assert!((engine.selection_weight(&entry, AbilityLevel::Beginner) - 8.0).abs() < f64::EPSILON);
    }
}
