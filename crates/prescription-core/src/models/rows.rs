// ABOUTME: Loosely typed rows as stored by the data layer and their conversion into strict models
// ABOUTME: Accepts numbers-as-strings, nulls, missing fields and alternate list encodings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Boundary Rows
//!
//! Rows arrive from the data layer with inconsistent typing: one-rep maxes
//! may be numbers, numeric strings or `"225 lbs"`; lists may be JSON arrays
//! or comma-separated text; booleans may be strings. These row types accept
//! all of that and convert into the strict models so the engines never handle
//! `serde_json::Value`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::{ONE_RM_COUNT, SKILL_NAMES};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::athlete::{
    AbilityLevel, AthleteMeasurements, AthleteProfile, Gender, Lift, SkillLevel, Units,
};
use crate::models::exercise::{DifficultyLevel, ExerciseCatalogEntry, ProgramNotes};
use crate::models::performance::PerformanceLogEntry;
use crate::parsing::leading_f64;

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => leading_f64(text),
        _ => None,
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_owned()).filter(|text| !text.is_empty()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn as_bool(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => matches!(
            text.trim().to_lowercase().as_str(),
            "true" | "yes" | "y" | "1" | "t"
        ),
        _ => false,
    }
}

fn as_text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(as_text).collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('[') {
                if let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed) {
                    return items.iter().filter_map(as_text).collect();
                }
            }
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect()
        }
        _ => Vec::new(),
    }
}

fn opt_f64(value: Option<&Value>) -> Option<f64> {
    value.and_then(as_f64)
}

fn opt_text(value: Option<&Value>) -> Option<String> {
    value.and_then(as_text)
}

fn opt_bool(value: Option<&Value>) -> bool {
    value.is_some_and(as_bool)
}

fn opt_list(value: Option<&Value>) -> Vec<String> {
    value.map(as_text_list).unwrap_or_default()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Athlete record as stored: profile columns plus lift and skill lists
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AthleteRow {
    /// Athlete identifier
    #[serde(default)]
    pub id: Option<Value>,
    /// "Male" / "Female"
    #[serde(default)]
    pub gender: Option<Value>,
    /// Bodyweight, number or text
    #[serde(default)]
    pub body_weight: Option<Value>,
    /// Units label
    #[serde(default)]
    pub units: Option<Value>,
    /// One-rep maxes as a 14-element array or a lift-name map
    #[serde(default)]
    pub one_rms: Option<Value>,
    /// Owned equipment
    #[serde(default)]
    pub equipment: Option<Value>,
    /// Skill levels as a 26-element array or a skill-name map
    #[serde(default)]
    pub skills: Option<Value>,
    /// Stored ability level; recalculated from skills by the engine
    #[serde(default)]
    pub ability_level: Option<Value>,
}

impl AthleteRow {
    /// Strict measurements; anything unreadable becomes `0`
    #[must_use]
    pub fn measurements(&self) -> AthleteMeasurements {
        let gender = opt_text(self.gender.as_ref())
            .map(|raw| Gender::parse(&raw))
            .unwrap_or_default();
        let body_weight = opt_f64(self.body_weight.as_ref()).unwrap_or(0.0);

        let mut one_rms = [0.0; ONE_RM_COUNT];
        match self.one_rms.as_ref() {
            Some(Value::Array(items)) => {
                for (slot, item) in one_rms.iter_mut().zip(items) {
                    *slot = as_f64(item).unwrap_or(0.0);
                }
            }
            Some(Value::Object(map)) => {
                for (name, item) in map {
                    if let Some(lift) = Lift::from_name(name) {
                        one_rms[lift.index()] = as_f64(item).unwrap_or(0.0);
                    }
                }
            }
            _ => {}
        }

        AthleteMeasurements::new(gender, body_weight, one_rms)
    }

    /// Skill name → level; unknown names are dropped
    #[must_use]
    pub fn skill_levels(&self) -> BTreeMap<String, SkillLevel> {
        let mut skills = BTreeMap::new();
        match self.skills.as_ref() {
            Some(Value::Array(items)) => {
                for (name, item) in SKILL_NAMES.iter().zip(items) {
                    let level = as_text(item).map_or(SkillLevel::DontHaveIt, |raw| {
                        SkillLevel::parse(&raw)
                    });
                    skills.insert((*name).to_owned(), level);
                }
            }
            Some(Value::Object(map)) => {
                for (name, item) in map {
                    if let Some(canonical) = SKILL_NAMES
                        .iter()
                        .find(|skill| skill.eq_ignore_ascii_case(name.trim()))
                    {
                        let level = as_text(item).map_or(SkillLevel::DontHaveIt, |raw| {
                            SkillLevel::parse(&raw)
                        });
                        skills.insert((*canonical).to_owned(), level);
                    }
                }
            }
            _ => {}
        }
        skills
    }

    /// Convert into a profile; `ability` is the stored value or `Beginner`
    #[must_use]
    pub fn into_profile(self) -> AthleteProfile {
        let measurements = self.measurements();
        let skills = self.skill_levels();
        let athlete_id = opt_text(self.id.as_ref()).and_then(|raw| Uuid::parse_str(&raw).ok());
        let units = opt_text(self.units.as_ref())
            .map(|raw| Units::parse(&raw))
            .unwrap_or_default();
        let ability = opt_text(self.ability_level.as_ref())
            .and_then(|raw| AbilityLevel::parse(&raw))
            .unwrap_or_default();

        AthleteProfile {
            athlete_id,
            measurements,
            units,
            equipment: opt_list(self.equipment.as_ref()),
            skills,
            ability,
        }
    }
}

/// Performance log record as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceLogRow {
    /// Exercise name
    #[serde(default)]
    pub exercise_name: Option<Value>,
    /// Load or time text
    #[serde(default)]
    pub weight_time: Option<Value>,
    /// Sets text
    #[serde(default)]
    pub sets: Option<Value>,
    /// Reps text
    #[serde(default)]
    pub reps: Option<Value>,
    /// RPE
    #[serde(default)]
    pub rpe: Option<Value>,
    /// Numeric completion quality
    #[serde(default)]
    pub completion_quality: Option<Value>,
    /// Letter grade
    #[serde(default)]
    pub quality_grade: Option<Value>,
    /// Timestamp (RFC 3339 or YYYY-MM-DD)
    #[serde(default)]
    pub logged_at: Option<Value>,
    /// Training block
    #[serde(default)]
    pub block: Option<Value>,
}

impl TryFrom<PerformanceLogRow> for PerformanceLogEntry {
    type Error = AppError;

    fn try_from(row: PerformanceLogRow) -> AppResult<Self> {
        let exercise_name = opt_text(row.exercise_name.as_ref()).ok_or_else(|| {
            AppError::new(
                ErrorCode::MissingRequiredField,
                "performance log row has no exercise_name",
            )
        })?;
        let raw_logged_at = opt_text(row.logged_at.as_ref()).ok_or_else(|| {
            AppError::new(
                ErrorCode::MissingRequiredField,
                format!("performance log for '{exercise_name}' has no logged_at"),
            )
        })?;
        let logged_at = parse_timestamp(&raw_logged_at).ok_or_else(|| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("unreadable logged_at '{raw_logged_at}'"),
            )
            .with_resource_id(exercise_name.clone())
        })?;

        Ok(Self {
            exercise_name,
            weight_time: opt_text(row.weight_time.as_ref()).unwrap_or_default(),
            sets: opt_text(row.sets.as_ref()).unwrap_or_default(),
            reps: opt_text(row.reps.as_ref()).unwrap_or_default(),
            rpe: opt_f64(row.rpe.as_ref()),
            completion_quality: opt_f64(row.completion_quality.as_ref()),
            quality_grade: opt_text(row.quality_grade.as_ref()),
            logged_at,
            block: opt_text(row.block.as_ref()),
        })
    }
}

/// Exercise catalog record as stored
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseRow {
    /// Exercise name
    #[serde(default)]
    pub name: Option<Value>,
    /// Required equipment
    #[serde(default)]
    pub required_equipment: Option<Value>,
    /// First prerequisite
    #[serde(default)]
    pub prerequisite_1: Option<Value>,
    /// Second prerequisite
    #[serde(default)]
    pub prerequisite_2: Option<Value>,
    /// SKILLS flag
    #[serde(default)]
    pub can_be_skills: Option<Value>,
    /// TECHNICAL WORK flag
    #[serde(default)]
    pub can_be_technical: Option<Value>,
    /// STRENGTH AND POWER flag
    #[serde(default)]
    pub can_be_strength: Option<Value>,
    /// ACCESSORIES flag
    #[serde(default)]
    pub can_be_accessories: Option<Value>,
    /// Doable without equipment
    #[serde(default)]
    pub bodyweight_accessible: Option<Value>,
    /// Lift groups
    #[serde(default)]
    pub lift_groups: Option<Value>,
    /// Skill index
    #[serde(default)]
    pub skill_index: Option<Value>,
    /// Difficulty tag
    #[serde(default)]
    pub difficulty_level: Option<Value>,
    /// Scaling target
    #[serde(default)]
    pub scaling_for: Option<Value>,
    /// Scaling options
    #[serde(default)]
    pub scaling_options: Option<Value>,
    /// Technical dependencies
    #[serde(default)]
    pub technical_dependency: Option<Value>,
    /// Accessory category
    #[serde(default)]
    pub accessory_category: Option<Value>,
    /// One-rep-max reference lift
    #[serde(default)]
    pub one_rm_reference: Option<Value>,
    /// Per-level program notes (object or JSON text)
    #[serde(default)]
    pub program_notes: Option<Value>,
    /// Coaching cues
    #[serde(default)]
    pub performance_cues: Option<Value>,
    /// Beginner selection weight
    #[serde(default)]
    pub beginner_weight: Option<Value>,
    /// Intermediate selection weight
    #[serde(default)]
    pub intermediate_weight: Option<Value>,
    /// Advanced selection weight
    #[serde(default)]
    pub advanced_weight: Option<Value>,
    /// Fallback selection weight
    #[serde(default)]
    pub default_weight: Option<Value>,
}

fn program_notes(value: Option<&Value>) -> ProgramNotes {
    let parsed = match value {
        Some(Value::String(text)) => serde_json::from_str::<ProgramNotes>(text).ok(),
        Some(object @ Value::Object(_)) => serde_json::from_value(object.clone()).ok(),
        _ => None,
    };
    parsed.unwrap_or_default()
}

impl TryFrom<ExerciseRow> for ExerciseCatalogEntry {
    type Error = AppError;

    fn try_from(row: ExerciseRow) -> AppResult<Self> {
        let name = opt_text(row.name.as_ref()).ok_or_else(|| {
            AppError::new(ErrorCode::MissingRequiredField, "exercise row has no name")
        })?;

        Ok(Self {
            name,
            required_equipment: opt_list(row.required_equipment.as_ref()),
            prerequisite_1: opt_text(row.prerequisite_1.as_ref()),
            prerequisite_2: opt_text(row.prerequisite_2.as_ref()),
            can_be_skills: opt_bool(row.can_be_skills.as_ref()),
            can_be_technical: opt_bool(row.can_be_technical.as_ref()),
            can_be_strength: opt_bool(row.can_be_strength.as_ref()),
            can_be_accessories: opt_bool(row.can_be_accessories.as_ref()),
            bodyweight_accessible: opt_bool(row.bodyweight_accessible.as_ref()),
            lift_groups: opt_list(row.lift_groups.as_ref()),
            skill_index: opt_f64(row.skill_index.as_ref()).map(|index| index.trunc() as i32),
            difficulty_level: opt_text(row.difficulty_level.as_ref())
                .and_then(|raw| DifficultyLevel::parse(&raw)),
            scaling_for: opt_text(row.scaling_for.as_ref()),
            scaling_options: opt_list(row.scaling_options.as_ref()),
            technical_dependency: opt_list(row.technical_dependency.as_ref()),
            accessory_category: opt_text(row.accessory_category.as_ref()),
            one_rm_reference: opt_text(row.one_rm_reference.as_ref()),
            program_notes: program_notes(row.program_notes.as_ref()),
            performance_cues: opt_list(row.performance_cues.as_ref()),
            beginner_weight: opt_f64(row.beginner_weight.as_ref()),
            intermediate_weight: opt_f64(row.intermediate_weight.as_ref()),
            advanced_weight: opt_f64(row.advanced_weight.as_ref()),
            default_weight: opt_f64(row.default_weight.as_ref()),
        })
    }
}
