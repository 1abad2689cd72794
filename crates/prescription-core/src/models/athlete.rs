// ABOUTME: Athlete measurement and profile models for prescription
// ABOUTME: Gender, Lift, MainLift, LiftCategory, ability and skill levels, units and AthleteProfile
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{units, ONE_RM_COUNT, ONE_RM_LIFT_NAMES, SKILL_NAMES};

/// Biological sex used to pick strength standards and barbell floors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Male standards (default when unset)
    #[default]
    Male,
    /// Female standards
    Female,
}

impl Gender {
    /// Parse a stored gender value; anything other than "female" is `Male`
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("female") {
            Self::Female
        } else {
            Self::Male
        }
    }
}

/// The fourteen tracked one-rep-max lifts, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Lift {
    /// Full snatch
    Snatch,
    /// Power snatch
    #[serde(rename = "Power Snatch")]
    PowerSnatch,
    /// Clean and jerk
    #[serde(rename = "Clean and Jerk")]
    CleanAndJerk,
    /// Power clean
    #[serde(rename = "Power Clean")]
    PowerClean,
    /// Clean without the jerk
    #[serde(rename = "Clean (Only)")]
    Clean,
    /// Jerk from the rack
    #[serde(rename = "Jerk (Only)")]
    Jerk,
    /// Back squat
    #[serde(rename = "Back Squat")]
    BackSquat,
    /// Front squat
    #[serde(rename = "Front Squat")]
    FrontSquat,
    /// Overhead squat
    #[serde(rename = "Overhead Squat")]
    OverheadSquat,
    /// Conventional deadlift
    Deadlift,
    /// Bench press
    #[serde(rename = "Bench Press")]
    BenchPress,
    /// Push press
    #[serde(rename = "Push Press")]
    PushPress,
    /// Strict press
    #[serde(rename = "Strict Press")]
    StrictPress,
    /// Weighted pull-up (added load only)
    #[serde(rename = "Weighted Pullup")]
    WeightedPullup,
}

impl Lift {
    /// All lifts in one-rep-max array order
    pub const ALL: [Self; ONE_RM_COUNT] = [
        Self::Snatch,
        Self::PowerSnatch,
        Self::CleanAndJerk,
        Self::PowerClean,
        Self::Clean,
        Self::Jerk,
        Self::BackSquat,
        Self::FrontSquat,
        Self::OverheadSquat,
        Self::Deadlift,
        Self::BenchPress,
        Self::PushPress,
        Self::StrictPress,
        Self::WeightedPullup,
    ];

    /// Position of this lift in the one-rep-max array
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        ONE_RM_LIFT_NAMES[self.index()]
    }

    /// Resolve a lift from its canonical name or a common alias
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(lift) = Self::ALL
            .iter()
            .copied()
            .find(|lift| lift.name().eq_ignore_ascii_case(trimmed))
        {
            return Some(lift);
        }

        match trimmed.to_lowercase().as_str() {
            "clean" | "clean only" => Some(Self::Clean),
            "jerk" | "jerk only" | "split jerk" => Some(Self::Jerk),
            "clean & jerk" | "clean and jerk" | "c&j" => Some(Self::CleanAndJerk),
            "press" | "shoulder press" => Some(Self::StrictPress),
            "weighted pull-up" | "weighted pull up" | "weighted pullups" => {
                Some(Self::WeightedPullup)
            }
            "bench" => Some(Self::BenchPress),
            _ => None,
        }
    }
}

impl fmt::Display for Lift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Periodization category a main lift trains under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LiftCategory {
    /// Snatch and clean & jerk
    #[serde(rename = "Olympic Lifts")]
    OlympicLifts,
    /// Back and front squat
    Squats,
    /// Everything pressed overhead or from the chest
    Presses,
}

impl LiftCategory {
    /// All categories in table order
    pub const ALL: [Self; 3] = [Self::OlympicLifts, Self::Squats, Self::Presses];

    /// Display name used as the table key
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OlympicLifts => "Olympic Lifts",
            Self::Squats => "Squats",
            Self::Presses => "Presses",
        }
    }

    /// Parse a table key, case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for LiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lift a training day is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MainLift {
    /// Snatch day
    Snatch,
    /// Clean and jerk day
    #[serde(rename = "Clean and Jerk")]
    CleanAndJerk,
    /// Back squat day
    #[serde(rename = "Back Squat")]
    BackSquat,
    /// Front squat day
    #[serde(rename = "Front Squat")]
    FrontSquat,
    /// Press day (strict press family)
    #[serde(alias = "Strict Press", alias = "Push Press")]
    Press,
}

impl MainLift {
    /// Name as it appears in catalog `lift_groups` and `technical_dependency`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Snatch => "Snatch",
            Self::CleanAndJerk => "Clean and Jerk",
            Self::BackSquat => "Back Squat",
            Self::FrontSquat => "Front Squat",
            Self::Press => "Press",
        }
    }

    /// Parse a main lift name; the press family collapses to `Press`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "snatch" => Some(Self::Snatch),
            "clean and jerk" | "clean & jerk" => Some(Self::CleanAndJerk),
            "back squat" => Some(Self::BackSquat),
            "front squat" => Some(Self::FrontSquat),
            "press" | "strict press" | "push press" => Some(Self::Press),
            _ => None,
        }
    }

    /// Lift whose one-rep max loads this day's main lift
    #[must_use]
    pub const fn one_rm_lift(self) -> Lift {
        match self {
            Self::Snatch => Lift::Snatch,
            Self::CleanAndJerk => Lift::CleanAndJerk,
            Self::BackSquat => Lift::BackSquat,
            Self::FrontSquat => Lift::FrontSquat,
            Self::Press => Lift::StrictPress,
        }
    }

    /// Periodization category
    #[must_use]
    pub const fn category(self) -> LiftCategory {
        match self {
            Self::Snatch | Self::CleanAndJerk => LiftCategory::OlympicLifts,
            Self::BackSquat | Self::FrontSquat => LiftCategory::Squats,
            Self::Press => LiftCategory::Presses,
        }
    }
}

impl fmt::Display for MainLift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Three-tier ability scale used for lifts and overall ability
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum AbilityLevel {
    /// Entry tier (default when data is missing)
    #[default]
    Beginner,
    /// Middle tier
    Intermediate,
    /// Top tier
    Advanced,
}

impl AbilityLevel {
    /// All levels in ascending order
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Advanced];

    /// Display name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    /// Parse a level name, case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// One tier lower, saturating at `Beginner`
    #[must_use]
    pub const fn step_down(self) -> Self {
        match self {
            Self::Beginner | Self::Intermediate => Self::Beginner,
            Self::Advanced => Self::Intermediate,
        }
    }
}

impl fmt::Display for AbilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported proficiency in a gymnastics skill
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SkillLevel {
    /// Cannot perform the skill yet
    #[default]
    #[serde(rename = "Don't have it")]
    DontHaveIt,
    /// Can perform a few reps
    Beginner,
    /// Consistent reps
    Intermediate,
    /// High volume under fatigue
    Advanced,
}

impl SkillLevel {
    /// Parse an intake answer by its leading tier word
    ///
    /// Answers look like `"Advanced (more than 15)"`; anything that does not
    /// start with a tier name is `DontHaveIt`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("Advanced") {
            Self::Advanced
        } else if trimmed.starts_with("Intermediate") {
            Self::Intermediate
        } else if trimmed.starts_with("Beginner") {
            Self::Beginner
        } else {
            Self::DontHaveIt
        }
    }

    /// Numeric rank: 0 for `DontHaveIt` up to 3 for `Advanced`
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::DontHaveIt => 0,
            Self::Beginner => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
        }
    }
}

/// Unit system the athlete records weights in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Units {
    /// Pounds
    #[default]
    #[serde(rename = "Imperial (lbs)", alias = "Imperial", alias = "lbs")]
    Imperial,
    /// Kilograms
    #[serde(rename = "Metric (kg)", alias = "Metric", alias = "kg")]
    Metric,
}

impl Units {
    /// Parse a stored units label; anything that is not metric is imperial
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        if lowered == units::METRIC_LABEL.to_lowercase()
            || lowered.starts_with("metric")
            || lowered == "kg"
        {
            Self::Metric
        } else {
            Self::Imperial
        }
    }

    /// Stored label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Imperial => units::IMPERIAL_LABEL,
            Self::Metric => units::METRIC_LABEL,
        }
    }
}

/// Immutable snapshot of an athlete's bodyweight and one-rep maxes
///
/// Missing lifts are stored as `0.0`. Negative and non-finite inputs are
/// normalized to `0.0` on construction and on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "MeasurementsRecord")]
pub struct AthleteMeasurements {
    gender: Gender,
    body_weight: f64,
    one_rms: [f64; ONE_RM_COUNT],
}

#[derive(Deserialize)]
struct MeasurementsRecord {
    #[serde(default)]
    gender: Gender,
    #[serde(default)]
    body_weight: f64,
    #[serde(default)]
    one_rms: [f64; ONE_RM_COUNT],
}

impl From<MeasurementsRecord> for AthleteMeasurements {
    fn from(record: MeasurementsRecord) -> Self {
        Self::new(record.gender, record.body_weight, record.one_rms)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl AthleteMeasurements {
    /// Build a snapshot, normalizing invalid values to zero
    #[must_use]
    pub fn new(gender: Gender, body_weight: f64, one_rms: [f64; ONE_RM_COUNT]) -> Self {
        Self {
            gender,
            body_weight: sanitize(body_weight),
            one_rms: one_rms.map(sanitize),
        }
    }

    /// Snapshot with only gender and bodyweight recorded
    #[must_use]
    pub fn empty(gender: Gender, body_weight: f64) -> Self {
        Self::new(gender, body_weight, [0.0; ONE_RM_COUNT])
    }

    /// Return a copy with one lift replaced
    #[must_use]
    pub fn with_lift(mut self, lift: Lift, value: f64) -> Self {
        self.one_rms[lift.index()] = sanitize(value);
        self
    }

    /// Athlete gender
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Bodyweight, `0.0` when unknown
    #[must_use]
    pub const fn body_weight(&self) -> f64 {
        self.body_weight
    }

    /// One-rep max for a lift, `0.0` when not recorded
    #[must_use]
    pub const fn one_rm(&self, lift: Lift) -> f64 {
        self.one_rms[lift.index()]
    }

    /// One-rep max when recorded
    #[must_use]
    pub fn recorded_one_rm(&self, lift: Lift) -> Option<f64> {
        Some(self.one_rm(lift)).filter(|value| *value > 0.0)
    }

    /// All one-rep maxes in storage order
    #[must_use]
    pub const fn one_rms(&self) -> &[f64; ONE_RM_COUNT] {
        &self.one_rms
    }
}

/// Everything the assignment engine knows about an athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthleteProfile {
    /// Athlete identifier when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub athlete_id: Option<Uuid>,
    /// Bodyweight and lifts
    pub measurements: AthleteMeasurements,
    /// Unit system for loads
    #[serde(default)]
    pub units: Units,
    /// Names of equipment the athlete has access to
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Skill name → self-reported level; absent skills count as `DontHaveIt`
    #[serde(default)]
    pub skills: BTreeMap<String, SkillLevel>,
    /// Overall ability derived from skills
    #[serde(default)]
    pub ability: AbilityLevel,
}

impl AthleteProfile {
    /// Profile with no equipment, skills or identifier
    #[must_use]
    pub fn new(measurements: AthleteMeasurements, units: Units) -> Self {
        Self {
            athlete_id: None,
            measurements,
            units,
            equipment: Vec::new(),
            skills: BTreeMap::new(),
            ability: AbilityLevel::Beginner,
        }
    }

    /// Level recorded for a skill name
    #[must_use]
    pub fn skill_level(&self, skill: &str) -> SkillLevel {
        self.skills.get(skill).copied().unwrap_or_default()
    }

    /// Level recorded for the skill at a catalog `skill_index`
    #[must_use]
    pub fn skill_level_at(&self, index: usize) -> SkillLevel {
        SKILL_NAMES
            .get(index)
            .map_or(SkillLevel::DontHaveIt, |name| self.skill_level(name))
    }

    /// Number of skills recorded at `Advanced`
    #[must_use]
    pub fn advanced_skill_count(&self) -> usize {
        self.skills
            .values()
            .filter(|level| **level == SkillLevel::Advanced)
            .count()
    }

    /// Whether the athlete owns a piece of equipment (case-insensitive)
    #[must_use]
    pub fn has_equipment(&self, name: &str) -> bool {
        self.equipment
            .iter()
            .any(|owned| owned.trim().eq_ignore_ascii_case(name.trim()))
    }
}
