// ABOUTME: Exercise catalog and prescription models
// ABOUTME: TrainingBlock, DifficultyLevel, per-level ProgramNotes, ExerciseCatalogEntry and ExercisePrescription
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{equipment, NONE_MARKER};

/// Section of a training day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainingBlock {
    /// Gymnastics skill practice
    #[serde(rename = "SKILLS")]
    Skills,
    /// Drills supporting the main lift
    #[serde(rename = "TECHNICAL WORK")]
    TechnicalWork,
    /// Periodized main lift work
    #[serde(rename = "STRENGTH AND POWER")]
    StrengthAndPower,
    /// Weakness-targeted accessory work
    #[serde(rename = "ACCESSORIES")]
    Accessories,
    /// Conditioning, assembled elsewhere
    #[serde(rename = "METCONS")]
    Metcons,
}

impl TrainingBlock {
    /// All blocks in day order
    pub const ALL: [Self; 5] = [
        Self::Skills,
        Self::TechnicalWork,
        Self::StrengthAndPower,
        Self::Accessories,
        Self::Metcons,
    ];

    /// Stored block name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Skills => "SKILLS",
            Self::TechnicalWork => "TECHNICAL WORK",
            Self::StrengthAndPower => "STRENGTH AND POWER",
            Self::Accessories => "ACCESSORIES",
            Self::Metcons => "METCONS",
        }
    }

    /// Parse a stored block name, case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|block| block.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for TrainingBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Catalog difficulty tag, also used as the effective level for program notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyLevel {
    /// Scaled entry point for athletes lacking a skill
    Novice,
    /// Beginner
    Beginner,
    /// Intermediate
    Intermediate,
    /// Advanced
    Advanced,
    /// Elite, gated on broad advanced proficiency
    Elite,
    /// Suitable for every level
    All,
}

impl DifficultyLevel {
    /// Stored name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Novice => "Novice",
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Elite => "Elite",
            Self::All => "All",
        }
    }

    /// Parse a stored name, case-insensitively
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        [
            Self::Novice,
            Self::Beginner,
            Self::Intermediate,
            Self::Advanced,
            Self::Elite,
            Self::All,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(raw.trim()))
    }

    /// Rank compared against a skill rank: Elite 4 down to 0 for Novice/All
    #[must_use]
    pub const fn skill_rank(self) -> u8 {
        match self {
            Self::Elite => 4,
            Self::Advanced => 3,
            Self::Intermediate => 2,
            Self::Beginner => 1,
            Self::Novice | Self::All => 0,
        }
    }
}

impl fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Program note for one level
///
/// Current rows store compact strings such as `"5x3,85%"`; older rows
/// store the fields separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgramNote {
    /// Compact `"SxR,P%"`, `"SxR"` or `"SxT"` text
    Text(String),
    /// Field-per-value legacy format
    Structured(StructuredNote),
}

/// Legacy structured program note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredNote {
    /// Set count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    /// Rep count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Percentage of one-rep max, 0-100
    #[serde(
        default,
        rename = "percent1RM",
        alias = "percent_1rm",
        skip_serializing_if = "Option::is_none"
    )]
    pub percent_1rm: Option<f64>,
    /// Load or duration text
    #[serde(
        default,
        rename = "weightTime",
        alias = "weight_time",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_time: Option<String>,
    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Program notes keyed by level name ("Beginner", "Elite", ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramNotes(pub BTreeMap<String, ProgramNote>);

impl ProgramNotes {
    /// Note for a level name
    #[must_use]
    pub fn for_level(&self, level: &str) -> Option<&ProgramNote> {
        self.0.get(level)
    }

    /// Whether no level has a note
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One row of the exercise catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseCatalogEntry {
    /// Exercise name
    pub name: String,
    /// Equipment the catalog lists as required
    #[serde(default)]
    pub required_equipment: Vec<String>,
    /// First prerequisite ("None", "<skill>: <level>", "<Lift> 1RM > <value>")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite_1: Option<String>,
    /// Second prerequisite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite_2: Option<String>,
    /// Usable in the SKILLS block
    #[serde(default)]
    pub can_be_skills: bool,
    /// Usable in the TECHNICAL WORK block
    #[serde(default)]
    pub can_be_technical: bool,
    /// Usable in the STRENGTH AND POWER block
    #[serde(default)]
    pub can_be_strength: bool,
    /// Usable in the ACCESSORIES block
    #[serde(default)]
    pub can_be_accessories: bool,
    /// Can be done with no equipment
    #[serde(default)]
    pub bodyweight_accessible: bool,
    /// Main lifts this exercise can stand in for ("All" matches every lift)
    #[serde(default)]
    pub lift_groups: Vec<String>,
    /// Index into the athlete's skill list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_index: Option<i32>,
    /// Difficulty tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<DifficultyLevel>,
    /// Harder exercise this one scales
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaling_for: Option<String>,
    /// Exercises that scale this one
    #[serde(default)]
    pub scaling_options: Vec<String>,
    /// Main lifts this drill supports
    #[serde(default)]
    pub technical_dependency: Vec<String>,
    /// Accessory category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory_category: Option<String>,
    /// Lift whose one-rep max loads this exercise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_rm_reference: Option<String>,
    /// Per-level sets/reps/percent notes
    #[serde(default)]
    pub program_notes: ProgramNotes,
    /// Coaching cues
    #[serde(default)]
    pub performance_cues: Vec<String>,
    /// Selection weight for beginners
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beginner_weight: Option<f64>,
    /// Selection weight for intermediates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_weight: Option<f64>,
    /// Selection weight for advanced athletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advanced_weight: Option<f64>,
    /// Fallback selection weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_weight: Option<f64>,
}

fn meaningful(value: Option<&String>) -> Option<&str> {
    value
        .map(|text| text.trim())
        .filter(|text| !text.is_empty() && *text != NONE_MARKER)
}

impl ExerciseCatalogEntry {
    /// Create an entry with just a name; flags default to false
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Whether the entry may be used in `block`
    #[must_use]
    pub const fn usable_in(&self, block: TrainingBlock) -> bool {
        match block {
            TrainingBlock::Skills => self.can_be_skills,
            TrainingBlock::TechnicalWork => self.can_be_technical,
            TrainingBlock::StrengthAndPower => self.can_be_strength,
            TrainingBlock::Accessories => self.can_be_accessories,
            TrainingBlock::Metcons => false,
        }
    }

    /// Prerequisites that are set and not "None"
    pub fn prerequisites(&self) -> impl Iterator<Item = &str> {
        meaningful(self.prerequisite_1.as_ref())
            .into_iter()
            .chain(meaningful(self.prerequisite_2.as_ref()))
    }

    /// Accessory category unless empty or "None"
    #[must_use]
    pub fn accessory_category(&self) -> Option<&str> {
        meaningful(self.accessory_category.as_ref())
    }

    /// One-rep-max reference unless empty or "None"
    #[must_use]
    pub fn one_rm_reference(&self) -> Option<&str> {
        meaningful(self.one_rm_reference.as_ref())
    }

    /// Scaling target unless empty or "None"
    #[must_use]
    pub fn scaling_for(&self) -> Option<&str> {
        meaningful(self.scaling_for.as_ref())
    }

    /// Whether the catalog lists a barbell as required
    #[must_use]
    pub fn requires_barbell(&self) -> bool {
        self.required_equipment
            .iter()
            .any(|item| item.eq_ignore_ascii_case(equipment::BARBELL))
    }
}

/// One prescribed row of a training day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePrescription {
    /// Exercise name
    pub name: String,
    /// Set count
    pub sets: u32,
    /// Rep count, absent for timed work
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    /// Load ("185") or duration ("45s"); empty when neither applies
    #[serde(default)]
    pub weight_time: String,
    /// Coaching note
    #[serde(default)]
    pub notes: String,
}

impl ExercisePrescription {
    /// Build a prescription row
    pub fn new(
        name: impl Into<String>,
        sets: u32,
        reps: Option<u32>,
        weight_time: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            sets,
            reps,
            weight_time: weight_time.into(),
            notes: notes.into(),
        }
    }
}
