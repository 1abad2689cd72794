// ABOUTME: Exercise assignment configuration: frequency caps, selection weights and load rules
// ABOUTME: Program-note defaults, deload multipliers, barbell floors and plate rounding increments
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Minimum loaded-barbell weight per gender and unit system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarbellFloors {
    /// Men, pounds
    pub male_lbs: f64,
    /// Women, pounds
    pub female_lbs: f64,
    /// Men, kilograms
    pub male_kg: f64,
    /// Women, kilograms
    pub female_kg: f64,
}

impl Default for BarbellFloors {
    fn default() -> Self {
        Self {
            male_lbs: 45.0,
            female_lbs: 35.0,
            male_kg: 20.0,
            female_kg: 15.0,
        }
    }
}

/// Exercises per block when the caller does not fix a count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockCounts {
    /// SKILLS
    pub skills: usize,
    /// TECHNICAL WORK on non-Olympic days
    pub technical_default: usize,
    /// STRENGTH AND POWER
    pub strength: usize,
    /// ACCESSORIES
    pub accessories: usize,
}

impl Default for BlockCounts {
    fn default() -> Self {
        Self {
            skills: 2,
            technical_default: 2,
            strength: 1,
            accessories: 2,
        }
    }
}

/// Exercise assignment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentConfig {
    /// Times an exercise may appear per week in SKILLS and ACCESSORIES
    pub max_weekly_frequency: u32,
    /// Selection weight when the catalog row has none
    pub default_selection_weight: f64,
    /// Advanced skills needed before Elite exercises unlock
    pub elite_advanced_skill_count: usize,
    /// Multiplier applied to sets and reps on deload weeks
    pub deload_volume_multiplier: f64,
    /// Fraction of 1RM used when notes give no percentage
    pub default_percent_1rm: f64,
    /// Fraction of 1RM used on deload weeks when notes give no percentage
    pub deload_percent_1rm: f64,
    /// Sets when no program note exists for the level
    pub default_sets: u32,
    /// Reps when no program note exists for the level
    pub default_reps: u32,
    /// Longest note kept verbatim
    pub max_note_length: usize,
    /// Plate increment in pounds
    pub imperial_increment: f64,
    /// Plate increment in kilograms
    pub metric_increment: f64,
    /// Barbell floors
    pub barbell_floors: BarbellFloors,
    /// Block sizes
    pub block_counts: BlockCounts,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            max_weekly_frequency: 2,
            default_selection_weight: 5.0,
            elite_advanced_skill_count: 10,
            deload_volume_multiplier: 0.6,
            default_percent_1rm: 0.65,
            deload_percent_1rm: 0.5,
            default_sets: 3,
            default_reps: 10,
            max_note_length: 100,
            imperial_increment: 5.0,
            metric_increment: 2.5,
            barbell_floors: BarbellFloors::default(),
            block_counts: BlockCounts::default(),
        }
    }
}

impl AssignmentConfig {
    /// Validate increments, multipliers and weights
    ///
    /// # Errors
    ///
    /// Returns an error if an increment or weight is non-positive or a fraction leaves (0, 1]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.imperial_increment <= 0.0 || self.metric_increment <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "rounding increments must be > 0",
            ));
        }
        if self.default_selection_weight <= 0.0 {
            return Err(ConfigError::InvalidWeights(
                "default_selection_weight must be > 0",
            ));
        }
        for fraction in [
            self.deload_volume_multiplier,
            self.default_percent_1rm,
            self.deload_percent_1rm,
        ] {
            if fraction <= 0.0 || fraction > 1.0 {
                return Err(ConfigError::ValueOutOfRange(
                    "deload multiplier and default percentages must be in (0, 1]",
                ));
            }
        }
        if self.max_note_length < 4 {
            return Err(ConfigError::ValueOutOfRange("max_note_length must be >= 4"));
        }
        if self.default_sets == 0 || self.default_reps == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_sets and default_reps must be >= 1",
            ));
        }
        Ok(())
    }
}
