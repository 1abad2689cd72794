// ABOUTME: Ratio engine thresholds: weakness rules, technical fault checks and strength standards
// ABOUTME: Gender-specific bodyweight bands for back squat and press ability levels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Ratio Engine Configuration
//!
//! Every cutoff the ratio engine compares against. Defaults reflect the
//! coaching standards the prescription tables were built around.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Lower bounds (inclusive) for the Intermediate and Advanced tiers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBand {
    /// Ratio at or above which an athlete is Intermediate
    pub intermediate_min: f64,
    /// Ratio at or above which an athlete is Advanced
    pub advanced_min: f64,
}

impl LevelBand {
    /// Create a band
    #[must_use]
    pub const fn new(intermediate_min: f64, advanced_min: f64) -> Self {
        Self {
            intermediate_min,
            advanced_min,
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.intermediate_min <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(name));
        }
        if self.intermediate_min >= self.advanced_min {
            return Err(ConfigError::InvalidRange(name));
        }
        Ok(())
    }
}

/// Bodyweight-ratio standards per lift and gender
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthStandards {
    /// Back squat ÷ bodyweight, men
    pub male_back_squat: LevelBand,
    /// Back squat ÷ bodyweight, women
    pub female_back_squat: LevelBand,
    /// Bench press ÷ bodyweight, men
    pub male_press: LevelBand,
    /// Bench press ÷ bodyweight, women
    pub female_press: LevelBand,
}

impl Default for StrengthStandards {
    fn default() -> Self {
        Self {
            male_back_squat: LevelBand::new(1.25, 1.85),
            female_back_squat: LevelBand::new(0.75, 1.2),
            male_press: LevelBand::new(0.9, 1.4),
            female_press: LevelBand::new(0.7, 1.0),
        }
    }
}

/// Per-ratio pass marks for technical fault counting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalChecks {
    /// Snatch ÷ back squat must reach this
    pub snatch_back_squat_min: f64,
    /// Power snatch ÷ snatch must not exceed this
    pub power_snatch_snatch_max: f64,
    /// Overhead squat ÷ back squat must reach this
    pub overhead_squat_back_squat_min: f64,
    /// Clean and jerk ÷ back squat must reach this
    pub clean_jerk_back_squat_min: f64,
    /// Power clean ÷ clean must not exceed this
    pub power_clean_clean_max: f64,
    /// Jerk ÷ clean must reach this
    pub jerk_clean_min: f64,
}

impl Default for TechnicalChecks {
    fn default() -> Self {
        Self {
            snatch_back_squat_min: 0.62,
            power_snatch_snatch_max: 0.88,
            overhead_squat_back_squat_min: 0.65,
            clean_jerk_back_squat_min: 0.74,
            power_clean_clean_max: 0.88,
            jerk_clean_min: 0.9,
        }
    }
}

/// Weakness rules that drive accessory category selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaknessThresholds {
    /// Deadlift ÷ back squat at or above this means legs lag the hinge
    pub leg_strength_deadlift_ratio: f64,
    /// Bench ÷ bodyweight below this flags pressing
    pub pressing_bench_body_weight_min: f64,
    /// Push press ÷ strict press above this flags pressing
    pub pressing_push_strict_max: f64,
    /// Weighted pull-up ÷ bench below this flags pulling
    pub pulling_pullup_bench_min: f64,
    /// Weighted pull-up ÷ bodyweight below this flags pulling
    pub pulling_pullup_body_weight_min: f64,
}

impl Default for WeaknessThresholds {
    fn default() -> Self {
        Self {
            leg_strength_deadlift_ratio: 1.15,
            pressing_bench_body_weight_min: 0.9,
            pressing_push_strict_max: 1.45,
            pulling_pullup_bench_min: 0.4,
            pulling_pullup_body_weight_min: 0.33,
        }
    }
}

/// Top-level ratio engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioThresholds {
    /// Upper clamp for lift ÷ lift technical ratios
    pub technical_cap: f64,
    /// Decimal places kept on every ratio
    pub rounding_decimals: u32,
    /// Weakness rules
    pub weakness: WeaknessThresholds,
    /// Fault checks
    pub technical: TechnicalChecks,
    /// Front squat ÷ back squat at or above this shifts focus to the overhead complex
    pub front_squat_overhead_complex_min: f64,
    /// Push press ÷ strict press at or below this calls for stability work
    pub press_stability_max: f64,
    /// Bodyweight standards
    pub standards: StrengthStandards,
    /// Snatch ÷ bodyweight that lifts a beginner squatter's snatch to Intermediate
    pub snatch_body_weight_promotion: f64,
    /// Clean and jerk ÷ bodyweight that lifts a beginner squatter's clean and jerk
    pub clean_jerk_body_weight_promotion: f64,
}

impl Default for RatioThresholds {
    fn default() -> Self {
        Self {
            technical_cap: 1.0,
            rounding_decimals: 3,
            weakness: WeaknessThresholds::default(),
            technical: TechnicalChecks::default(),
            front_squat_overhead_complex_min: 0.82,
            press_stability_max: 1.65,
            standards: StrengthStandards::default(),
            snatch_body_weight_promotion: 0.5,
            clean_jerk_body_weight_promotion: 0.6,
        }
    }
}

impl RatioThresholds {
    /// Validate ordering and positivity
    ///
    /// # Errors
    ///
    /// Returns an error if a band is inverted or a cutoff is non-positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.technical_cap <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("technical_cap must be > 0"));
        }
        if self.rounding_decimals > 6 {
            return Err(ConfigError::ValueOutOfRange(
                "rounding_decimals must be <= 6",
            ));
        }
        if self.weakness.leg_strength_deadlift_ratio <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "leg_strength_deadlift_ratio must be > 0",
            ));
        }
        self.standards
            .male_back_squat
            .validate("male back squat: intermediate_min must be < advanced_min")?;
        self.standards
            .female_back_squat
            .validate("female back squat: intermediate_min must be < advanced_min")?;
        self.standards
            .male_press
            .validate("male press: intermediate_min must be < advanced_min")?;
        self.standards
            .female_press
            .validate("female press: intermediate_min must be < advanced_min")?;
        Ok(())
    }
}
