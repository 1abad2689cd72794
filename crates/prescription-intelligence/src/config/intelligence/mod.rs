// ABOUTME: Prescription intelligence configuration for ratios, assignment, plateaus and interventions
// ABOUTME: Orchestrates domain-specific configs and provides unified validation, env overrides and a global instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Intelligence Configuration Module
//!
//! Type-safe configuration for every threshold the prescription engines
//! compare against. Values start from coaching defaults, may be overridden
//! through `PRESCRIPTION_*` environment variables, and are validated before
//! use.
//!
//! # Module Structure
//!
//! - `ratios` - Weakness rules, technical fault checks, strength standards
//! - `assignment` - Frequency caps, selection weights, load rounding
//! - `plateau` - Plateau signal cutoffs and intervention gates
//! - `intervention` - Protocol constraint bundles
//! - `ability` - Skill-count thresholds for overall ability

pub mod ability;
pub mod assignment;
pub mod error;
pub mod intervention;
pub mod plateau;
pub mod ratios;

pub use ability::AbilityThresholds;
pub use assignment::{AssignmentConfig, BarbellFloors, BlockCounts};
pub use error::ConfigError;
pub use intervention::{InterventionConfig, ProtocolBundle};
pub use plateau::PlateauConfig;
pub use ratios::{LevelBand, RatioThresholds, StrengthStandards, TechnicalChecks, WeaknessThresholds};

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static INTELLIGENCE_CONFIG: OnceLock<IntelligenceConfig> = OnceLock::new();

/// Main intelligence configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntelligenceConfig {
    /// Ratio engine thresholds
    pub ratios: RatioThresholds,
    /// Exercise assignment rules
    pub assignment: AssignmentConfig,
    /// Plateau detection cutoffs
    pub plateau: PlateauConfig,
    /// Intervention protocol bundles
    pub intervention: InterventionConfig,
    /// Overall ability thresholds
    pub ability: AbilityThresholds,
}

impl IntelligenceConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        INTELLIGENCE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load intelligence config: {e}, using defaults");
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Apply environment variable overrides
        config = config.apply_env_overrides()?;

        // Validate the final configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ratios.validate()?;
        self.assignment.validate()?;
        self.plateau.validate()?;
        self.intervention.validate()?;
        self.ability.validate()?;

        if self.plateau.max_window * 2 < self.plateau.min_logs {
            return Err(ConfigError::InvalidRange(
                "plateau max_window must cover half of min_logs",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .trim()
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Ratio engine overrides
        Self::apply_env_var(
            "PRESCRIPTION_LEG_STRENGTH_RATIO",
            &mut self.ratios.weakness.leg_strength_deadlift_ratio,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_TECHNICAL_CAP",
            &mut self.ratios.technical_cap,
        )?;

        // Assignment overrides
        Self::apply_env_var(
            "PRESCRIPTION_MAX_WEEKLY_FREQUENCY",
            &mut self.assignment.max_weekly_frequency,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_DEFAULT_SELECTION_WEIGHT",
            &mut self.assignment.default_selection_weight,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_IMPERIAL_INCREMENT",
            &mut self.assignment.imperial_increment,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_METRIC_INCREMENT",
            &mut self.assignment.metric_increment,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_DELOAD_MULTIPLIER",
            &mut self.assignment.deload_volume_multiplier,
        )?;

        // Plateau overrides
        Self::apply_env_var(
            "PRESCRIPTION_PLATEAU_MIN_LOGS",
            &mut self.plateau.min_logs,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_PLATEAU_MIN_SIGNALS",
            &mut self.plateau.min_signals,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_PLATEAU_SEVERITY_THRESHOLD",
            &mut self.plateau.severity_threshold,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_PLATEAU_WINDOW_DAYS",
            &mut self.plateau.analysis_window_days,
        )?;
        Self::apply_env_var(
            "PRESCRIPTION_INTERVENTION_WEEKS",
            &mut self.plateau.intervention_duration_weeks,
        )?;

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(IntelligenceConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_band_rejected() {
        let mut config = IntelligenceConfig::default();
        config.ratios.standards.male_back_squat = LevelBand::new(2.0, 1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_zero_increment_rejected() {
        let mut config = IntelligenceConfig::default();
        config.assignment.metric_increment = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValueOutOfRange(_))
        ));
    }
}
