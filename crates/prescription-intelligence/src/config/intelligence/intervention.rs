// ABOUTME: Intervention protocol bundles applied when a plateau is detected
// ABOUTME: Intensity ranges, volume modifiers and focus labels per protocol
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Constraint bundle for one protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtocolBundle {
    /// Lowest fraction of 1RM allowed
    pub intensity_min: f64,
    /// Highest fraction of 1RM allowed
    pub intensity_max: f64,
    /// Multiplier applied to prescribed volume
    pub volume_modifier: f64,
    /// How the exercise itself is modified
    pub exercise_modification: String,
    /// What the intervention trains
    pub focus_area: String,
}

impl ProtocolBundle {
    /// Create a bundle
    #[must_use]
    pub fn new(
        intensity_min: f64,
        intensity_max: f64,
        volume_modifier: f64,
        exercise_modification: &str,
        focus_area: &str,
    ) -> Self {
        Self {
            intensity_min,
            intensity_max,
            volume_modifier,
            exercise_modification: exercise_modification.to_owned(),
            focus_area: focus_area.to_owned(),
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.intensity_min)
            || !(0.0..=1.0).contains(&self.intensity_max)
        {
            return Err(ConfigError::ValueOutOfRange(name));
        }
        if self.intensity_min > self.intensity_max {
            return Err(ConfigError::InvalidRange(name));
        }
        if self.volume_modifier <= 0.0 {
            return Err(ConfigError::InvalidWeights(name));
        }
        Ok(())
    }
}

/// Bundles for every protocol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionConfig {
    /// Slow-tempo work for degrading movement quality
    pub tempo_work: ProtocolBundle,
    /// Lighter, higher-volume work when effort inflates
    pub intensity_reduction: ProtocolBundle,
    /// Reduced volume when set completion drops
    pub volume_progression: ProtocolBundle,
}

impl Default for InterventionConfig {
    fn default() -> Self {
        Self {
            tempo_work: ProtocolBundle::new(0.60, 0.75, 1.0, "tempo_variation", "movement_quality"),
            intensity_reduction: ProtocolBundle::new(0.65, 0.80, 1.2, "standard", "strength_base"),
            volume_progression: ProtocolBundle::new(
                0.70,
                0.85,
                0.8,
                "standard",
                "capacity_building",
            ),
        }
    }
}

impl InterventionConfig {
    /// Validate every bundle
    ///
    /// # Errors
    ///
    /// Returns an error if a range leaves [0, 1], is inverted, or a modifier is non-positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tempo_work.validate("TEMPO_WORK bundle is invalid")?;
        self.intensity_reduction
            .validate("INTENSITY_REDUCTION bundle is invalid")?;
        self.volume_progression
            .validate("VOLUME_PROGRESSION bundle is invalid")
    }
}
