// ABOUTME: Overall ability classification thresholds based on gymnastics skill counts
// ABOUTME: Advanced-skill and intermediate-skill counts that promote an athlete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Skill-count thresholds for overall ability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityThresholds {
    /// Advanced skills needed for Advanced
    pub advanced_skills_for_advanced: usize,
    /// Advanced skills needed for Intermediate
    pub advanced_skills_for_intermediate: usize,
    /// Intermediate skills needed for Intermediate
    pub intermediate_skills_for_intermediate: usize,
}

impl Default for AbilityThresholds {
    fn default() -> Self {
        Self {
            advanced_skills_for_advanced: 8,
            advanced_skills_for_intermediate: 4,
            intermediate_skills_for_intermediate: 10,
        }
    }
}

impl AbilityThresholds {
    /// Validate ordering
    ///
    /// # Errors
    ///
    /// Returns an error if the Intermediate cutoff is not below the Advanced cutoff
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.advanced_skills_for_intermediate >= self.advanced_skills_for_advanced {
            return Err(ConfigError::InvalidRange(
                "advanced_skills_for_intermediate must be < advanced_skills_for_advanced",
            ));
        }
        Ok(())
    }
}
