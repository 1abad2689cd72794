// ABOUTME: Overall athlete ability classification from self-reported gymnastics skill levels
// ABOUTME: Counts Advanced and Intermediate skills against configurable thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use prescription_core::models::{AbilityLevel, SkillLevel};
use serde::{Deserialize, Serialize};

use crate::config::intelligence::AbilityThresholds;
use crate::config::IntelligenceConfig;

/// Classification result with the counts that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityAssessment {
    /// Overall ability
    pub ability: AbilityLevel,
    /// Skills recorded at Advanced
    pub advanced_count: usize,
    /// Skills recorded at Intermediate
    pub intermediate_count: usize,
}

/// Overall ability classifier
#[derive(Debug, Clone)]
pub struct AbilityClassifier {
    thresholds: AbilityThresholds,
}

impl Default for AbilityClassifier {
    fn default() -> Self {
        Self::new(IntelligenceConfig::global().ability.clone())
    }
}

impl AbilityClassifier {
    /// Create a classifier with explicit thresholds
    #[must_use]
    pub const fn new(thresholds: AbilityThresholds) -> Self {
        Self { thresholds }
    }

    /// Classify from skill levels
    #[must_use]
    pub fn determine_ability<'a>(
        &self,
        skills: impl IntoIterator<Item = &'a SkillLevel>,
    ) -> AbilityAssessment {
        let (advanced_count, intermediate_count) =
            skills
                .into_iter()
                .fold((0, 0), |(advanced, intermediate), level| match level {
                    SkillLevel::Advanced => (advanced + 1, intermediate),
                    SkillLevel::Intermediate => (advanced, intermediate + 1),
                    SkillLevel::Beginner | SkillLevel::DontHaveIt => (advanced, intermediate),
                });

        let ability = if advanced_count >= self.thresholds.advanced_skills_for_advanced {
            AbilityLevel::Advanced
        } else if advanced_count >= self.thresholds.advanced_skills_for_intermediate
            || intermediate_count >= self.thresholds.intermediate_skills_for_intermediate
        {
            AbilityLevel::Intermediate
        } else {
            AbilityLevel::Beginner
        };

        AbilityAssessment {
            ability,
            advanced_count,
            intermediate_count,
        }
    }

    /// Classify a skill map as stored on a profile
    #[must_use]
    pub fn classify_skills(&self, skills: &BTreeMap<String, SkillLevel>) -> AbilityAssessment {
        self.determine_ability(skills.values())
    }
}
