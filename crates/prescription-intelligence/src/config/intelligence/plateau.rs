// ABOUTME: Plateau detection configuration: history requirements, window sizes and signal cutoffs
// ABOUTME: Severity and signal-count gates that decide when an intervention is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plateau Detection Configuration
//!
//! The signal-count gate and the severity gate are independent knobs. With
//! four equally weighted signals they agree at the default 2-of-4 boundary.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Plateau detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateauConfig {
    /// Fewest logs that can be analyzed
    pub min_logs: usize,
    /// Largest comparison window (sessions)
    pub max_window: usize,
    /// Sessions examined for stagnation
    pub stagnation_sessions: usize,
    /// Fewest sessions the stagnation check needs
    pub min_stagnation_sessions: usize,
    /// Weighted entries each window needs before RPE is compared against load
    pub min_weighted_per_window: usize,
    /// RPE assumed when none was logged
    pub default_rpe: f64,
    /// Largest relative load increase still counted as "same load"
    pub rpe_max_weight_change: f64,
    /// RPE rise flagged on weighted work
    pub rpe_rise_weighted: f64,
    /// RPE rise flagged on bodyweight work
    pub rpe_rise_bodyweight: f64,
    /// Quality score used for unknown grades
    pub unknown_grade_score: f64,
    /// Quality drop flagged
    pub quality_drop: f64,
    /// Relative drop in mean sets flagged
    pub volume_drop: f64,
    /// Relative gain in max load below which progress has stalled
    pub stagnation_min_gain: f64,
    /// Late-minus-early mean RPE flagged on bodyweight work
    pub stagnation_rpe_rise: f64,
    /// Weighted entries needed for the load-based stagnation check
    pub min_weighted_for_stagnation: usize,
    /// Signals that must agree
    pub min_signals: usize,
    /// Severity that must be exceeded
    pub severity_threshold: f64,
    /// Days of history analyzed per athlete
    pub analysis_window_days: i64,
    /// Planned length of an intervention, in weeks
    pub intervention_duration_weeks: u32,
}

impl Default for PlateauConfig {
    fn default() -> Self {
        Self {
            min_logs: 6,
            max_window: 6,
            stagnation_sessions: 8,
            min_stagnation_sessions: 4,
            min_weighted_per_window: 2,
            default_rpe: 5.0,
            rpe_max_weight_change: 0.05,
            rpe_rise_weighted: 0.5,
            rpe_rise_bodyweight: 1.0,
            unknown_grade_score: 2.5,
            quality_drop: 0.5,
            volume_drop: 0.15,
            stagnation_min_gain: 0.025,
            stagnation_rpe_rise: 0.5,
            min_weighted_for_stagnation: 4,
            min_signals: 2,
            severity_threshold: 0.4,
            analysis_window_days: 56,
            intervention_duration_weeks: 2,
        }
    }
}

impl PlateauConfig {
    /// Validate window sizes and gates
    ///
    /// # Errors
    ///
    /// Returns an error if windows cannot be formed or a gate is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_logs < 2 {
            return Err(ConfigError::ValueOutOfRange("plateau min_logs must be >= 2"));
        }
        if self.max_window == 0 {
            return Err(ConfigError::ValueOutOfRange("plateau max_window must be >= 1"));
        }
        if self.min_stagnation_sessions < 2
            || self.min_stagnation_sessions > self.stagnation_sessions
        {
            return Err(ConfigError::InvalidRange(
                "min_stagnation_sessions must be in 2..=stagnation_sessions",
            ));
        }
        if self.min_weighted_per_window == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_weighted_per_window must be >= 1",
            ));
        }
        if self.min_weighted_for_stagnation < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_weighted_for_stagnation must be >= 2",
            ));
        }
        if !(0.0..=1.0).contains(&self.severity_threshold) {
            return Err(ConfigError::ValueOutOfRange(
                "severity_threshold must be in [0, 1]",
            ));
        }
        if self.min_signals == 0 || self.min_signals > 4 {
            return Err(ConfigError::ValueOutOfRange("min_signals must be in 1..=4"));
        }
        if self.analysis_window_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "analysis_window_days must be > 0",
            ));
        }
        if self.volume_drop <= 0.0 || self.volume_drop >= 1.0 {
            return Err(ConfigError::ValueOutOfRange("volume_drop must be in (0, 1)"));
        }
        Ok(())
    }
}
