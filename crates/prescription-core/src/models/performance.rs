// ABOUTME: Performance log entry model recorded after each prescribed exercise
// ABOUTME: Keeps user-entered text for load, sets and reps with lenient typed accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::parsing::{leading_u32, positive_weight};

/// One logged exercise performance
///
/// `weight_time`, `sets` and `reps` are kept exactly as the athlete typed
/// them. Use the typed accessors for arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceLogEntry {
    /// Exercise name as prescribed
    pub exercise_name: String,
    /// Load or duration text ("225", "225 lbs", "45s")
    #[serde(default)]
    pub weight_time: String,
    /// Sets text
    #[serde(default)]
    pub sets: String,
    /// Reps text
    #[serde(default)]
    pub reps: String,
    /// Rate of perceived exertion, 1-10
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpe: Option<f64>,
    /// Numeric completion quality, 1-4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_quality: Option<f64>,
    /// Letter grade A-D used when no numeric quality was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_grade: Option<String>,
    /// When the performance was logged
    pub logged_at: DateTime<Utc>,
    /// Training block the exercise belonged to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<String>,
}

impl PerformanceLogEntry {
    /// Create an entry with only name, load and timestamp set
    pub fn new(
        exercise_name: impl Into<String>,
        weight_time: impl Into<String>,
        logged_at: DateTime<Utc>,
    ) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            weight_time: weight_time.into(),
            sets: String::new(),
            reps: String::new(),
            rpe: None,
            completion_quality: None,
            quality_grade: None,
            logged_at,
            block: None,
        }
    }

    /// Load used, `0.0` when bodyweight or unparseable
    #[must_use]
    pub fn weight(&self) -> f64 {
        positive_weight(&self.weight_time).unwrap_or(0.0)
    }

    /// Whether a positive load was recorded
    #[must_use]
    pub fn is_weighted(&self) -> bool {
        self.weight() > 0.0
    }

    /// Parsed set count, `0` when absent
    #[must_use]
    pub fn set_count(&self) -> u32 {
        leading_u32(&self.sets).unwrap_or(0)
    }

    /// Parsed rep count, `0` when absent
    #[must_use]
    pub fn rep_count(&self) -> u32 {
        leading_u32(&self.reps).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_accessors_parse_leniently() {
        let mut entry = PerformanceLogEntry::new("Back Squat", "225 lbs", Utc::now());
        entry.sets = "4".to_owned();
        entry.reps = "5 reps".to_owned();

        assert!((entry.weight() - 225.0).abs() < f64::EPSILON);
        assert!(entry.is_weighted());
        assert_eq!(entry.set_count(), 4);
        assert_eq!(entry.rep_count(), 5);
    }

    #[test]
    fn test_bodyweight_entry_has_zero_weight() {
        let entry = PerformanceLogEntry::new("Pull-ups", "BW", Utc::now());
        assert!(entry.weight().abs() < f64::EPSILON);
        assert!(!entry.is_weighted());
        assert_eq!(entry.set_count(), 0);
    }
}
