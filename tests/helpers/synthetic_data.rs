// ABOUTME: Synthetic performance log generator for plateau detection testing
// ABOUTME: Creates progressing, stalled and overreaching training histories with fixed signal content
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pierre_prescription_engine::models::PerformanceLogEntry;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Sessions in every generated pattern
pub const PATTERN_SESSIONS: usize = 12;

/// Days between generated sessions
pub const SESSION_SPACING_DAYS: i64 = 3;

/// Training histories with known plateau signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogPattern {
    /// Load climbs every session at steady effort: no signals
    Progressing,
    /// Flat load with rising RPE: RPE inflation and stagnation
    RpeInflation,
    /// Rising load with falling quality and dropped sets: quality and volume
    Overreaching,
    /// Bodyweight work getting harder: RPE inflation and stagnation
    BodyweightStall,
}

/// Builder for deterministic synthetic performance logs
///
/// Signal-bearing fields (load, RPE, quality, sets) follow fixed curves per
/// pattern; the seeded RNG only varies rep counts and ordering, which the
/// detector does not read.
#[derive(Debug, Clone)]
pub struct SyntheticLogBuilder {
    rng: ChaCha8Rng,
    start: DateTime<Utc>,
}

impl SyntheticLogBuilder {
    /// Create a builder with a deterministic seed
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            start: Utc.with_ymd_and_hms(2025, 1, 6, 17, 0, 0).unwrap(),
        }
    }

    /// Move the first session
    #[must_use]
    pub fn starting(mut self, start: DateTime<Utc>) -> Self {
        self.start = start;
        self
    }

    /// Instant of the last session of a pattern
    #[must_use]
    pub fn last_session(&self) -> DateTime<Utc> {
        self.start + Duration::days(SESSION_SPACING_DAYS * (PATTERN_SESSIONS as i64 - 1))
    }

    /// Generate one exercise's history in chronological order
    #[must_use]
    pub fn generate_pattern(&mut self, exercise: &str, pattern: LogPattern) -> Vec<PerformanceLogEntry> {
        let (weights, rpes, qualities, sets) = curves(pattern);
        (0..PATTERN_SESSIONS)
            .map(|i| {
                let logged_at = self.start + Duration::days(SESSION_SPACING_DAYS * i as i64);
                let mut entry = PerformanceLogEntry::new(exercise, weights[i].clone(), logged_at);
                entry.sets = sets[i].to_string();
                entry.reps = self.rng.gen_range(3..=8).to_string();
                entry.rpe = Some(rpes[i]);
                entry.completion_quality = Some(qualities[i]);
                entry
            })
            .collect()
    }

    /// Shuffle logs in place
    pub fn shuffle(&mut self, logs: &mut [PerformanceLogEntry]) {
        logs.shuffle(&mut self.rng);
    }
}

type Curves = (Vec<String>, Vec<f64>, Vec<f64>, Vec<u32>);

fn curves(pattern: LogPattern) -> Curves {
    let climbing: Vec<String> = (0..PATTERN_SESSIONS)
        .map(|i| (200 + 5 * i).to_string())
        .collect();

    match pattern {
        LogPattern::Progressing => (
            climbing,
            vec![7.0; PATTERN_SESSIONS],
            vec![3.5; PATTERN_SESSIONS],
            vec![5; PATTERN_SESSIONS],
        ),
        LogPattern::RpeInflation => (
            vec!["225".to_owned(); PATTERN_SESSIONS],
            vec![6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 7.0, 7.0, 8.0, 8.0, 8.0, 9.0],
            vec![3.0; PATTERN_SESSIONS],
            vec![5; PATTERN_SESSIONS],
        ),
        LogPattern::Overreaching => (
            climbing,
            vec![7.0; PATTERN_SESSIONS],
            vec![4.0, 4.0, 4.0, 4.0, 3.5, 3.5, 3.0, 3.0, 2.5, 2.5, 2.0, 2.0],
            vec![5, 5, 5, 5, 5, 5, 4, 4, 4, 3, 3, 3],
        ),
        LogPattern::BodyweightStall => (
            vec!["BW".to_owned(); PATTERN_SESSIONS],
            vec![6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 7.0, 7.0, 7.0, 8.0, 8.0, 8.0],
            vec![3.0; PATTERN_SESSIONS],
            vec![4; PATTERN_SESSIONS],
        ),
    }
}
