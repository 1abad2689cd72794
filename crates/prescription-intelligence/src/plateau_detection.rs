// ABOUTME: Plateau detection over a rolling window of performance logs for one exercise
// ABOUTME: Computes RPE inflation, quality degradation, volume intolerance and stagnation signals with severity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Plateau detection
//!
//! Each exercise's logs are sorted chronologically and split into a recent
//! window and the window immediately before it. Four independent signals
//! compare the two windows (or the two halves of the latest sessions for
//! stagnation). An intervention is recommended when enough signals fire and
//! the resulting severity clears the configured threshold.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use prescription_core::models::PerformanceLogEntry;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::intelligence::PlateauConfig;
use crate::config::IntelligenceConfig;
use crate::intervention::{InterventionConstraints, InterventionProtocol, InterventionSelector};

/// Number of plateau signals contributing to severity
const SIGNAL_COUNT: usize = 4;

/// Tolerance applied when averaged values are compared against thresholds
const THRESHOLD_TOLERANCE: f64 = 1e-9;

/// Outcome of a plateau analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlateauStatus {
    /// Too few logs to judge; no signals are reported
    InsufficientData,
    /// Signals were computed
    Analyzed,
}

/// The four plateau signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateauSignals {
    /// Same work feels harder
    pub rpe_inflation: bool,
    /// Movement quality is dropping
    pub quality_degradation: bool,
    /// Completed sets are dropping
    pub volume_intolerance: bool,
    /// Top loads (or effort, for bodyweight work) are not improving
    pub progress_stagnation: bool,
}

impl PlateauSignals {
    /// Number of signals that fired
    #[must_use]
    pub fn count(&self) -> usize {
        [
            self.rpe_inflation,
            self.quality_degradation,
            self.volume_intolerance,
            self.progress_stagnation,
        ]
        .into_iter()
        .filter(|detected| *detected)
        .count()
    }
}

/// Human-readable explanation for each signal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateauEvidence {
    /// RPE inflation explanation
    pub rpe_inflation: String,
    /// Quality degradation explanation
    pub quality_degradation: String,
    /// Volume intolerance explanation
    pub volume_intolerance: String,
    /// Progress stagnation explanation
    pub progress_stagnation: String,
}

/// Plateau analysis for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateauAnalysis {
    /// Exercise analyzed
    pub exercise_name: String,
    /// Whether signals were computed
    pub status: PlateauStatus,
    /// Signal flags
    pub signals: PlateauSignals,
    /// Number of signals that fired
    pub signal_count: usize,
    /// Fraction of signals that fired, 0.0-1.0
    pub severity: f64,
    /// Whether progression should be overridden
    pub intervention_needed: bool,
    /// Protocol the signals point to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_protocol: Option<InterventionProtocol>,
    /// Expected intervention length
    pub estimated_duration_weeks: u32,
    /// Explanation per signal
    pub evidence: PlateauEvidence,
    /// Logs considered
    pub log_count: usize,
}

impl PlateauAnalysis {
    fn insufficient(exercise_name: &str, log_count: usize) -> Self {
        let message = format!("Insufficient data: {log_count} logs");
        Self {
            exercise_name: exercise_name.to_owned(),
            status: PlateauStatus::InsufficientData,
            signals: PlateauSignals::default(),
            signal_count: 0,
            severity: 0.0,
            intervention_needed: false,
            recommended_protocol: None,
            estimated_duration_weeks: 0,
            evidence: PlateauEvidence {
                rpe_inflation: message.clone(),
                quality_degradation: message.clone(),
                volume_intolerance: message.clone(),
                progress_stagnation: message,
            },
            log_count,
        }
    }
}

/// Intervention in force for one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveIntervention {
    /// Protocol applied
    pub protocol: InterventionProtocol,
    /// How long the protocol runs
    pub duration_weeks: u32,
    /// Prescription overrides
    pub constraints: InterventionConstraints,
}

/// Overall plateau state for an athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallPlateauStatus {
    /// At least one exercise needs an intervention
    InterventionsActive,
    /// Every exercise is progressing
    NormalProgression,
}

/// Plateau analysis across every exercise an athlete logged
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AthletePlateauReport {
    /// Reference instant for the window
    pub as_of: DateTime<Utc>,
    /// Window length
    pub analysis_window_days: i64,
    /// Analysis per exercise name
    pub exercise_analysis: BTreeMap<String, PlateauAnalysis>,
    /// Interventions keyed by exercise name
    pub interventions_needed: BTreeMap<String, ActiveIntervention>,
    /// Summary status
    pub overall_status: OverallPlateauStatus,
}

impl AthletePlateauReport {
    /// Constraint overrides keyed by exercise name, ready for assignment requests
    #[must_use]
    pub fn constraint_overrides(&self) -> BTreeMap<String, InterventionConstraints> {
        self.interventions_needed
            .iter()
            .map(|(name, active)| (name.clone(), active.constraints.clone()))
            .collect()
    }
}

/// One signal's result
struct SignalReading {
    detected: bool,
    evidence: String,
}

impl SignalReading {
    const fn new(detected: bool, evidence: String) -> Self {
        Self { detected, evidence }
    }
}

/// Plateau detector
#[derive(Debug, Clone)]
pub struct PlateauDetector {
    config: PlateauConfig,
    selector: InterventionSelector,
}

impl Default for PlateauDetector {
    fn default() -> Self {
        Self::new(
            IntelligenceConfig::global().plateau.clone(),
            InterventionSelector::default(),
        )
    }
}

impl PlateauDetector {
    /// Create a detector with explicit configuration
    #[must_use]
    pub const fn new(config: PlateauConfig, selector: InterventionSelector) -> Self {
        Self { config, selector }
    }

    /// Intervention selector used for recommendations
    #[must_use]
    pub const fn selector(&self) -> &InterventionSelector {
        &self.selector
    }

    /// Analyze one exercise's logs
    ///
    /// Logs may arrive in any order; they are sorted by `logged_at` first.
    #[must_use]
    pub fn analyze(&self, exercise_name: &str, logs: &[PerformanceLogEntry]) -> PlateauAnalysis {
        let cfg = &self.config;
        if logs.len() < cfg.min_logs {
            debug!(
                exercise = exercise_name,
                log_count = logs.len(),
                "Not enough logs for plateau analysis"
            );
            return PlateauAnalysis::insufficient(exercise_name, logs.len());
        }

        let mut sorted: Vec<&PerformanceLogEntry> = logs.iter().collect();
        sorted.sort_by_key(|entry| entry.logged_at);

        let window = cfg.max_window.min(sorted.len() / 2);
        let recent = &sorted[sorted.len() - window..];
        let prior = &sorted[sorted.len() - 2 * window..sorted.len() - window];

        let rpe = self.detect_rpe_inflation(prior, recent);
        let quality = self.detect_quality_degradation(prior, recent);
        let volume = self.detect_volume_intolerance(prior, recent);
        let stagnation = self.detect_progress_stagnation(&sorted);

        let signals = PlateauSignals {
            rpe_inflation: rpe.detected,
            quality_degradation: quality.detected,
            volume_intolerance: volume.detected,
            progress_stagnation: stagnation.detected,
        };
        let signal_count = signals.count();
        let severity = signal_count as f64 / SIGNAL_COUNT as f64;
        let intervention_needed =
            signal_count >= cfg.min_signals && severity > cfg.severity_threshold;

        debug!(
            exercise = exercise_name,
            signal_count,
            severity,
            intervention_needed,
            "Plateau analysis complete"
        );

        PlateauAnalysis {
            exercise_name: exercise_name.to_owned(),
            status: PlateauStatus::Analyzed,
            signals,
            signal_count,
            severity,
            intervention_needed,
            recommended_protocol: Some(InterventionSelector::select_protocol(&signals)),
            estimated_duration_weeks: cfg.intervention_duration_weeks,
            evidence: PlateauEvidence {
                rpe_inflation: rpe.evidence,
                quality_degradation: quality.evidence,
                volume_intolerance: volume.evidence,
                progress_stagnation: stagnation.evidence,
            },
            log_count: sorted.len(),
        }
    }

    /// Analyze every exercise in an athlete's recent history
    ///
    /// Only logs within the configured window ending at `as_of` are used.
    /// Exercises are analyzed in parallel.
    #[must_use]
    pub fn analyze_athlete(
        &self,
        logs: &[PerformanceLogEntry],
        as_of: DateTime<Utc>,
    ) -> AthletePlateauReport {
        let window_days = self.config.analysis_window_days;
        let since = as_of - Duration::days(window_days);

        let mut by_exercise: BTreeMap<String, Vec<PerformanceLogEntry>> = BTreeMap::new();
        for entry in logs
            .iter()
            .filter(|entry| entry.logged_at >= since && entry.logged_at <= as_of)
        {
            by_exercise
                .entry(entry.exercise_name.clone())
                .or_default()
                .push(entry.clone());
        }

        let exercise_analysis: BTreeMap<String, PlateauAnalysis> = by_exercise
            .par_iter()
            .map(|(name, entries)| (name.clone(), self.analyze(name, entries)))
            .collect();

        let interventions_needed: BTreeMap<String, ActiveIntervention> = exercise_analysis
            .iter()
            .filter_map(|(name, analysis)| {
                self.selector
                    .constraints_for(analysis)
                    .map(|constraints| {
                        (
                            name.clone(),
                            ActiveIntervention {
                                protocol: constraints.protocol,
                                duration_weeks: self.config.intervention_duration_weeks,
                                constraints,
                            },
                        )
                    })
            })
            .collect();

        let overall_status = if interventions_needed.is_empty() {
            OverallPlateauStatus::NormalProgression
        } else {
            OverallPlateauStatus::InterventionsActive
        };

        info!(
            exercises = exercise_analysis.len(),
            interventions = interventions_needed.len(),
            window_days,
            "Athlete plateau analysis complete"
        );

        AthletePlateauReport {
            as_of,
            analysis_window_days: window_days,
            exercise_analysis,
            interventions_needed,
            overall_status,
        }
    }

    fn rpe_of(&self, entry: &PerformanceLogEntry) -> f64 {
        entry.rpe.filter(|rpe| rpe.is_finite()).unwrap_or(self.config.default_rpe)
    }

    fn quality_of(&self, entry: &PerformanceLogEntry) -> f64 {
        if let Some(quality) = entry.completion_quality.filter(|q| q.is_finite()) {
            return quality;
        }
        match entry
            .quality_grade
            .as_deref()
            .map(|grade| grade.trim().to_ascii_uppercase())
            .as_deref()
        {
            Some("A") => 4.0,
            Some("B") => 3.0,
            Some("C") => 2.0,
            Some("D") => 1.0,
            _ => self.config.unknown_grade_score,
        }
    }

    fn detect_rpe_inflation(
        &self,
        prior: &[&PerformanceLogEntry],
        recent: &[&PerformanceLogEntry],
    ) -> SignalReading {
        let cfg = &self.config;
        let prior_weighted: Vec<&PerformanceLogEntry> =
            prior.iter().copied().filter(|e| e.is_weighted()).collect();
        let recent_weighted: Vec<&PerformanceLogEntry> =
            recent.iter().copied().filter(|e| e.is_weighted()).collect();

        if prior_weighted.len() < cfg.min_weighted_per_window
            || recent_weighted.len() < cfg.min_weighted_per_window
        {
            let rise = mean(recent.iter().map(|e| self.rpe_of(e)))
                - mean(prior.iter().map(|e| self.rpe_of(e)));
            let detected = reaches(rise, cfg.rpe_rise_bodyweight);
            return SignalReading::new(
                detected,
                if detected {
                    format!("RPE increased {rise:.1} points for the same bodyweight work")
                } else {
                    "No significant RPE inflation detected".to_owned()
                },
            );
        }

        let prior_weight = mean(prior_weighted.iter().map(|e| e.weight()));
        let recent_weight = mean(recent_weighted.iter().map(|e| e.weight()));
        let weight_change = (recent_weight - prior_weight) / prior_weight;
        let rise = mean(recent_weighted.iter().map(|e| self.rpe_of(e)))
            - mean(prior_weighted.iter().map(|e| self.rpe_of(e)));

        let detected = weight_change <= cfg.rpe_max_weight_change + THRESHOLD_TOLERANCE
            && reaches(rise, cfg.rpe_rise_weighted);
        let sign = if weight_change > 0.0 { "+" } else { "" };
        SignalReading::new(
            detected,
            if detected {
                format!(
                    "RPE increased {rise:.1} points while weight stayed similar ({sign}{:.1}%)",
                    weight_change * 100.0
                )
            } else {
                "No significant RPE inflation detected".to_owned()
            },
        )
    }

    fn detect_quality_degradation(
        &self,
        prior: &[&PerformanceLogEntry],
        recent: &[&PerformanceLogEntry],
    ) -> SignalReading {
        let prior_quality = mean(prior.iter().map(|e| self.quality_of(e)));
        let recent_quality = mean(recent.iter().map(|e| self.quality_of(e)));
        let drop = prior_quality - recent_quality;
        let detected = reaches(drop, self.config.quality_drop);
        SignalReading::new(
            detected,
            if detected {
                format!(
                    "Quality dropped {drop:.1} points ({prior_quality:.1} → {recent_quality:.1})"
                )
            } else {
                "No significant quality degradation detected".to_owned()
            },
        )
    }

    fn detect_volume_intolerance(
        &self,
        prior: &[&PerformanceLogEntry],
        recent: &[&PerformanceLogEntry],
    ) -> SignalReading {
        let prior_sets = mean(prior.iter().map(|e| f64::from(e.set_count())));
        let recent_sets = mean(recent.iter().map(|e| f64::from(e.set_count())));
        if prior_sets <= 0.0 {
            return SignalReading::new(false, "No set data for volume analysis".to_owned());
        }

        let drop = (prior_sets - recent_sets) / prior_sets;
        let detected = reaches(drop, self.config.volume_drop);
        SignalReading::new(
            detected,
            if detected {
                format!(
                    "Volume completion dropped {:.1}% ({prior_sets:.1} → {recent_sets:.1} sets avg)",
                    drop * 100.0
                )
            } else {
                "No significant volume intolerance detected".to_owned()
            },
        )
    }

    fn detect_progress_stagnation(&self, sorted: &[&PerformanceLogEntry]) -> SignalReading {
        let cfg = &self.config;
        let sessions = &sorted[sorted.len() - cfg.stagnation_sessions.min(sorted.len())..];
        if sessions.len() < cfg.min_stagnation_sessions {
            return SignalReading::new(
                false,
                "Insufficient data for progress analysis".to_owned(),
            );
        }

        let weights: Vec<f64> = sessions
            .iter()
            .map(|e| e.weight())
            .filter(|weight| *weight > 0.0)
            .collect();

        if weights.len() < cfg.min_weighted_for_stagnation {
            let half = sessions.len() / 2;
            let rise = mean(sessions[half..].iter().map(|e| self.rpe_of(e)))
                - mean(sessions[..half].iter().map(|e| self.rpe_of(e)));
            let detected = reaches(rise, cfg.stagnation_rpe_rise);
            return SignalReading::new(
                detected,
                if detected {
                    format!("Performance declining, RPE increased {rise:.1} points over time")
                } else {
                    "RPE stable or improving for bodyweight exercise".to_owned()
                },
            );
        }

        let half = weights.len() / 2;
        let first_max = weights[..half].iter().copied().fold(0.0, f64::max);
        let second_max = weights[half..].iter().copied().fold(0.0, f64::max);
        if first_max <= 0.0 {
            return SignalReading::new(
                false,
                "Insufficient load data for progress analysis".to_owned(),
            );
        }
        let gain = (second_max - first_max) / first_max;
        let detected = !reaches(gain, cfg.stagnation_min_gain);
        SignalReading::new(
            detected,
            if detected {
                format!(
                    "No significant weight progression over the last {} sessions ({first_max} → {second_max})",
                    sessions.len()
                )
            } else {
                format!("Weight progressing normally ({first_max} → {second_max})")
            },
        )
    }
}

/// Arithmetic mean, `0.0` for an empty input
fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

fn reaches(value: f64, threshold: f64) -> bool {
    value + THRESHOLD_TOLERANCE >= threshold
}
