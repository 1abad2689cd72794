// ABOUTME: Intervention protocol selection for detected plateaus
// ABOUTME: Maps plateau signals to a protocol by fixed priority and builds its constraint bundle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::intelligence::{InterventionConfig, ProtocolBundle};
use crate::config::IntelligenceConfig;
use crate::plateau_detection::{PlateauAnalysis, PlateauSignals};

/// Corrective protocol applied while a plateau is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterventionProtocol {
    /// Slow eccentrics and pauses to rebuild movement quality
    TempoWork,
    /// Lighter loads with more volume to rebuild a strength base
    IntensityReduction,
    /// Less volume at moderate loads to rebuild work capacity
    VolumeProgression,
}

impl InterventionProtocol {
    /// Stored protocol name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TempoWork => "TEMPO_WORK",
            Self::IntensityReduction => "INTENSITY_REDUCTION",
            Self::VolumeProgression => "VOLUME_PROGRESSION",
        }
    }
}

impl fmt::Display for InterventionProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overrides applied to an exercise's prescription during an intervention
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionConstraints {
    /// Protocol in force
    pub protocol: InterventionProtocol,
    /// Allowed fraction-of-1RM range (low, high)
    pub intensity_range: (f64, f64),
    /// Multiplier on prescribed volume
    pub volume_modifier: f64,
    /// How the exercise is modified ("tempo_variation", "standard")
    pub exercise_modification: String,
    /// Training focus label
    pub focus_area: String,
}

impl InterventionConstraints {
    /// Clamp a fraction of 1RM into the allowed range
    #[must_use]
    pub fn clamp_intensity(&self, fraction: f64) -> f64 {
        let (low, high) = self.intensity_range;
        fraction.clamp(low.min(high), high.max(low))
    }

    /// Scale a count by the volume modifier, never below 1
    #[must_use]
    // Modifier is validated > 0 and the result is at least 1.0 here
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn scale_volume(&self, count: u32) -> u32 {
        let scaled = (f64::from(count) * self.volume_modifier).round();
        if scaled < 1.0 {
            1
        } else {
            scaled as u32
        }
    }

    /// Note suffix naming the protocol and its focus
    #[must_use]
    pub fn note_tag(&self) -> String {
        format!("[{}: {}]", self.protocol, self.focus_area)
    }
}

/// Chooses a protocol for a plateau and builds its constraints
#[derive(Debug, Clone)]
pub struct InterventionSelector {
    config: InterventionConfig,
}

impl Default for InterventionSelector {
    fn default() -> Self {
        Self::new(IntelligenceConfig::global().intervention.clone())
    }
}

impl InterventionSelector {
    /// Create a selector with explicit bundles
    #[must_use]
    pub const fn new(config: InterventionConfig) -> Self {
        Self { config }
    }

    /// Protocol for a signal set; first match wins
    ///
    /// Quality degradation takes priority over effort inflation, which takes
    /// priority over volume intolerance. Stagnation alone gets tempo work.
    #[must_use]
    pub const fn select_protocol(signals: &PlateauSignals) -> InterventionProtocol {
        if signals.quality_degradation {
            InterventionProtocol::TempoWork
        } else if signals.rpe_inflation {
            InterventionProtocol::IntensityReduction
        } else if signals.volume_intolerance {
            InterventionProtocol::VolumeProgression
        } else {
            InterventionProtocol::TempoWork
        }
    }

    /// Configured bundle for a protocol
    #[must_use]
    pub const fn bundle(&self, protocol: InterventionProtocol) -> &ProtocolBundle {
        match protocol {
            InterventionProtocol::TempoWork => &self.config.tempo_work,
            InterventionProtocol::IntensityReduction => &self.config.intensity_reduction,
            InterventionProtocol::VolumeProgression => &self.config.volume_progression,
        }
    }

    /// Constraints for a protocol
    #[must_use]
    pub fn constraints(&self, protocol: InterventionProtocol) -> InterventionConstraints {
        let bundle = self.bundle(protocol);
        InterventionConstraints {
            protocol,
            intensity_range: (bundle.intensity_min, bundle.intensity_max),
            volume_modifier: bundle.volume_modifier,
            exercise_modification: bundle.exercise_modification.clone(),
            focus_area: bundle.focus_area.clone(),
        }
    }

    /// Constraints for an analysis, only when it calls for an intervention
    #[must_use]
    pub fn constraints_for(&self, analysis: &PlateauAnalysis) -> Option<InterventionConstraints> {
        if !analysis.intervention_needed {
            return None;
        }
        let protocol = analysis
            .recommended_protocol
            .unwrap_or_else(|| Self::select_protocol(&analysis.signals));
        Some(self.constraints(protocol))
    }
}
