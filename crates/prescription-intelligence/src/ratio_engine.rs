// ABOUTME: Strength ratio engine deriving an athlete capability profile from one-rep maxes
// ABOUTME: Technical and bodyweight ratios, weakness flags, fault counts, focus labels and lift levels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Ratio Engine
//!
//! Turns an [`AthleteMeasurements`] snapshot into a [`RatioSet`]. The engine
//! never fails: a ratio whose numerator or denominator is missing is `0.0`,
//! which downstream code reads as "cannot evaluate".
//!
//! Lift ÷ lift ratios are technical proxies and are capped at `1.0`.
//! Bodyweight and strength-balance ratios are left uncapped because their
//! meaningful range extends past one.

use std::collections::BTreeMap;
use std::fmt;

use prescription_core::constants::accessory_categories;
use prescription_core::models::{AbilityLevel, AthleteMeasurements, Gender, Lift, MainLift};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::intelligence::{LevelBand, RatioThresholds};
use crate::config::IntelligenceConfig;

/// How a ratio is bounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioKind {
    /// Lift ÷ lift technical proxy, capped at the technical cap
    Technical,
    /// Lift ÷ bodyweight
    BodyWeight,
    /// Lift ÷ lift strength balance, uncapped
    StrengthBalance,
}

/// Denominator of a ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Denominator {
    Lift(Lift),
    BodyWeight,
}

/// The fourteen named ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioKey {
    /// Snatch ÷ back squat
    SnatchBackSquat,
    /// Clean and jerk ÷ back squat
    CleanJerkBackSquat,
    /// Jerk ÷ clean
    JerkClean,
    /// Power snatch ÷ snatch
    PowerSnatchSnatch,
    /// Power clean ÷ clean
    PowerCleanClean,
    /// Front squat ÷ back squat
    FrontSquatBackSquat,
    /// Overhead squat ÷ back squat
    OverheadSquatBackSquat,
    /// Back squat ÷ bodyweight
    BackSquatBodyWeight,
    /// Deadlift ÷ bodyweight
    DeadliftBodyWeight,
    /// Bench press ÷ bodyweight
    BenchPressBodyWeight,
    /// Weighted pull-up ÷ bodyweight
    WeightedPullupBodyWeight,
    /// Weighted pull-up ÷ bench press
    WeightedPullupBenchPress,
    /// Push press ÷ strict press
    PushPressStrictPress,
    /// Snatch ÷ clean and jerk
    SnatchCleanJerk,
}

impl RatioKey {
    /// All ratios in output order
    pub const ALL: [Self; 14] = [
        Self::SnatchBackSquat,
        Self::CleanJerkBackSquat,
        Self::JerkClean,
        Self::PowerSnatchSnatch,
        Self::PowerCleanClean,
        Self::FrontSquatBackSquat,
        Self::OverheadSquatBackSquat,
        Self::BackSquatBodyWeight,
        Self::DeadliftBodyWeight,
        Self::BenchPressBodyWeight,
        Self::WeightedPullupBodyWeight,
        Self::WeightedPullupBenchPress,
        Self::PushPressStrictPress,
        Self::SnatchCleanJerk,
    ];

    /// Bounding behavior
    #[must_use]
    pub const fn kind(self) -> RatioKind {
        match self {
            Self::SnatchBackSquat
            | Self::CleanJerkBackSquat
            | Self::JerkClean
            | Self::PowerSnatchSnatch
            | Self::PowerCleanClean
            | Self::FrontSquatBackSquat
            | Self::OverheadSquatBackSquat => RatioKind::Technical,
            Self::BackSquatBodyWeight
            | Self::DeadliftBodyWeight
            | Self::BenchPressBodyWeight
            | Self::WeightedPullupBodyWeight => RatioKind::BodyWeight,
            Self::WeightedPullupBenchPress | Self::PushPressStrictPress | Self::SnatchCleanJerk => {
                RatioKind::StrengthBalance
            }
        }
    }

    const fn sources(self) -> (Lift, Denominator) {
        match self {
            Self::SnatchBackSquat => (Lift::Snatch, Denominator::Lift(Lift::BackSquat)),
            Self::CleanJerkBackSquat => (Lift::CleanAndJerk, Denominator::Lift(Lift::BackSquat)),
            Self::JerkClean => (Lift::Jerk, Denominator::Lift(Lift::Clean)),
            Self::PowerSnatchSnatch => (Lift::PowerSnatch, Denominator::Lift(Lift::Snatch)),
            Self::PowerCleanClean => (Lift::PowerClean, Denominator::Lift(Lift::Clean)),
            Self::FrontSquatBackSquat => (Lift::FrontSquat, Denominator::Lift(Lift::BackSquat)),
            Self::OverheadSquatBackSquat => {
                (Lift::OverheadSquat, Denominator::Lift(Lift::BackSquat))
            }
            Self::BackSquatBodyWeight => (Lift::BackSquat, Denominator::BodyWeight),
            Self::DeadliftBodyWeight => (Lift::Deadlift, Denominator::BodyWeight),
            Self::BenchPressBodyWeight => (Lift::BenchPress, Denominator::BodyWeight),
            Self::WeightedPullupBodyWeight => (Lift::WeightedPullup, Denominator::BodyWeight),
            Self::WeightedPullupBenchPress => {
                (Lift::WeightedPullup, Denominator::Lift(Lift::BenchPress))
            }
            Self::PushPressStrictPress => (Lift::PushPress, Denominator::Lift(Lift::StrictPress)),
            Self::SnatchCleanJerk => (Lift::Snatch, Denominator::Lift(Lift::CleanAndJerk)),
        }
    }

    /// Unrounded, uncapped ratio; `0.0` when either source is missing
    #[must_use]
    pub fn raw_value(self, measurements: &AthleteMeasurements) -> f64 {
        let (numerator, denominator) = self.sources();
        let top = measurements.one_rm(numerator);
        let bottom = match denominator {
            Denominator::Lift(lift) => measurements.one_rm(lift),
            Denominator::BodyWeight => measurements.body_weight(),
        };
        if top > 0.0 && bottom > 0.0 {
            top / bottom
        } else {
            0.0
        }
    }
}

/// Back squat coaching focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackSquatFocus {
    /// Overhead strength is adequate; work positions
    Position,
    /// Overhead squat lags; bias overhead work
    Overhead,
}

/// Front squat coaching focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontSquatFocus {
    /// Front squat is strong; work the overhead complex
    OverheadComplex,
    /// Rack position limits the front squat
    FrontRack,
}

/// Press coaching focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressFocus {
    /// Leg drive is modest; work stability and unilateral pressing
    StabilityUnilateral,
    /// Leg drive masks weak strict strength
    StrictStrength,
}

impl fmt::Display for BackSquatFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Position => "position",
            Self::Overhead => "overhead",
        })
    }
}

impl fmt::Display for FrontSquatFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OverheadComplex => "overhead_complex",
            Self::FrontRack => "front_rack",
        })
    }
}

impl fmt::Display for PressFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StabilityUnilateral => "stability_unilateral",
            Self::StrictStrength => "strict_strength",
        })
    }
}

/// Derived capability profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    /// Named ratios, rounded to three decimals
    #[serde(flatten)]
    pub ratios: BTreeMap<RatioKey, f64>,
    /// Upper back work is always programmed
    pub needs_upper_back: bool,
    /// Legs lag the hinge
    pub needs_leg_strength: bool,
    /// Hinge lags the legs
    pub needs_posterior_chain: bool,
    /// Pressing is a weakness
    pub needs_upper_body_pressing: bool,
    /// Pulling is a weakness
    pub needs_upper_body_pulling: bool,
    /// Core work is always programmed
    pub needs_core: bool,
    /// Snatch technical drills per session (1-3)
    pub snatch_technical_count: u8,
    /// Clean and jerk technical drills per session (1-3)
    pub clean_jerk_technical_count: u8,
    /// Back squat focus
    pub back_squat_technical_focus: BackSquatFocus,
    /// Front squat focus
    pub front_squat_technical_focus: FrontSquatFocus,
    /// Press focus
    pub press_technical_focus: PressFocus,
    /// Snatch level
    pub snatch_level: AbilityLevel,
    /// Clean and jerk level
    pub clean_jerk_level: AbilityLevel,
    /// Back squat level
    pub back_squat_level: AbilityLevel,
    /// Press level
    pub press_level: AbilityLevel,
}

impl RatioSet {
    /// Stored value of a ratio, `0.0` when absent
    #[must_use]
    pub fn get(&self, key: RatioKey) -> f64 {
        self.ratios.get(&key).copied().unwrap_or(0.0)
    }

    /// True when no ratio could be computed
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.ratios.values().all(|value| *value <= 0.0)
    }

    /// Accessory categories flagged as needed, in a fixed order
    #[must_use]
    pub fn needed_accessory_categories(&self) -> Vec<&'static str> {
        [
            (self.needs_upper_back, accessory_categories::UPPER_BACK),
            (self.needs_leg_strength, accessory_categories::LEG_STRENGTH),
            (self.needs_posterior_chain, accessory_categories::POSTERIOR_CHAIN),
            (
                self.needs_upper_body_pressing,
                accessory_categories::UPPER_BODY_PRESSING,
            ),
            (
                self.needs_upper_body_pulling,
                accessory_categories::UPPER_BODY_PULLING,
            ),
            (self.needs_core, accessory_categories::CORE),
        ]
        .into_iter()
        .filter_map(|(needed, category)| needed.then_some(category))
        .collect()
    }

    /// Level that loads a main lift's periodization
    #[must_use]
    pub const fn level_for(&self, main_lift: MainLift) -> AbilityLevel {
        match main_lift {
            MainLift::Snatch => self.snatch_level,
            MainLift::CleanAndJerk => self.clean_jerk_level,
            MainLift::BackSquat | MainLift::FrontSquat => self.back_squat_level,
            MainLift::Press => self.press_level,
        }
    }

    /// Technical drill count for Olympic lift days
    #[must_use]
    pub const fn technical_count_for(&self, main_lift: MainLift) -> Option<u8> {
        match main_lift {
            MainLift::Snatch => Some(self.snatch_technical_count),
            MainLift::CleanAndJerk => Some(self.clean_jerk_technical_count),
            MainLift::BackSquat | MainLift::FrontSquat | MainLift::Press => None,
        }
    }
}

/// Maps a number of failed checks (out of three) onto a drill count
const fn technical_count(failures: usize) -> u8 {
    match failures {
        0 => 1,
        3 => 3,
        _ => 2,
    }
}

fn classify(ratio: f64, band: LevelBand) -> AbilityLevel {
    if ratio >= band.advanced_min {
        AbilityLevel::Advanced
    } else if ratio >= band.intermediate_min {
        AbilityLevel::Intermediate
    } else {
        AbilityLevel::Beginner
    }
}

/// Ratio engine
#[derive(Debug, Clone)]
pub struct RatioEngine {
    thresholds: RatioThresholds,
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new(IntelligenceConfig::global().ratios.clone())
    }
}

impl RatioEngine {
    /// Create an engine with explicit thresholds
    #[must_use]
    pub const fn new(thresholds: RatioThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in use
    #[must_use]
    pub const fn thresholds(&self) -> &RatioThresholds {
        &self.thresholds
    }

    fn round(&self, value: f64) -> f64 {
        let decimals = i32::try_from(self.thresholds.rounding_decimals).unwrap_or(3);
        let scale = 10_f64.powi(decimals);
        (value * scale).round() / scale
    }

    fn stored_value(&self, key: RatioKey, measurements: &AthleteMeasurements) -> f64 {
        let raw = key.raw_value(measurements);
        let bounded = match key.kind() {
            RatioKind::Technical => raw.min(self.thresholds.technical_cap),
            RatioKind::BodyWeight | RatioKind::StrengthBalance => raw,
        };
        self.round(bounded)
    }

    /// Compute the full ratio profile
    #[must_use]
    pub fn calculate(&self, measurements: &AthleteMeasurements) -> RatioSet {
        let ratios: BTreeMap<RatioKey, f64> = RatioKey::ALL
            .into_iter()
            .map(|key| (key, self.stored_value(key, measurements)))
            .collect();
        let value = |key: RatioKey| ratios.get(&key).copied().unwrap_or(0.0);

        let weakness = &self.thresholds.weakness;
        let deadlift_to_squat = {
            let squat = measurements.one_rm(Lift::BackSquat);
            let deadlift = measurements.one_rm(Lift::Deadlift);
            if squat > 0.0 && deadlift > 0.0 {
                deadlift / squat
            } else {
                0.0
            }
        };
        let needs_leg_strength = deadlift_to_squat >= weakness.leg_strength_deadlift_ratio;

        let needs_upper_body_pressing = value(RatioKey::BenchPressBodyWeight)
            < weakness.pressing_bench_body_weight_min
            || value(RatioKey::PushPressStrictPress) > weakness.pressing_push_strict_max;
        let needs_upper_body_pulling = value(RatioKey::WeightedPullupBenchPress)
            < weakness.pulling_pullup_bench_min
            || value(RatioKey::WeightedPullupBodyWeight) < weakness.pulling_pullup_body_weight_min;

        let (snatch_failures, clean_jerk_failures) = self.count_faults(&value);

        let back_squat_technical_focus = if value(RatioKey::OverheadSquatBackSquat)
            >= self.thresholds.technical.overhead_squat_back_squat_min
        {
            BackSquatFocus::Position
        } else {
            BackSquatFocus::Overhead
        };
        let front_squat_technical_focus = if value(RatioKey::FrontSquatBackSquat)
            >= self.thresholds.front_squat_overhead_complex_min
        {
            FrontSquatFocus::OverheadComplex
        } else {
            FrontSquatFocus::FrontRack
        };
        let push_strict = value(RatioKey::PushPressStrictPress);
        let press_technical_focus =
            if push_strict > 0.0 && push_strict <= self.thresholds.press_stability_max {
                PressFocus::StabilityUnilateral
            } else {
                PressFocus::StrictStrength
            };

        let levels = self.lift_levels(measurements, &value);

        debug!(
            snatch_failures,
            clean_jerk_failures,
            needs_leg_strength,
            back_squat_level = %levels.back_squat,
            "Calculated strength ratios"
        );

        RatioSet {
            ratios,
            needs_upper_back: true,
            needs_leg_strength,
            needs_posterior_chain: !needs_leg_strength,
            needs_upper_body_pressing,
            needs_upper_body_pulling,
            needs_core: true,
            snatch_technical_count: technical_count(snatch_failures),
            clean_jerk_technical_count: technical_count(clean_jerk_failures),
            back_squat_technical_focus,
            front_squat_technical_focus,
            press_technical_focus,
            snatch_level: levels.snatch,
            clean_jerk_level: levels.clean_jerk,
            back_squat_level: levels.back_squat,
            press_level: levels.press,
        }
    }

    /// Failed technical checks for the snatch and the clean and jerk
    ///
    /// A missing ratio fails its check.
    fn count_faults(&self, value: &impl Fn(RatioKey) -> f64) -> (usize, usize) {
        let checks = &self.thresholds.technical;
        let below = |key: RatioKey, min: f64| value(key) < min;
        let above_or_missing = |key: RatioKey, max: f64| {
            let ratio = value(key);
            ratio <= 0.0 || ratio > max
        };

        let snatch = [
            below(RatioKey::SnatchBackSquat, checks.snatch_back_squat_min),
            above_or_missing(RatioKey::PowerSnatchSnatch, checks.power_snatch_snatch_max),
            below(
                RatioKey::OverheadSquatBackSquat,
                checks.overhead_squat_back_squat_min,
            ),
        ];
        let clean_jerk = [
            below(RatioKey::CleanJerkBackSquat, checks.clean_jerk_back_squat_min),
            above_or_missing(RatioKey::PowerCleanClean, checks.power_clean_clean_max),
            below(RatioKey::JerkClean, checks.jerk_clean_min),
        ];

        (
            snatch.iter().filter(|failed| **failed).count(),
            clean_jerk.iter().filter(|failed| **failed).count(),
        )
    }

    fn lift_levels(
        &self,
        measurements: &AthleteMeasurements,
        value: &impl Fn(RatioKey) -> f64,
    ) -> LiftLevels {
        let standards = &self.thresholds.standards;
        let (squat_band, press_band) = match measurements.gender() {
            Gender::Male => (standards.male_back_squat, standards.male_press),
            Gender::Female => (standards.female_back_squat, standards.female_press),
        };

        let back_squat = classify(
            RatioKey::BackSquatBodyWeight.raw_value(measurements),
            squat_band,
        );
        let press = classify(
            RatioKey::BenchPressBodyWeight.raw_value(measurements),
            press_band,
        );

        let derive = |technical: f64, min: f64| {
            if back_squat == AbilityLevel::Beginner {
                AbilityLevel::Beginner
            } else if technical >= min {
                back_squat
            } else {
                back_squat.step_down()
            }
        };
        let checks = &self.thresholds.technical;
        let mut snatch = derive(value(RatioKey::SnatchBackSquat), checks.snatch_back_squat_min);
        let mut clean_jerk = derive(
            value(RatioKey::CleanJerkBackSquat),
            checks.clean_jerk_back_squat_min,
        );

        let body_weight = measurements.body_weight();
        let snatch_max = measurements.one_rm(Lift::Snatch);
        let clean_jerk_max = measurements.one_rm(Lift::CleanAndJerk);
        if back_squat == AbilityLevel::Beginner
            && body_weight > 0.0
            && snatch_max > 0.0
            && clean_jerk_max > 0.0
        {
            if snatch_max / body_weight >= self.thresholds.snatch_body_weight_promotion {
                snatch = AbilityLevel::Intermediate;
            }
            if clean_jerk_max / body_weight >= self.thresholds.clean_jerk_body_weight_promotion {
                clean_jerk = AbilityLevel::Intermediate;
            }
        }

        LiftLevels {
            snatch,
            clean_jerk,
            back_squat,
            press,
        }
    }
}

struct LiftLevels {
    snatch: AbilityLevel,
    clean_jerk: AbilityLevel,
    back_squat: AbilityLevel,
    press: AbilityLevel,
}
