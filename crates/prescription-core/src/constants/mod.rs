// ABOUTME: Application constants for the prescription engine organized by domain
// ABOUTME: Lift ordering, gymnastics skill list, block names, equipment keyword rules and units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants shared by the core models and the intelligence crate.

/// Number of tracked one-rep-max lifts
pub const ONE_RM_COUNT: usize = 14;

/// Canonical lift names in one-rep-max array order
pub const ONE_RM_LIFT_NAMES: [&str; ONE_RM_COUNT] = [
    "Snatch",
    "Power Snatch",
    "Clean and Jerk",
    "Power Clean",
    "Clean (Only)",
    "Jerk (Only)",
    "Back Squat",
    "Front Squat",
    "Overhead Squat",
    "Deadlift",
    "Bench Press",
    "Push Press",
    "Strict Press",
    "Weighted Pullup",
];

/// Number of gymnastics skills captured at intake
pub const SKILL_COUNT: usize = 26;

/// Gymnastics skill names, indexed by the catalog's `skill_index`
pub const SKILL_NAMES: [&str; SKILL_COUNT] = [
    "Double Unders",
    "Wall Balls",
    "Toes to Bar",
    "Pull-ups (kipping or butterfly)",
    "Chest to Bar Pull-ups",
    "Strict Pull-ups",
    "Push-ups",
    "Ring Dips",
    "Strict Ring Dips",
    "Strict Handstand Push-ups",
    "Wall Facing Handstand Push-ups",
    "Deficit Handstand Push-ups (4\")",
    "Alternating Pistols",
    "GHD Sit-ups",
    "Wall Walks",
    "Ring Muscle Ups",
    "Bar Muscle Ups",
    "Rope Climbs",
    "Wall Facing Handstand Hold",
    "Freestanding Handstand Hold",
    "Legless Rope Climbs",
    "Pegboard Ascent",
    "Handstand Walk (10m or 25\")",
    "Seated Legless Rope Climbs",
    "Strict Ring Muscle Ups",
    "Handstand Walk Obstacle Crossings",
];

/// Catalog marker meaning "no value" in optional text columns
pub const NONE_MARKER: &str = "None";

/// Lift group that matches every main lift
pub const ALL_LIFTS_GROUP: &str = "All";

/// Equipment names used by selection rules
pub mod equipment {
    /// Olympic barbell
    pub const BARBELL: &str = "Barbell";
    /// Pair of dumbbells
    pub const DUMBBELLS: &str = "Dumbbells";
    /// Kettlebells
    pub const KETTLEBELLS: &str = "Kettlebells";
    /// Plyometric box
    pub const PLYO_BOX: &str = "Plyo Box";
    /// Medicine ball for wall balls
    pub const WALL_BALL: &str = "Wall Ball";
    /// Clear wall for handstands and wall balls
    pub const WALL_SPACE: &str = "Wall Space";
    /// Climbing rope
    pub const CLIMBING_ROPE: &str = "Climbing Rope";
    /// Jump rope
    pub const JUMP_ROPE: &str = "Jump Rope";
    /// Glute-ham developer
    pub const GHD: &str = "GHD";
    /// Gymnastics rings hung high
    pub const HIGH_RINGS: &str = "High Rings";
    /// Squat rack
    pub const SQUAT_RACK: &str = "Squat Rack";
    /// Flat bench
    pub const BENCH: &str = "Bench";
}

/// Exercise names whose equipment is known without inspecting the catalog
pub const EXACT_EQUIPMENT_RULES: &[(&str, &[&str])] = &[
    ("Strict Handstand Push-ups", &[equipment::WALL_SPACE]),
    ("Wall Facing Handstand Push-ups", &[equipment::WALL_SPACE]),
    ("Ring Muscle Ups", &[equipment::HIGH_RINGS]),
    ("Double Unders", &[equipment::JUMP_ROPE]),
    ("Rope Climbs", &[equipment::CLIMBING_ROPE]),
    ("GHD Sit-ups", &[equipment::GHD]),
    ("Wall Balls", &[equipment::WALL_BALL, equipment::WALL_SPACE]),
    ("Box Jumps", &[equipment::PLYO_BOX]),
    ("Box Jump Overs", &[equipment::PLYO_BOX]),
    ("Bench Press", &[equipment::BENCH, equipment::BARBELL]),
    ("Back Squat", &[equipment::SQUAT_RACK, equipment::BARBELL]),
    ("Front Squat", &[equipment::SQUAT_RACK, equipment::BARBELL]),
    ("Deadlift", &[equipment::BARBELL]),
];

/// Lowercase name fragments implying equipment requirements
pub const KEYWORD_EQUIPMENT_RULES: &[(&str, &[&str])] = &[
    ("dumbbell", &[equipment::DUMBBELLS]),
    ("db ", &[equipment::DUMBBELLS]),
    ("kettlebell", &[equipment::KETTLEBELLS]),
    ("kb ", &[equipment::KETTLEBELLS]),
    ("barbell", &[equipment::BARBELL]),
    ("box jump", &[equipment::PLYO_BOX]),
    ("step up", &[equipment::PLYO_BOX]),
    ("wall ball", &[equipment::WALL_BALL, equipment::WALL_SPACE]),
    ("rope climb", &[equipment::CLIMBING_ROPE]),
    ("double under", &[equipment::JUMP_ROPE]),
    ("ghd", &[equipment::GHD]),
];

/// Accessory category names matched against `RatioSet` needs
pub mod accessory_categories {
    /// Upper back work
    pub const UPPER_BACK: &str = "Upper Back";
    /// Quad-dominant leg strength
    pub const LEG_STRENGTH: &str = "Leg Strength";
    /// Hinge / posterior chain work
    pub const POSTERIOR_CHAIN: &str = "Posterior Chain";
    /// Horizontal and vertical pressing
    pub const UPPER_BODY_PRESSING: &str = "Upper Body Pressing";
    /// Horizontal and vertical pulling
    pub const UPPER_BODY_PULLING: &str = "Upper Body Pulling";
    /// Trunk work
    pub const CORE: &str = "Core";
}

/// Units labels as stored on athlete records
pub mod units {
    /// Imperial label
    pub const IMPERIAL_LABEL: &str = "Imperial (lbs)";
    /// Metric label
    pub const METRIC_LABEL: &str = "Metric (kg)";
}
