// ABOUTME: Exercise eligibility rules for equipment, prerequisites and difficulty
// ABOUTME: Infers equipment from exercise names and evaluates skill and one-rep-max prerequisites
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use prescription_core::constants::{
    equipment, EXACT_EQUIPMENT_RULES, KEYWORD_EQUIPMENT_RULES, NONE_MARKER, SKILL_NAMES,
};
use prescription_core::models::{
    AbilityLevel, AthleteProfile, DifficultyLevel, ExerciseCatalogEntry, Lift, SkillLevel,
};
use prescription_core::parsing::leading_f64;

/// Marker separating a lift name from its threshold in a prerequisite
const ONE_RM_MARKER: &str = "1RM";

/// Equipment an exercise needs: catalog list plus name-based inference
#[must_use]
pub fn required_equipment(entry: &ExerciseCatalogEntry) -> Vec<String> {
    let mut required: Vec<String> = Vec::new();
    let mut push = |item: &str| {
        let item = item.trim();
        if !item.is_empty() && !required.iter().any(|have| have.eq_ignore_ascii_case(item)) {
            required.push(item.to_owned());
        }
    };

    for item in &entry.required_equipment {
        push(item);
    }

    let name = entry.name.trim();
    for (exact, items) in EXACT_EQUIPMENT_RULES {
        if name.eq_ignore_ascii_case(exact) {
            items.iter().copied().for_each(&mut push);
        }
    }

    // Trailing space lets short keywords like "kb " match at the end of a name
    let lowered = format!("{} ", name.to_lowercase());
    for (keyword, items) in KEYWORD_EQUIPMENT_RULES {
        if lowered.contains(keyword) {
            items.iter().copied().for_each(&mut push);
        }
    }

    required
}

/// Whether the athlete can perform the exercise with what they own
///
/// Athletes without equipment only get bodyweight-accessible exercises.
#[must_use]
pub fn has_required_equipment(entry: &ExerciseCatalogEntry, profile: &AthleteProfile) -> bool {
    if profile.equipment.is_empty() {
        return entry.bodyweight_accessible;
    }
    required_equipment(entry)
        .iter()
        .all(|item| profile.has_equipment(item))
}

/// Whether a dumbbell-only exercise should yield to barbell work
#[must_use]
pub fn is_dumbbell_only(entry: &ExerciseCatalogEntry) -> bool {
    let required = required_equipment(entry);
    let needs = |name: &str| required.iter().any(|item| item.eq_ignore_ascii_case(name));
    needs(equipment::DUMBBELLS) && !needs(equipment::BARBELL)
}

/// Evaluate one prerequisite
///
/// Accepted forms are `"None"`, `"<skill>: <level>"` and
/// `"<Lift> 1RM > <value>"`. Unknown skills and lifts fail.
#[must_use]
pub fn prerequisite_met(prerequisite: &str, profile: &AthleteProfile) -> bool {
    let prerequisite = prerequisite.trim();
    if prerequisite.is_empty() || prerequisite.eq_ignore_ascii_case(NONE_MARKER) {
        return true;
    }

    if let Some((lift, threshold)) = prerequisite.split_once(ONE_RM_MARKER) {
        let Some(lift) = Lift::from_name(lift) else {
            return false;
        };
        let Some(required) = leading_f64(threshold.trim().trim_start_matches(['>', '='])) else {
            return false;
        };
        return profile
            .measurements
            .recorded_one_rm(lift)
            .is_some_and(|one_rm| one_rm >= required);
    }

    let Some((skill, level)) = prerequisite.rsplit_once(':') else {
        return false;
    };
    let skill = skill.trim();
    if !SKILL_NAMES.contains(&skill) {
        return false;
    }

    let required = SkillLevel::parse(level).rank().max(SkillLevel::Beginner.rank());
    profile.skill_level(skill).rank() >= required
}

/// Whether every prerequisite of an exercise is met
#[must_use]
pub fn prerequisites_met(entry: &ExerciseCatalogEntry, profile: &AthleteProfile) -> bool {
    entry
        .prerequisites()
        .all(|prerequisite| prerequisite_met(prerequisite, profile))
}

/// Whether an accessory's difficulty suits the athlete's overall ability
///
/// Beginners get Beginner work; each tier above adds its own level.
#[must_use]
pub const fn is_level_appropriate(
    difficulty: Option<DifficultyLevel>,
    ability: AbilityLevel,
) -> bool {
    match difficulty {
        Some(DifficultyLevel::All | DifficultyLevel::Beginner) => true,
        Some(DifficultyLevel::Intermediate) => !matches!(ability, AbilityLevel::Beginner),
        Some(DifficultyLevel::Advanced) => matches!(ability, AbilityLevel::Advanced),
        Some(DifficultyLevel::Novice | DifficultyLevel::Elite) | None => false,
    }
}

/// Whether the athlete qualifies for an exercise used as a scaling anchor
#[must_use]
pub const fn qualifies_for_scaling_anchor(
    difficulty: Option<DifficultyLevel>,
    ability: AbilityLevel,
) -> bool {
    match difficulty {
        Some(DifficultyLevel::All) => true,
        Some(DifficultyLevel::Intermediate) => !matches!(ability, AbilityLevel::Beginner),
        Some(DifficultyLevel::Advanced) => matches!(ability, AbilityLevel::Advanced),
        Some(DifficultyLevel::Novice | DifficultyLevel::Beginner | DifficultyLevel::Elite)
        | None => false,
    }
}

/// Catalog entries that scale, or are scaled by, an exercise the athlete qualifies for
#[must_use]
pub fn scaled_alternatives<'a>(
    catalog: &'a [ExerciseCatalogEntry],
    profile: &AthleteProfile,
) -> Vec<&'a ExerciseCatalogEntry> {
    let anchor_qualifies = |name: &str| {
        catalog.iter().any(|candidate| {
            candidate.name == name
                && qualifies_for_scaling_anchor(candidate.difficulty_level, profile.ability)
        })
    };

    catalog
        .iter()
        .filter(|entry| {
            entry.scaling_for().is_some_and(anchor_qualifies)
                || entry
                    .scaling_options
                    .iter()
                    .any(|option| anchor_qualifies(option.trim()))
        })
        .filter(|entry| has_required_equipment(entry, profile))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescription_core::models::{AthleteMeasurements, Gender, Units};

    fn profile() -> AthleteProfile {
        let measurements =
            AthleteMeasurements::empty(Gender::Male, 180.0).with_lift(Lift::BackSquat, 300.0);
        let mut profile = AthleteProfile::new(measurements, Units::Imperial);
        profile.equipment = vec!["barbell".to_owned(), "Squat Rack".to_owned()];
        profile
            .skills
            .insert("Toes to Bar".to_owned(), SkillLevel::Intermediate);
        profile
    }

    #[test]
    fn test_equipment_inferred_from_name() {
        let entry = ExerciseCatalogEntry::named("DB Bench Press");
        let required = required_equipment(&entry);
        assert!(required.iter().any(|item| item == equipment::DUMBBELLS));
        assert!(!has_required_equipment(&entry, &profile()));
        assert!(is_dumbbell_only(&entry));

        let squat = ExerciseCatalogEntry::named("Back Squat");
        assert!(has_required_equipment(&squat, &profile()));
    }

    #[test]
    fn test_no_equipment_needs_bodyweight_flag() {
        let mut athlete = profile();
        athlete.equipment.clear();
        let mut entry = ExerciseCatalogEntry::named("Air Squat");
        assert!(!has_required_equipment(&entry, &athlete));
        entry.bodyweight_accessible = true;
        assert!(has_required_equipment(&entry, &athlete));
    }

    #[test]
    fn test_skill_prerequisites() {
        let athlete = profile();
        assert!(prerequisite_met("None", &athlete));
        assert!(prerequisite_met("Toes to Bar: Beginner", &athlete));
        assert!(prerequisite_met("Toes to Bar: Intermediate", &athlete));
        assert!(!prerequisite_met("Toes to Bar: Advanced", &athlete));
        assert!(!prerequisite_met("Ring Dips: Beginner", &athlete));
        assert!(!prerequisite_met("Flying Squirrels: Beginner", &athlete));
    }

    #[test]
    fn test_one_rm_prerequisites() {
        let athlete = profile();
        assert!(prerequisite_met("Back Squat 1RM > 300", &athlete));
        assert!(!prerequisite_met("Back Squat 1RM > 315", &athlete));
        assert!(!prerequisite_met("Deadlift 1RM > 100", &athlete));
    }

    #[test]
    fn test_level_appropriate() {
        assert!(is_level_appropriate(
            Some(DifficultyLevel::Beginner),
            AbilityLevel::Beginner
        ));
        assert!(!is_level_appropriate(
            Some(DifficultyLevel::Intermediate),
            AbilityLevel::Beginner
        ));
        assert!(is_level_appropriate(
            Some(DifficultyLevel::Advanced),
            AbilityLevel::Advanced
        ));
        assert!(!is_level_appropriate(None, AbilityLevel::Advanced));
    }
}
