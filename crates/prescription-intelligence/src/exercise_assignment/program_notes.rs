// ABOUTME: Program note parsing for per-level sets, reps, load percentage and duration
// ABOUTME: Reads compact "SxR,P%" / "SxR" / "SxT" strings and the legacy structured format
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::LazyLock;

use prescription_core::models::ProgramNote;
use regex::Regex;

/// Timed work: "5x45s", "3x2min"
static TIMED_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)(sec|min|s|m)\b").ok());

/// Percentage work: "5x3,85%"
static PERCENT_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)\s*,\s*(\d+)\s*%").ok());

/// Plain sets and reps: "3x10"
static SETS_REPS_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*x\s*(\d+)").ok());

/// Sets, reps and load parsed from a program note
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotePlan {
    /// Set count
    pub sets: Option<u32>,
    /// Rep count; absent for timed work
    pub reps: Option<u32>,
    /// Fraction of one-rep max, 0.0-1.0
    pub percent_1rm: Option<f64>,
    /// Duration or load text
    pub weight_time: Option<String>,
    /// Note text to show when no cue exists
    pub notes: Option<String>,
}

impl NotePlan {
    /// Whether the plan describes work that can be prescribed
    #[must_use]
    pub fn is_prescribable(&self) -> bool {
        self.sets.is_some_and(|sets| sets > 0)
            && (self.reps.is_some_and(|reps| reps > 0) || self.weight_time.is_some())
    }
}

/// Settings that shape note parsing
#[derive(Debug, Clone, Copy)]
pub struct NoteDefaults {
    /// Sets used when the note gives none
    pub sets: u32,
    /// Reps used when the note gives none
    pub reps: u32,
    /// Volume multiplier in deload weeks
    pub deload_multiplier: f64,
}

/// Parse the note for `level`, falling back to defaults
///
/// Timed notes keep their duration and carry no reps. Deload weeks scale
/// sets and reps by the deload multiplier.
#[must_use]
pub fn parse_program_note(
    note: Option<&ProgramNote>,
    level: &str,
    is_deload: bool,
    defaults: NoteDefaults,
) -> NotePlan {
    // Deload multiplier is validated into (0, 1], so the scaled count fits in u32
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let deload = |count: u32| {
        if is_deload {
            (f64::from(count) * defaults.deload_multiplier).round() as u32
        } else {
            count
        }
    };

    let mut plan = match note {
        None => NotePlan::default(),
        Some(ProgramNote::Text(text)) => {
            let mut plan = parse_compact(text.trim().trim_end_matches(','));
            plan.sets = plan.sets.map(deload);
            plan.reps = plan.reps.map(deload);
            plan
        }
        Some(ProgramNote::Structured(structured)) => NotePlan {
            sets: structured.sets.filter(|s| *s > 0).map(deload),
            reps: structured.reps.filter(|r| *r > 0).map(deload),
            percent_1rm: structured
                .percent_1rm
                .filter(|p| p.is_finite() && *p > 0.0)
                .map(|p| p / 100.0),
            weight_time: structured
                .weight_time
                .as_deref()
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_owned),
            notes: structured
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_owned),
        },
    };

    if plan.weight_time.is_none() && (plan.sets.is_none() || plan.reps.is_none()) {
        plan.sets = plan.sets.or(Some(defaults.sets));
        plan.reps = plan.reps.or(Some(defaults.reps));
        plan.notes = plan.notes.or_else(|| Some(format!("{level} Default")));
    }

    plan
}

fn parse_compact(text: &str) -> NotePlan {
    let capture = |pattern: &LazyLock<Option<Regex>>, index: usize| {
        LazyLock::force(pattern)
            .as_ref()
            .and_then(|re| re.captures(text))
            .and_then(|caps| caps.get(index).map(|m| m.as_str().to_owned()))
    };
    let number = |raw: Option<String>| raw.and_then(|value| value.parse::<u32>().ok());

    if let Some(duration) = capture(&TIMED_PATTERN, 2) {
        let unit = capture(&TIMED_PATTERN, 3).unwrap_or_default();
        return NotePlan {
            sets: number(capture(&TIMED_PATTERN, 1)),
            weight_time: Some(format!("{duration}{unit}")),
            ..NotePlan::default()
        };
    }

    if let Some(percent) = number(capture(&PERCENT_PATTERN, 3)) {
        return NotePlan {
            sets: number(capture(&PERCENT_PATTERN, 1)),
            reps: number(capture(&PERCENT_PATTERN, 2)),
            percent_1rm: Some(f64::from(percent) / 100.0),
            ..NotePlan::default()
        };
    }

    NotePlan {
        sets: number(capture(&SETS_REPS_PATTERN, 1)),
        reps: number(capture(&SETS_REPS_PATTERN, 2)),
        ..NotePlan::default()
    }
}

/// Shorten a note to `max_len` characters, ending in "..." when cut
#[must_use]
pub fn truncate_note(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_owned();
    }
    let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use prescription_core::models::StructuredNote;

    const DEFAULTS: NoteDefaults = NoteDefaults {
        sets: 3,
        reps: 10,
        deload_multiplier: 0.6,
    };

    fn text(note: &str) -> ProgramNote {
        ProgramNote::Text(note.to_owned())
    }

    #[test]
    fn test_static_patterns_compile() {
        assert!(LazyLock::force(&TIMED_PATTERN).is_some());
        assert!(LazyLock::force(&PERCENT_PATTERN).is_some());
        assert!(LazyLock::force(&SETS_REPS_PATTERN).is_some());
    }

    #[test]
    fn test_percent_note() {
        let plan = parse_program_note(Some(&text("5x3,85%")), "Advanced", false, DEFAULTS);
        assert_eq!(plan.sets, Some(5));
        assert_eq!(plan.reps, Some(3));
        assert!((plan.percent_1rm.unwrap() - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn test_timed_note_has_no_reps() {
        let plan = parse_program_note(Some(&text("4x45s")), "Beginner", false, DEFAULTS);
        assert_eq!(plan.sets, Some(4));
        assert_eq!(plan.reps, None);
        assert_eq!(plan.weight_time.as_deref(), Some("45s"));
        assert!(plan.is_prescribable());
    }

    #[test]
    fn test_deload_scales_sets_and_reps() {
        let plan = parse_program_note(Some(&text("5x10")), "Intermediate", true, DEFAULTS);
        assert_eq!(plan.sets, Some(3));
        assert_eq!(plan.reps, Some(6));
    }

    #[test]
    fn test_missing_note_uses_level_default() {
        let plan = parse_program_note(None, "Novice", false, DEFAULTS);
        assert_eq!(plan.sets, Some(3));
        assert_eq!(plan.reps, Some(10));
        assert_eq!(plan.notes.as_deref(), Some("Novice Default"));
    }

    #[test]
    fn test_structured_note_percent_is_scaled() {
        let note = ProgramNote::Structured(StructuredNote {
            sets: Some(4),
            reps: Some(6),
            percent_1rm: Some(70.0),
            weight_time: None,
            notes: Some("Controlled eccentric".to_owned()),
        });
        let plan = parse_program_note(Some(&note), "Advanced", false, DEFAULTS);
        assert_eq!(plan.sets, Some(4));
        assert!((plan.percent_1rm.unwrap() - 0.7).abs() < 1e-9);
        assert_eq!(plan.notes.as_deref(), Some("Controlled eccentric"));
    }

    #[test]
    fn test_truncate_note() {
        let long = "a".repeat(120);
        let cut = truncate_note(&long, 100);
        assert_eq!(cut.chars().count(), 100);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate_note("short", 100), "short");
    }
}
