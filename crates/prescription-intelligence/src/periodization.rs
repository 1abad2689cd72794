// ABOUTME: Versioned 12-week periodization table keyed by lift category, ability level and week
// ABOUTME: Loads and validates the embedded JSON resource or an alternate JSON/YAML file, with cyclic week lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Periodization Table
//!
//! The percentage scheme for every main-lift session lives in data, not code.
//! `resources/periodization.json` is embedded at compile time; alternate
//! tables can be loaded from disk. Every table is validated on load:
//!
//! - all nine (category, level) pairs are present
//! - weeks 1 through 12 each appear exactly once
//! - reps and percentages have equal length
//! - weeks 4, 8 and 12 are three-step deloads at 50/60/70 %
//! - every other week has the pair's standard length
//! - percentages lie in 1..=100 and reps are at least 1
//!
//! Lookups past week 12 wrap around (week 13 is week 1). Week 0 and unknown
//! keys are errors: a guessed percentage is worse than none.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use prescription_core::errors::{AppError, AppResult};
use prescription_core::models::{AbilityLevel, LiftCategory};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Weeks in one periodization cycle
pub const WEEKS_PER_CYCLE: u32 = 12;

/// Deload weeks within a cycle
pub const DELOAD_WEEKS: [u32; 3] = [4, 8, 12];

/// Percentages every deload week must use
pub const DELOAD_PERCENTAGES: [u32; 3] = [50, 60, 70];

/// Embedded default table
const EMBEDDED_TABLE: &str = include_str!("../resources/periodization.json");

static EMBEDDED: OnceLock<Result<PeriodizationTable, String>> = OnceLock::new();

/// One week's scheme: a set per element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    /// Week within the cycle, 1-12
    pub week: u32,
    /// Reps per set
    pub reps: Vec<u32>,
    /// Percent of 1RM per set
    pub percentages: Vec<u32>,
}

impl ProgressionEntry {
    /// Number of sets
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.reps.len()
    }

    /// (reps, fraction of 1RM) per set
    pub fn sets(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.reps
            .iter()
            .zip(&self.percentages)
            .map(|(reps, pct)| (*reps, f64::from(*pct) / 100.0))
    }
}

/// Serialized table layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodizationDocument {
    /// Table version label
    pub version: String,
    /// category → level → entries
    pub categories: BTreeMap<String, BTreeMap<String, Vec<ProgressionEntry>>>,
}

/// Validated, immutable periodization table
#[derive(Debug, Clone)]
pub struct PeriodizationTable {
    version: String,
    schemes: HashMap<(LiftCategory, AbilityLevel), Vec<ProgressionEntry>>,
}

fn invalid(message: impl Into<String>) -> AppError {
    AppError::config_invalid(message)
}

/// Map any week >= 1 onto 1..=12
///
/// # Errors
///
/// Returns an error for week 0
pub fn cycle_week(week: u32) -> AppResult<u32> {
    if week == 0 {
        return Err(AppError::invalid_input("week numbers start at 1"));
    }
    Ok((week - 1) % WEEKS_PER_CYCLE + 1)
}

/// Whether a week (cyclic) is a deload week; week 0 never is
#[must_use]
pub fn is_deload_week(week: u32) -> bool {
    cycle_week(week).is_ok_and(|cycled| DELOAD_WEEKS.contains(&cycled))
}

impl PeriodizationTable {
    /// The embedded table, parsed and validated once per process
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded resource fails validation
    pub fn embedded() -> AppResult<&'static Self> {
        EMBEDDED
            .get_or_init(|| Self::from_json_str(EMBEDDED_TABLE).map_err(|e| e.message))
            .as_ref()
            .map_err(|message| invalid(format!("embedded periodization table: {message}")))
    }

    /// Parse and validate a JSON table
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON or the table fails validation
    pub fn from_json_str(text: &str) -> AppResult<Self> {
        let document: PeriodizationDocument = serde_json::from_str(text)?;
        Self::from_document(document)
    }

    /// Parse and validate a YAML table
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML or the table fails validation
    pub fn from_yaml_str(text: &str) -> AppResult<Self> {
        let document: PeriodizationDocument = serde_yaml::from_str(text)
            .map_err(|e| AppError::serialization(format!("invalid YAML table: {e}")).with_source(e))?;
        Self::from_document(document)
    }

    /// Load a `.json`, `.yaml` or `.yml` table from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension, or fails validation
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            AppError::storage(format!("cannot read {}: {e}", path.display())).with_source(e)
        })?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let table = match extension.as_str() {
            "json" => Self::from_json_str(&text),
            "yaml" | "yml" => Self::from_yaml_str(&text),
            other => Err(AppError::invalid_input(format!(
                "unsupported periodization table extension '{other}'"
            ))),
        }?;

        info!(
            path = %path.display(),
            version = %table.version,
            "Loaded periodization table"
        );
        Ok(table)
    }

    /// Validate a parsed document and index it
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` describing the first rule the document breaks
    pub fn from_document(document: PeriodizationDocument) -> AppResult<Self> {
        let mut schemes = HashMap::new();

        for (category_name, levels) in document.categories {
            let category = LiftCategory::parse(&category_name)
                .ok_or_else(|| invalid(format!("unknown category '{category_name}'")))?;
            for (level_name, entries) in levels {
                let level = AbilityLevel::parse(&level_name).ok_or_else(|| {
                    invalid(format!("{category_name}: unknown level '{level_name}'"))
                })?;
                let ordered = validate_scheme(category, level, entries)?;
                if schemes.insert((category, level), ordered).is_some() {
                    return Err(invalid(format!(
                        "{category} / {level} appears more than once"
                    )));
                }
            }
        }

        for category in LiftCategory::ALL {
            for level in AbilityLevel::ALL {
                if !schemes.contains_key(&(category, level)) {
                    return Err(invalid(format!("missing scheme for {category} / {level}")));
                }
            }
        }

        debug!(version = %document.version, "Validated periodization table");
        Ok(Self {
            version: document.version,
            schemes,
        })
    }

    /// Table version label
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Scheme for a category, level and week (cyclic)
    ///
    /// # Errors
    ///
    /// Returns `PeriodizationKeyNotFound` for week 0 or a missing pair
    pub fn lookup(
        &self,
        category: LiftCategory,
        level: AbilityLevel,
        week: u32,
    ) -> AppResult<&ProgressionEntry> {
        let not_found = || AppError::periodization_key(category.as_str(), level.as_str(), week);
        let cycled = cycle_week(week).map_err(|_| not_found())?;
        self.schemes
            .get(&(category, level))
            .and_then(|entries| entries.get((cycled - 1) as usize))
            .ok_or_else(not_found)
    }

    /// Scheme lookup by display names
    ///
    /// # Errors
    ///
    /// Returns `PeriodizationKeyNotFound` for unknown names, week 0 or a missing pair
    pub fn lookup_by_name(
        &self,
        category: &str,
        level: &str,
        week: u32,
    ) -> AppResult<&ProgressionEntry> {
        let not_found = || AppError::periodization_key(category, level, week);
        let category = LiftCategory::parse(category).ok_or_else(not_found)?;
        let level = AbilityLevel::parse(level).ok_or_else(not_found)?;
        self.lookup(category, level, week)
    }

    /// Whether a week (cyclic) is a deload week
    #[must_use]
    pub fn is_deload_week(&self, week: u32) -> bool {
        is_deload_week(week)
    }

    /// Serializable copy of the table
    #[must_use]
    pub fn to_document(&self) -> PeriodizationDocument {
        let mut categories: BTreeMap<String, BTreeMap<String, Vec<ProgressionEntry>>> =
            BTreeMap::new();
        for ((category, level), entries) in &self.schemes {
            categories
                .entry(category.as_str().to_owned())
                .or_default()
                .insert(level.as_str().to_owned(), entries.clone());
        }
        PeriodizationDocument {
            version: self.version.clone(),
            categories,
        }
    }
}

/// Check one (category, level) scheme and return it ordered by week
fn validate_scheme(
    category: LiftCategory,
    level: AbilityLevel,
    mut entries: Vec<ProgressionEntry>,
) -> AppResult<Vec<ProgressionEntry>> {
    entries.sort_by_key(|entry| entry.week);
    let weeks: Vec<u32> = entries.iter().map(|entry| entry.week).collect();
    let expected: Vec<u32> = (1..=WEEKS_PER_CYCLE).collect();
    if weeks != expected {
        return Err(invalid(format!(
            "{category} / {level}: weeks must be 1-{WEEKS_PER_CYCLE} exactly once, found {weeks:?}"
        )));
    }

    let mut standard_length = None;
    for entry in &entries {
        let week = entry.week;
        if entry.reps.len() != entry.percentages.len() {
            return Err(invalid(format!(
                "{category} / {level} week {week}: reps and percentages differ in length"
            )));
        }
        if entry.reps.iter().any(|reps| *reps == 0) {
            return Err(invalid(format!(
                "{category} / {level} week {week}: reps must be at least 1"
            )));
        }
        if entry.percentages.iter().any(|pct| !(1..=100).contains(pct)) {
            return Err(invalid(format!(
                "{category} / {level} week {week}: percentages must be within 1-100"
            )));
        }

        if DELOAD_WEEKS.contains(&week) {
            if entry.percentages != DELOAD_PERCENTAGES {
                return Err(invalid(format!(
                    "{category} / {level} week {week}: deload weeks use {DELOAD_PERCENTAGES:?}"
                )));
            }
        } else {
            let length = *standard_length.get_or_insert(entry.reps.len());
            if entry.reps.len() != length {
                return Err(invalid(format!(
                    "{category} / {level} week {week}: expected {length} sets like the other training weeks"
                )));
            }
        }
    }

    Ok(entries)
}
