// ABOUTME: Environment configuration for the prescription engine facade
// ABOUTME: Reads table location, default units and analysis window from PRESCRIPTION_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use std::env;
use std::path::PathBuf;

use prescription_core::errors::{AppError, AppResult};
use prescription_core::models::Units;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Path to a JSON or YAML periodization table replacing the embedded one
pub const PERIODIZATION_TABLE_VAR: &str = "PRESCRIPTION_PERIODIZATION_TABLE";

/// Units used when an athlete row has none
pub const DEFAULT_UNITS_VAR: &str = "PRESCRIPTION_DEFAULT_UNITS";

/// Days of history used for athlete plateau reports
pub const ANALYSIS_WINDOW_VAR: &str = "PRESCRIPTION_ANALYSIS_WINDOW_DAYS";

/// Longest accepted analysis window
const MAX_ANALYSIS_WINDOW_DAYS: i64 = 365;

/// Deployment settings for the engine facade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEnvironment {
    /// Periodization table file; `None` uses the embedded table
    pub periodization_table: Option<PathBuf>,
    /// Units applied to athlete rows that do not record any
    pub default_units: Units,
    /// Plateau analysis window override in days
    pub analysis_window_days: Option<i64>,
}

impl EngineEnvironment {
    /// Load settings from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the analysis window is not a whole number of days
    /// between 1 and 365
    pub fn from_env() -> AppResult<Self> {
        let periodization_table = env::var(PERIODIZATION_TABLE_VAR)
            .ok()
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        let default_units = env::var(DEFAULT_UNITS_VAR)
            .map(|raw| Units::parse(&raw))
            .unwrap_or_default();

        let analysis_window_days = match env::var(ANALYSIS_WINDOW_VAR) {
            Ok(raw) => Some(parse_window(&raw)?),
            Err(_) => None,
        };

        let environment = Self {
            periodization_table,
            default_units,
            analysis_window_days,
        };

        info!(
            table = ?environment.periodization_table,
            units = %environment.default_units.label(),
            window_days = ?environment.analysis_window_days,
            "Loaded engine environment"
        );
        Ok(environment)
    }

    /// Use a periodization table file
    #[must_use]
    pub fn with_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.periodization_table = Some(path.into());
        self
    }

    /// Use a different analysis window
    #[must_use]
    pub const fn with_analysis_window(mut self, days: i64) -> Self {
        self.analysis_window_days = Some(days);
        self
    }
}

fn parse_window(raw: &str) -> AppResult<i64> {
    let days: i64 = raw.trim().parse().map_err(|e| {
        AppError::config_invalid(format!("{ANALYSIS_WINDOW_VAR} must be a whole number: '{raw}'"))
            .with_source(e)
    })?;
    if !(1..=MAX_ANALYSIS_WINDOW_DAYS).contains(&days) {
        return Err(AppError::config_invalid(format!(
            "{ANALYSIS_WINDOW_VAR} must be between 1 and {MAX_ANALYSIS_WINDOW_DAYS}, got {days}"
        )));
    }
    debug!(days, "Analysis window override");
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_bounds() {
        assert_eq!(parse_window(" 14 ").unwrap(), 14);
        assert!(parse_window("0").is_err());
        assert!(parse_window("400").is_err());
        assert!(parse_window("two weeks").is_err());
    }

    #[test]
    fn test_builders() {
        let environment = EngineEnvironment::default()
            .with_table("/tmp/table.yaml")
            .with_analysis_window(21);
        assert_eq!(environment.analysis_window_days, Some(21));
        assert_eq!(
            environment.periodization_table,
            Some(PathBuf::from("/tmp/table.yaml"))
        );
        assert_eq!(environment.default_units, Units::Imperial);
    }
}
