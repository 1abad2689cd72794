// ABOUTME: Periodization table commands for prescription-cli
// ABOUTME: Validates table files and prints individual week schemes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::{Context, Result};
use pierre_prescription_engine::config::EngineEnvironment;
use pierre_prescription_engine::engine::PrescriptionEngine;
use pierre_prescription_engine::intelligence::periodization::{DELOAD_WEEKS, WEEKS_PER_CYCLE};
use pierre_prescription_engine::intelligence::PeriodizationTable;
use serde_json::json;
use tracing::info;

use crate::helpers::io::print_json;

/// Validate a table file, the configured table or the embedded table
pub fn validate(path: Option<&Path>, environment: &EngineEnvironment) -> Result<()> {
    let source = path.or(environment.periodization_table.as_deref());
    let (table, origin) = match source {
        Some(path) => (
            PeriodizationTable::from_path(path)
                .with_context(|| format!("Invalid periodization table {}", path.display()))?,
            path.display().to_string(),
        ),
        None => (
            PeriodizationTable::embedded()
                .context("Invalid embedded periodization table")?
                .clone(),
            "embedded".to_owned(),
        ),
    };

    info!(origin = %origin, version = %table.version(), "Periodization table is valid");
    print_json(&json!({
        "valid": true,
        "source": origin,
        "version": table.version(),
        "weeks_per_cycle": WEEKS_PER_CYCLE,
        "deload_weeks": DELOAD_WEEKS,
    }))
}

/// Print the scheme for one category, level and week
pub fn lookup(engine: &PrescriptionEngine, category: &str, level: &str, week: u32) -> Result<()> {
    let entry = engine
        .table()
        .lookup_by_name(category, level, week)
        .with_context(|| format!("No scheme for {category} / {level} week {week}"))?;

    print_json(&json!({
        "category": category,
        "level": level,
        "week": week,
        "deload": engine.table().is_deload_week(week),
        "scheme": entry,
    }))
}
