// ABOUTME: Plateau command for prescription-cli
// ABOUTME: Analyzes one athlete's logs or a map of athletes and prints plateau reports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use pierre_prescription_engine::engine::{performance_logs, PrescriptionEngine};
use pierre_prescription_engine::models::PerformanceLogRow;
use serde::Deserialize;

use crate::helpers::io::{print_json, read_json};

#[derive(Deserialize)]
#[serde(untagged)]
enum LogInput {
    Athlete(Vec<PerformanceLogRow>),
    Athletes(BTreeMap<String, Vec<PerformanceLogRow>>),
}

/// Print plateau reports as of `as_of`
pub fn run(engine: &PrescriptionEngine, path: &Path, as_of: DateTime<Utc>) -> Result<()> {
    match read_json::<LogInput>(path)? {
        LogInput::Athlete(rows) => print_json(&engine.analyze_plateaus(rows, as_of)),
        LogInput::Athletes(athletes) => {
            let athletes: BTreeMap<_, _> = athletes
                .into_iter()
                .map(|(athlete, rows)| (athlete, performance_logs(rows)))
                .collect();
            print_json(&engine.analyze_athletes_batch(&athletes, as_of))
        }
    }
}
