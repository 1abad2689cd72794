// ABOUTME: Ratio command for prescription-cli
// ABOUTME: Assesses one athlete row or a batch of rows and prints ratios and ability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::Result;
use pierre_prescription_engine::engine::PrescriptionEngine;
use pierre_prescription_engine::models::AthleteRow;
use serde::Deserialize;
use tracing::info;

use crate::helpers::io::{print_json, read_json};

#[derive(Deserialize)]
#[serde(untagged)]
enum AthleteInput {
    Many(Vec<AthleteRow>),
    One(Box<AthleteRow>),
}

/// Print the assessment for every athlete in the input
pub fn run(engine: &PrescriptionEngine, path: &Path) -> Result<()> {
    match read_json::<AthleteInput>(path)? {
        AthleteInput::One(row) => print_json(&engine.assess(*row)),
        AthleteInput::Many(rows) => {
            info!(athletes = rows.len(), "Assessing athlete batch");
            let profiles: Vec<_> = rows
                .into_iter()
                .map(|row| engine.build_profile(row))
                .collect();
            let measurements: Vec<_> = profiles
                .iter()
                .map(|profile| profile.measurements.clone())
                .collect();
            let ratios = engine.calculate_ratios_batch(&measurements);
            let output: Vec<_> = profiles
                .iter()
                .zip(&ratios)
                .map(|(profile, ratios)| {
                    serde_json::json!({
                        "athlete_id": profile.athlete_id,
                        "ability": profile.ability,
                        "ratios": ratios,
                    })
                })
                .collect();
            print_json(&output)
        }
    }
}
