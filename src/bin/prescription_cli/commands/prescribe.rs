// ABOUTME: Prescribe command for prescription-cli
// ABOUTME: Fills one training block from a request file and prints the prescription
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::Path;

use anyhow::{Context, Result};
use pierre_prescription_engine::engine::{PrescriptionEngine, PrescriptionRequest};
use tracing::info;

use crate::helpers::io::{print_json, read_json};

/// Prescribe the requested block
pub fn run(engine: &PrescriptionEngine, path: &Path) -> Result<()> {
    let request: PrescriptionRequest = read_json(path)?;
    let block = request.assignment.block;
    let week = request.assignment.week;

    let response = engine
        .prescribe(request)
        .with_context(|| format!("Failed to prescribe {block} for week {week}"))?;

    info!(
        block = %response.block,
        rows = response.exercises.len(),
        interventions = response.interventions_applied.len(),
        "Prescription complete"
    );
    print_json(&response)
}
