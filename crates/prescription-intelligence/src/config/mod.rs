// ABOUTME: Configuration module for prescription-intelligence crate
// ABOUTME: Re-exports intelligence configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Intelligence module configuration (ratios, assignment, plateaus, interventions)
pub mod intelligence;

pub use intelligence::{ConfigError, IntelligenceConfig};
