// ABOUTME: Configuration module for the prescription engine facade
// ABOUTME: Deployment settings read from the environment at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine configuration
//!
//! Algorithm thresholds live in `prescription_intelligence::config`. This
//! module only covers deployment concerns: where the periodization table
//! comes from, default units and the plateau analysis window.

/// Environment-based deployment settings
pub mod environment;

pub use environment::EngineEnvironment;
