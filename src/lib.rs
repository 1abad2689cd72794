// ABOUTME: Main library entry point for the Pierre prescription engine
// ABOUTME: Re-exports the core models and intelligence engines behind a single facade
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Prescription Engine
//!
//! Adaptive strength training prescription: strength ratios and weakness
//! flags, a data-driven 12-week periodization table, per-block exercise
//! selection, and plateau detection with intervention protocols.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pierre_prescription_engine::config::EngineEnvironment;
//! use pierre_prescription_engine::engine::PrescriptionEngine;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let environment = EngineEnvironment::from_env()?;
//! let engine = PrescriptionEngine::from_environment(&environment)?;
//! println!("table {}", engine.table().version());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`prescription_core`**: Errors, constants, strict models and boundary rows
//! - **`prescription_intelligence`**: The engines and their threshold configuration
//! - **engine**: Facade taking stored rows and fanning batches out with rayon
//! - **config**: Deployment settings from the environment
//! - **logging**: Tracing subscriber setup

/// Deployment configuration
pub mod config;

/// Prescription engine facade
pub mod engine;

/// Logging configuration and structured event helpers
pub mod logging;

pub use prescription_core::errors::{AppError, AppResult, ErrorCode};
pub use prescription_core::models;
pub use prescription_intelligence as intelligence;

pub use config::EngineEnvironment;
pub use engine::{AthleteAssessment, PrescriptionEngine, PrescriptionRequest, PrescriptionResponse};
