// ABOUTME: Core types and constants for the Pierre prescription engine
// ABOUTME: Foundation crate with error handling, domain models, constants and lenient parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Prescription Core
//!
//! Foundation crate providing shared types and constants for the Pierre
//! training prescription engine. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `AppResult`
//! - **constants**: Lift ordering, skill list, equipment keyword rules
//! - **models**: Athlete measurements, performance logs, exercise catalog and prescriptions
//! - **parsing**: Lenient numeric parsing for loosely validated user entry

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (athlete, performance log, exercise catalog, prescriptions)
pub mod models;

/// Lenient parsing of free-text numeric fields
pub mod parsing;
