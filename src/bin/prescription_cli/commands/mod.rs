// ABOUTME: Re-exports command modules for prescription-cli
// ABOUTME: Provides access to ratio, prescription, plateau and table commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod plateau;
pub mod prescribe;
pub mod ratios;
pub mod table;
