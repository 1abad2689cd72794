// ABOUTME: Re-exports helper modules for prescription-cli
// ABOUTME: Provides JSON input and output utilities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod io;
