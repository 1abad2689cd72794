// ABOUTME: JSON input and output helpers for prescription-cli
// ABOUTME: Reads request files or stdin and prints pretty JSON to stdout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Path that means "read stdin"
const STDIN_MARKER: &str = "-";

/// Read and deserialize JSON from a file or stdin
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = if path.as_os_str() == STDIN_MARKER {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("Failed to write output")?;
    Ok(())
}
