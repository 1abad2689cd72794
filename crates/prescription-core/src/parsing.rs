// ABOUTME: Lenient numeric parsing for free-text training fields entered by athletes
// ABOUTME: Extracts the leading number from strings like "225 lbs" and never fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weight, set and rep columns originate from loosely validated user entry.
//! Parsing reads the leading numeric prefix (`"225 lbs"` → `225.0`,
//! `"3x"` → `3`) and yields `None` when there is no number at all. Nothing
//! here returns an error.

/// Parse the leading decimal number of `raw`, ignoring surrounding whitespace
#[must_use]
pub fn leading_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '-' | '+' if idx == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = idx + ch.len_utf8();
    }

    if !seen_digit {
        return None;
    }

    trimmed[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse the leading integer of `raw`; fractional parts are dropped
#[must_use]
pub fn leading_u32(raw: &str) -> Option<u32> {
    leading_f64(raw)
        .filter(|value| *value >= 0.0)
        .map(|value| value.trunc() as u32)
}

/// Parse a positive weight; zero and negative values count as "no weight"
#[must_use]
pub fn positive_weight(raw: &str) -> Option<f64> {
    leading_f64(raw).filter(|value| *value > 0.0)
}
