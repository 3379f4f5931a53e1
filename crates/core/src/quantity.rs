// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resource quantities reported by the scheduler: memory and walltime.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("invalid memory value: {0:?}")]
    Memory(String),
    #[error("invalid walltime value: {0:?}")]
    Walltime(String),
}

/// Amount of memory, stored in gigabytes (binary units, 1G = 1024M).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Memory(f64);

impl Memory {
    pub fn from_gb(gb: f64) -> Self {
        Self(gb)
    }

    pub fn gb(self) -> f64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 <= 0.0
    }

    /// Parse a scheduler memory string such as `4gb`, `2048mb`, `1048576kb`.
    ///
    /// Units are case-insensitive; the trailing `b` is optional and a bare
    /// number is taken as bytes.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let lower = s.trim().to_ascii_lowercase();
        let split = lower.find(|c: char| !(c.is_ascii_digit() || c == '.')).unwrap_or(lower.len());
        let (number, unit) = lower.split_at(split);
        let value: f64 = number.parse().map_err(|_| QuantityError::Memory(s.to_string()))?;
        let divisor = match unit.trim_end_matches('b') {
            "" if unit.is_empty() || unit == "b" => 1024.0 * 1024.0 * 1024.0,
            "k" => 1024.0 * 1024.0,
            "m" => 1024.0,
            "g" => 1.0,
            "t" => 1.0 / 1024.0,
            _ => return Err(QuantityError::Memory(s.to_string())),
        };
        Ok(Self(value / divisor))
    }
}

/// A walltime duration in whole seconds, displayed as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Walltime(u64);

impl Walltime {
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> u64 {
        self.0
    }

    /// Requested walltime as fractional hours (`rwalltime=1.5`), rounded to
    /// whole minutes.
    pub fn from_hours(hours: f64) -> Self {
        let minutes = (hours.max(0.0) * 60.0).round() as u64;
        Self(minutes * 60)
    }

    /// Parse `HH:MM:SS`, `MM:SS` or `SS`. Hours may exceed 24.
    pub fn parse(s: &str) -> Result<Self, QuantityError> {
        let err = || QuantityError::Walltime(s.to_string());
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
            return Err(err());
        }
        let mut total: u64 = 0;
        for part in parts {
            let n: u64 = part.parse().map_err(|_| err())?;
            total = total.checked_mul(60).and_then(|t| t.checked_add(n)).ok_or_else(err)?;
        }
        Ok(Self(total))
    }
}

impl fmt::Display for Walltime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
#[path = "quantity_tests.rs"]
mod tests;
