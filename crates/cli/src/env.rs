// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the cj binary.

use std::path::PathBuf;
use std::time::Duration;

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Home directory: CJ_HOME > HOME > platform home
pub fn home_dir() -> Option<PathBuf> {
    var("CJ_HOME").or_else(|| var("HOME")).map(PathBuf::from).or_else(dirs::home_dir)
}

/// Current user: CJ_USER > USER > LOGNAME
pub fn user() -> Option<String> {
    var("CJ_USER").or_else(|| var("USER")).or_else(|| var("LOGNAME"))
}

pub fn log_path() -> Option<PathBuf> {
    var("CJ_LOG_PATH").map(PathBuf::from)
}

pub fn output_dir() -> Option<PathBuf> {
    var("CJ_OUTPUT_DIR").map(PathBuf::from)
}

pub fn archive_dir() -> Option<PathBuf> {
    var("CJ_ARCHIVE_DIR").map(PathBuf::from)
}

pub fn cluster_suffix() -> Option<String> {
    var("CJ_CLUSTER_SUFFIX")
}

pub fn qstat() -> Option<String> {
    var("CJ_QSTAT")
}

pub fn qdel() -> Option<String> {
    var("CJ_QDEL")
}

/// How long scheduler output stays cached (default 60s, `0` disables).
pub fn cache_max_age() -> Duration {
    var("CJ_CACHE_SECS")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(Duration::from_secs(60))
}

pub fn cache_dir() -> PathBuf {
    var("CJ_CACHE_DIR").map(PathBuf::from).unwrap_or_else(std::env::temp_dir)
}

/// Terminal width for tables (default 120).
pub fn columns() -> usize {
    var("COLUMNS").and_then(|s| s.parse::<usize>().ok()).filter(|w| *w > 0).unwrap_or(120)
}

/// Log filter directives, e.g. `CJ_LOG=cj_adapters=debug`.
pub fn log_filter() -> Option<String> {
    var("CJ_LOG")
}
