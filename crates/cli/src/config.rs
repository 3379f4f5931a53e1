// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved runtime settings.

use crate::env;
use anyhow::{anyhow, Result};
use cj_storage::ArchiveLayout;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CLUSTER_SUFFIX: &str = "bc.ccbr.utoronto.ca";
pub const DEFAULT_QSTAT: &str = "/usr/bin/qstat";
pub const DEFAULT_QDEL: &str = "qdel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub home: PathBuf,
    pub user: String,
    /// Submission log, `~/.pbs_log` by default
    pub log_path: PathBuf,
    /// Scheduler output files, `~/pbs-output` by default
    pub output_dir: PathBuf,
    pub archive_dir: PathBuf,
    pub cluster_suffix: String,
    pub qstat: String,
    pub qdel: String,
    pub cache_max_age: Duration,
    pub cache_dir: PathBuf,
    pub width: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let home = env::home_dir().ok_or_else(|| anyhow!("cannot determine home directory"))?;
        let user = env::user().ok_or_else(|| anyhow!("cannot determine current user"))?;
        let output_dir = env::output_dir().unwrap_or_else(|| home.join("pbs-output"));
        Ok(Self {
            log_path: env::log_path().unwrap_or_else(|| home.join(".pbs_log")),
            archive_dir: env::archive_dir().unwrap_or_else(|| output_dir.join("archive")),
            output_dir,
            home,
            user,
            cluster_suffix: env::cluster_suffix()
                .unwrap_or_else(|| DEFAULT_CLUSTER_SUFFIX.to_string()),
            qstat: env::qstat().unwrap_or_else(|| DEFAULT_QSTAT.to_string()),
            qdel: env::qdel().unwrap_or_else(|| DEFAULT_QDEL.to_string()),
            cache_max_age: env::cache_max_age(),
            cache_dir: env::cache_dir(),
            width: env::columns(),
        })
    }

    pub fn archive_layout(&self) -> ArchiveLayout {
        ArchiveLayout {
            home: self.home.clone(),
            log_path: self.log_path.clone(),
            archive_dir: self.archive_dir.clone(),
            cluster_suffix: self.cluster_suffix.clone(),
        }
    }

    /// Settings rooted at `home`, with the scheduler commands left at
    /// their defaults and caching disabled.
    #[cfg(test)]
    pub fn for_home(home: &std::path::Path, user: &str) -> Self {
        let output_dir = home.join("pbs-output");
        Self {
            log_path: home.join(".pbs_log"),
            archive_dir: output_dir.join("archive"),
            output_dir,
            home: home.to_path_buf(),
            user: user.to_string(),
            cluster_suffix: DEFAULT_CLUSTER_SUFFIX.to_string(),
            qstat: DEFAULT_QSTAT.to_string(),
            qdel: DEFAULT_QDEL.to_string(),
            cache_max_age: Duration::ZERO,
            cache_dir: home.join(".cache"),
            width: 120,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
