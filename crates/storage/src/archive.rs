// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Moving finished jobs' artifacts into a compressed bundle.
//!
//! The procedure only destroys data once it is safely elsewhere:
//! 1. bundle every selected output file plus the selected log lines,
//! 2. atomically rewrite the submission log without those lines,
//! 3. delete the bundled output files.
//!
//! A failure before step 3 leaves the original files as they were.

use crate::bundle::{bundle_name, member_path, BundleWriter};
use crate::log_rewrite::LogRewrite;
use cj_core::{Clock, Filter, Job, JobId};
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot create archive directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write bundle {}: {source}", path.display())]
    Bundle {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot rewrite submission log {}: {source}", path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where archiving reads from and writes to.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    /// Bundle member paths are relative to this directory
    pub home: PathBuf,
    pub log_path: PathBuf,
    pub archive_dir: PathBuf,
    pub cluster_suffix: String,
}

impl ArchiveLayout {
    /// Member holding the archived submission log lines.
    fn log_member(&self) -> PathBuf {
        let mut name = OsString::from(member_path(&self.log_path, &self.home).as_os_str());
        name.push(".archived");
        PathBuf::from(name)
    }
}

/// Outcome of a completed archive run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub bundle: PathBuf,
    pub archived: Vec<JobId>,
    pub log_lines_removed: usize,
    pub deleted: Vec<PathBuf>,
    /// Bundled output files that could not be deleted
    pub leftover: Vec<PathBuf>,
}

/// Jobs eligible for archiving: matching `filter`, no longer in the live
/// queue, and backed by an output file or a log line.
pub fn select<'a, I>(jobs: I, filter: &'a Filter) -> Vec<&'a Job>
where
    I: IntoIterator<Item = &'a Job>,
    I::IntoIter: 'a,
{
    filter.apply(jobs).filter(|job| !job.is_active() && job.has_artifacts()).collect()
}

/// Archive `selected` jobs. Returns `None` without touching the filesystem
/// when there is nothing to archive.
pub fn archive(
    selected: &[&Job],
    layout: &ArchiveLayout,
    clock: &impl Clock,
) -> Result<Option<ArchiveReport>, ArchiveError> {
    if selected.is_empty() {
        tracing::info!("nothing to archive");
        return Ok(None);
    }

    std::fs::create_dir_all(&layout.archive_dir).map_err(|source| ArchiveError::CreateDir {
        path: layout.archive_dir.clone(),
        source,
    })?;

    let now = clock.now();
    let bundle_path = layout.archive_dir.join(bundle_name(now));
    let bundle_err = |source: std::io::Error| ArchiveError::Bundle { path: bundle_path.clone(), source };

    let mut writer =
        BundleWriter::create(bundle_path.clone(), now.and_utc().timestamp().max(0) as u64)
            .map_err(bundle_err)?;

    let mut to_delete = Vec::new();
    for job in selected {
        if let Some(output) = &job.output_path {
            if let Err(e) = writer.add_file(output, &member_path(output, &layout.home)) {
                writer.abandon();
                return Err(bundle_err(e));
            }
            to_delete.push(output.clone());
        }
    }

    // Bundle exactly the log lines the rewrite will drop
    let archived_ids: BTreeSet<JobId> = selected.iter().map(|job| job.id).collect();
    let log_err = |source: std::io::Error| ArchiveError::Log { path: layout.log_path.clone(), source };
    let rewrite = match LogRewrite::plan(&layout.log_path, &archived_ids, &layout.cluster_suffix) {
        Ok(rewrite) => rewrite,
        Err(e) => {
            writer.abandon();
            return Err(log_err(e));
        }
    };
    if rewrite.removed() > 0 {
        if let Err(e) = writer.add_data(&layout.log_member(), rewrite.removed_lines()) {
            writer.abandon();
            return Err(bundle_err(e));
        }
    }
    let bundle = writer.finish().map_err(bundle_err)?;
    tracing::info!(bundle = %bundle.display(), jobs = selected.len(), "wrote archive bundle");

    let log_lines_removed = match rewrite.commit() {
        Ok(n) => n,
        Err(source) => {
            // Originals are untouched, drop the duplicate bundle
            if let Err(e) = std::fs::remove_file(&bundle) {
                tracing::warn!(bundle = %bundle.display(), error = %e, "cannot remove bundle");
            }
            return Err(log_err(source));
        }
    };

    let (deleted, leftover) = delete_files(to_delete);
    Ok(Some(ArchiveReport {
        bundle,
        archived: selected.iter().map(|job| job.id).collect(),
        log_lines_removed,
        deleted,
        leftover,
    }))
}

fn delete_files(paths: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut deleted = Vec::new();
    let mut leftover = Vec::new();
    for path in paths {
        match std::fs::remove_file(&path) {
            Ok(()) => deleted.push(path),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "archived file could not be deleted");
                leftover.push(path);
            }
        }
    }
    (deleted, leftover)
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
