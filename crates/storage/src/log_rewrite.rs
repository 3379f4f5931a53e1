// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Crash-safe removal of archived entries from the submission log.

use cj_adapters::parse_log_line;
use cj_core::JobId;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// A pending rewrite of the log at `path` without the lines of archived jobs.
///
/// Planning reads the log once and splits it; the removed lines go into the
/// bundle before anything on disk changes, so what the bundle holds is
/// exactly what [`LogRewrite::commit`] drops.
#[derive(Debug)]
pub struct LogRewrite {
    path: PathBuf,
    kept: Vec<u8>,
    removed: Vec<u8>,
    count: usize,
}

impl LogRewrite {
    /// Split the log into kept and removed lines.
    ///
    /// A line is removed when it parses, belongs to this cluster and names an
    /// archived job. Every other line is kept byte for byte in its original
    /// order, including lines from other clusters and lines that do not
    /// parse. A missing log plans nothing.
    pub fn plan(path: &Path, archived: &BTreeSet<JobId>, cluster_suffix: &str) -> io::Result<Self> {
        let original = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        let mut kept = Vec::with_capacity(original.len());
        let mut removed = Vec::new();
        let mut count = 0;
        for line in original.split_inclusive(|b| *b == b'\n') {
            let entry = std::str::from_utf8(line).ok().and_then(parse_log_line);
            match entry {
                Some(entry) if entry.is_local(cluster_suffix) && archived.contains(&entry.id) => {
                    removed.extend_from_slice(line);
                    if !line.ends_with(b"\n") {
                        removed.push(b'\n');
                    }
                    count += 1;
                }
                _ => kept.extend_from_slice(line),
            }
        }
        Ok(Self { path: path.to_path_buf(), kept, removed, count })
    }

    /// The removed lines, newline terminated.
    pub fn removed_lines(&self) -> &[u8] {
        &self.removed
    }

    pub fn removed(&self) -> usize {
        self.count
    }

    /// Replace the log with the kept lines.
    ///
    /// The new content is written to a sibling temp file, synced, then
    /// renamed over the original, so the log is either fully old or fully
    /// new. The file is left untouched when nothing was removed.
    pub fn commit(self) -> io::Result<usize> {
        if self.count == 0 {
            return Ok(0);
        }

        let tmp = tmp_path(&self.path);
        let written = File::create(&tmp).and_then(|mut file| {
            file.write_all(&self.kept)?;
            file.sync_all()?;
            if let Ok(meta) = fs::metadata(&self.path) {
                fs::set_permissions(&tmp, meta.permissions())?;
            }
            fs::rename(&tmp, &self.path)
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        tracing::info!(path = %self.path.display(), removed = self.count, "rewrote submission log");
        Ok(self.count)
    }
}

#[cfg(test)]
#[path = "log_rewrite_tests.rs"]
mod tests;
