// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-job output files written by the scheduler on completion.
//!
//! Two naming schemes are recognized:
//! - `<id>.<cluster suffix>.OU`
//! - `<name>.o<id>`, which also carries the job's display name
//!
//! Accounting details are read from `==> Key : value` header lines.

use crate::source::{SourceAdapter, SourceError};
use cj_core::{JobFields, JobId, Memory, Source, Walltime};
use chrono::{DateTime, Local};
use regex::Regex;
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// More files than this makes every listing slow.
pub const LARGE_DIR_THRESHOLD: usize = 1000;

#[allow(clippy::expect_used)]
static GENERIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)\.o(\d+)$").expect("constant regex pattern is valid"));

/// Job id and optional display name encoded in an output file name.
pub fn classify_file_name(file_name: &str, cluster_suffix: &str) -> Option<(JobId, Option<String>)> {
    let cluster_tail = format!(".{cluster_suffix}.OU");
    if let Some(id) = file_name.strip_suffix(&cluster_tail) {
        if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
            return id.parse().ok().map(|id| (JobId(id), None));
        }
        return None;
    }
    let caps = GENERIC_NAME.captures(file_name)?;
    let id = caps[2].parse().ok()?;
    Some((JobId(id), Some(caps[1].to_string())))
}

/// Collect `==>` header values. `Resources used` and `Job config` are
/// flattened into their `key=value` parts.
pub fn parse_headers(reader: impl BufRead) -> std::io::Result<HashMap<String, String>> {
    let mut values = HashMap::new();
    for line in reader.split(b'\n') {
        let line = line?;
        let Some(rest) = line.strip_prefix(b"==>") else {
            continue;
        };
        let rest = String::from_utf8_lossy(rest);
        let Some((param, value)) = rest.trim().split_once(':') else {
            continue;
        };
        let (param, value) = (param.trim(), value.trim());
        if param == "Resources used" || param == "Job config" {
            for pair in value.split(',') {
                if let Some((k, v)) = pair.split_once('=') {
                    values.insert(k.trim().to_string(), v.trim().to_string());
                }
            }
        } else {
            values.insert(param.to_string(), value.to_string());
        }
    }
    Ok(values)
}

/// Map header values to partial fields.
pub fn header_fields(headers: &HashMap<String, String>) -> JobFields {
    let get = |key: &str| headers.get(key).map(|s| s.as_str()).filter(|s| !s.is_empty());
    let float = |key: &str| get(key).and_then(|v| v.parse::<f64>().ok());

    JobFields {
        name: get("name").map(|n| n.trim_matches('\'').to_string()),
        exec_host: get("Execution host").map(str::to_string),
        run_command: get("Run command").map(str::to_string),
        exit_status: get("Exit status").and_then(|s| s.parse().ok()),
        used_memory: get("mem").and_then(|v| Memory::parse(v).ok()),
        used_walltime: get("walltime").and_then(|v| Walltime::parse(v).ok()),
        requested_memory: float("rmem").map(Memory::from_gb),
        requested_walltime: float("rwalltime").map(Walltime::from_hours),
        ..JobFields::new(Source::OutputArtifact)
    }
}

/// Output directory adapter.
#[derive(Debug, Clone)]
pub struct OutputArtifact {
    dir: PathBuf,
    cluster_suffix: String,
}

impl OutputArtifact {
    pub fn new(dir: impl Into<PathBuf>, cluster_suffix: impl Into<String>) -> Self {
        Self { dir: dir.into(), cluster_suffix: cluster_suffix.into() }
    }

    fn read_file(&self, path: &Path, id: JobId, generic_name: Option<String>) -> Option<JobFields> {
        let result = std::fs::File::open(path).and_then(|file| {
            let finished_at = DateTime::<Local>::from(file.metadata()?.modified()?).naive_local();
            let headers = parse_headers(BufReader::new(file))?;
            Ok((finished_at, headers))
        });
        match result {
            Ok((finished_at, headers)) => {
                let mut fields = header_fields(&headers);
                if fields.name.is_none() {
                    fields.name = generic_name;
                }
                fields.finished_at = Some(finished_at);
                fields.output_path = Some(path.to_path_buf());
                Some(fields)
            }
            Err(e) => {
                tracing::warn!(job_id = %id, path = %path.display(), error = %e, "cannot read output file");
                None
            }
        }
    }
}

impl SourceAdapter for OutputArtifact {
    fn source(&self) -> Source {
        Source::OutputArtifact
    }

    /// Output files are written into the user's own directory, so the owner
    /// flag is moot.
    fn fetch(&self, _restrict_to_owner: bool) -> Result<Vec<(JobId, JobFields)>, SourceError> {
        let entries = std::fs::read_dir(&self.dir)
            .and_then(|entries| entries.collect::<Result<Vec<_>, _>>())
            .map_err(|e| SourceError::io(&self.dir, e))?;

        if entries.len() > LARGE_DIR_THRESHOLD {
            tracing::warn!(
                dir = %self.dir.display(),
                files = entries.len(),
                "output directory is large and will make listings slow; consider `cj archive`"
            );
        }

        let mut pairs = Vec::new();
        for entry in entries {
            let file_name = entry.file_name();
            let Some((id, name)) = classify_file_name(&file_name.to_string_lossy(), &self.cluster_suffix)
            else {
                continue;
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if let Some(fields) = self.read_file(&path, id, name) {
                pairs.push((id, fields));
            }
        }
        Ok(pairs)
    }
}

#[cfg(test)]
#[path = "output_artifact_tests.rs"]
mod tests;
