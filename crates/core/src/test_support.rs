// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::fields::{JobFields, Source};
use crate::job::QueueState;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for partial job fields.
pub mod strategies {
    use crate::fields::{JobFields, Source};
    use crate::job::QueueState;
    use crate::quantity::{Memory, Walltime};
    use chrono::{NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    pub fn arb_source() -> impl Strategy<Value = Source> {
        prop_oneof![
            Just(Source::LiveQueue),
            Just(Source::SubmissionLog),
            Just(Source::OutputArtifact),
        ]
    }

    pub fn arb_queue_state() -> impl Strategy<Value = QueueState> {
        prop_oneof![
            Just(QueueState::Queued),
            Just(QueueState::Running),
            Just(QueueState::Exiting),
            Just(QueueState::Unknown),
        ]
    }

    pub fn arb_datetime() -> impl Strategy<Value = NaiveDateTime> {
        (0i64..400 * 86_400).prop_map(|offset| {
            let base = NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default();
            base + chrono::Duration::seconds(offset)
        })
    }

    fn arb_word() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}"
    }

    /// Arbitrary fields from any source, with each field independently known
    /// or unknown.
    pub fn arb_fields() -> impl Strategy<Value = JobFields> {
        let people = (
            arb_source(),
            proptest::option::of(arb_word()),
            proptest::option::of(arb_word()),
            proptest::option::of(arb_word()),
            proptest::option::of(arb_queue_state()),
            proptest::option::of(arb_word()),
        );
        let history = (
            proptest::option::of(arb_word()),
            proptest::option::of(arb_datetime()),
            proptest::option::of(arb_word()),
            proptest::option::of(-3i32..3),
            proptest::option::of(arb_datetime()),
            proptest::option::of(arb_word()),
        );
        let resources = (
            proptest::option::of((0u32..64).prop_map(|gb| Memory::from_gb(f64::from(gb)))),
            proptest::option::of((0u32..64).prop_map(|gb| Memory::from_gb(f64::from(gb)))),
            proptest::option::of((0u64..200_000).prop_map(Walltime::from_secs)),
            proptest::option::of((0u64..200_000).prop_map(Walltime::from_secs)),
        );
        (people, history, resources).prop_map(
            |(
                (source, owner, name, queue, queue_state, exec_host),
                (submitted_command, submitted_at, run_command, exit_status, finished_at, log_line),
                (requested_memory, used_memory, requested_walltime, used_walltime),
            )| JobFields {
                source,
                owner,
                name,
                queue,
                queue_state,
                exec_host,
                submitted_command,
                submitted_at,
                run_command,
                exit_status,
                finished_at,
                requested_memory,
                used_memory,
                requested_walltime,
                used_walltime,
                output_path: None,
                log_line,
            },
        )
    }
}

// ── Field factory functions ─────────────────────────────────────────────────

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(h, min, 0)).unwrap_or_default()
}

pub fn live_fields(owner: &str, state: QueueState) -> JobFields {
    JobFields {
        owner: Some(owner.to_string()),
        queue: Some("batch".to_string()),
        queue_state: Some(state),
        ..JobFields::new(Source::LiveQueue)
    }
}

pub fn log_fields(command: &str, submitted_at: NaiveDateTime, line: &str) -> JobFields {
    JobFields {
        submitted_command: Some(command.to_string()),
        submitted_at: Some(submitted_at),
        log_line: Some(line.to_string()),
        ..JobFields::new(Source::SubmissionLog)
    }
}

pub fn output_fields(exit: i32, finished_at: NaiveDateTime, path: &str) -> JobFields {
    JobFields {
        exit_status: Some(exit),
        finished_at: Some(finished_at),
        output_path: Some(PathBuf::from(path)),
        ..JobFields::new(Source::OutputArtifact)
    }
}
