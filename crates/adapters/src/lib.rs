// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for the PBS scheduler commands and the files it leaves behind

pub mod collect;
pub mod delete;
pub mod live_queue;
pub mod output_artifact;
pub mod process;
pub mod source;
pub mod submission_log;
pub mod summary;

pub use collect::collect_jobs;
pub use delete::{delete_jobs, list_own_active_ids};
pub use live_queue::LiveQueue;
pub use output_artifact::OutputArtifact;
pub use process::{strip_ansi, CachedRunner, CommandError, CommandRunner, SystemRunner};
pub use source::{SourceAdapter, SourceError};
pub use submission_log::{parse_log_line, LogEntry, SubmissionLog};
pub use summary::{QueueSummary, StateCounts};

#[cfg(any(test, feature = "test-support"))]
pub use process::FakeRunner;
#[cfg(any(test, feature = "test-support"))]
pub use source::FakeSource;
